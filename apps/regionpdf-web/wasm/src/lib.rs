//! Browser front end for region-based PDF data extraction
//!
//! Rust handles capture state, coordinate transforms, and the region
//! model; pdf.js (via a small JS bridge) handles page rasterization.

// Export modules
pub mod api;
pub mod capture;
pub mod overlay;
pub mod page_geometry;
pub mod pdf_viewer;
pub mod regions;

// Re-export commonly used items
pub use api::ExtractionClient;
pub use capture::{CanvasView, GestureToken, PendingRegion, RegionCapture};
pub use overlay::{regions_on_page, OverlayPainter};
pub use page_geometry::PageGeometry;
pub use pdf_viewer::{init_pdf_js, init_pdf_js_with_worker, PdfViewer};
pub use regions::RegionEditor;

// Core model types, re-exported for JS-adjacent callers
pub use regionpdf_core::{
    ProcessRegionsRequest, ProcessRegionsResponse, Region, RegionStore, ZoomMode,
};
