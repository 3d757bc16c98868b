//! Region selection core for the regionpdf front-end.
//!
//! This crate holds the browser-independent logic behind the fixed-region
//! annotation workflow: normalizing drag gestures into rectangles,
//! converting canvas pixels to PDF points, managing the ordered region
//! set, and serializing the payload the extraction backend consumes.
//! Everything that touches the DOM lives in the `regionpdf-wasm` app.

pub mod geometry;
pub mod naming;
pub mod payload;
pub mod region;
pub mod store;

pub use geometry::{client_to_canvas, DragGesture, Rect, Scale, Size, MIN_DRAG_PX};
pub use naming::normalize_parameter_name;
pub use payload::{ProcessRegionsRequest, ProcessRegionsResponse, RegionExtraction};
pub use region::{CanvasGeometry, PdfSpace, Region, ZoomMode};
pub use store::{RegionPatch, RegionStore, CLEAR_ALL_INDEX};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegionError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Backend request failed: {0}")]
    BackendError(String),
}
