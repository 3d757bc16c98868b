//! The region data model
//!
//! A region is created atomically when a drag gesture is released over a
//! rendered page canvas. It carries both coordinate systems plus the
//! geometry metadata captured at draw time: page sizes and canvas sizes
//! are not stable across zoom or fit-to-width changes, so every region
//! records its own rather than referencing shared viewer state.

use crate::geometry::{DragGesture, Rect, Scale, Size, MIN_DRAG_PX};
use crate::naming::normalize_parameter_name;
use serde::{Deserialize, Serialize};

/// Viewer zoom state active when a region was drawn, recorded for
/// downstream debugging and reproducibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "camelCase")]
pub enum ZoomMode {
    /// Fixed numeric scale factor (1.0 = 100%).
    Scale(f64),
    /// Scale recomputed so the rendered page width fills the container.
    FitWidth,
}

/// PDF point-space representation of a region plus the transform that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfSpace {
    /// The canvas rectangle scaled into PDF points.
    pub rect: Rect,
    /// The page's native size in points (scale-1 viewport).
    pub page_size: Size,
    pub scale_x: f64,
    pub scale_y: f64,
}

/// Sizes of the canvas a gesture was drawn on.
///
/// `actual` is the backing pixel buffer; `display` is the CSS-rendered
/// box, which differs under device-pixel-ratio or fit-to-width scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasGeometry {
    pub actual: Size,
    pub display: Size,
}

/// A user-drawn extraction region on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// 1-based page number the rectangle was drawn on.
    pub page: u32,
    /// The rectangle in canvas backing pixels, normalized.
    pub canvas_rect: Rect,
    pub canvas_actual_size: Size,
    pub canvas_display_size: Size,
    pub zoom: ZoomMode,
    /// `None` is the explicit marker that the page's PDF geometry could
    /// not be obtained; the region is still valid in canvas pixels.
    pub pdf_space: Option<PdfSpace>,
    pub parameter_name: Option<String>,
}

impl Region {
    /// Finalize a released drag gesture into a region.
    ///
    /// The gesture rect is clamped into the canvas backing buffer first:
    /// pointer capture keeps delivering events after the pointer leaves
    /// the canvas, and the emitted coordinates must stay non-negative
    /// and on the page. Returns `None` only when the clamped rect is
    /// below the drag threshold. A missing `page_size` never blocks
    /// creation: the region is emitted with canvas coordinates only and
    /// `pdf_space` left empty.
    pub fn from_gesture(
        gesture: DragGesture,
        page: u32,
        canvas: CanvasGeometry,
        page_size: Option<Size>,
        zoom: ZoomMode,
    ) -> Option<Region> {
        let canvas_rect = gesture.rect().clamped(canvas.actual);
        if canvas_rect.width() <= MIN_DRAG_PX || canvas_rect.height() <= MIN_DRAG_PX {
            return None;
        }
        let pdf_space = page_size.map(|size| {
            let scale = Scale::between(size, canvas.actual);
            PdfSpace {
                rect: canvas_rect.scaled(scale),
                page_size: size,
                scale_x: scale.x,
                scale_y: scale.y,
            }
        });

        Some(Region {
            page,
            canvas_rect,
            canvas_actual_size: canvas.actual,
            canvas_display_size: canvas.display,
            zoom,
            pdf_space,
            parameter_name: None,
        })
    }

    /// Attach a user-supplied label, normalized into a machine name.
    pub fn set_parameter_name(&mut self, label: &str) {
        self.parameter_name = Some(normalize_parameter_name(label));
    }

    /// The PDF point rectangle, when geometry was available at draw time.
    pub fn pdf_rect(&self) -> Option<Rect> {
        self.pdf_space.map(|s| s.rect)
    }
}
