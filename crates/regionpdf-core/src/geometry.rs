//! Canvas and PDF coordinate geometry
//!
//! Drag handling works in canvas backing pixels (top-left origin); the
//! extraction backend consumes PDF points (the page's scale-1 space).
//! The conversion between the two is a per-axis linear scale captured at
//! the moment a region is finalized.

use serde::{Deserialize, Deserializer, Serialize};

/// Minimum drag extent in canvas pixels. A gesture whose width or height
/// is at or below this is treated as an accidental click, not a selection.
pub const MIN_DRAG_PX: f64 = 10.0;

/// Width/height pair in either pixel or point units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle stored as top-left / bottom-right corners.
///
/// `x1 <= x2`, `y1 <= y2` and non-negative coordinates always hold;
/// construct via [`Rect::from_corners`] so arbitrary drag endpoints are
/// normalized on entry. Deserialization re-normalizes, so external JSON
/// (a saved template) cannot inject an inverted or negative rect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl<'de> Deserialize<'de> for Rect {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            x1: f64,
            y1: f64,
            x2: f64,
            y2: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        let rect = Rect::from_corners(raw.x1, raw.y1, raw.x2, raw.y2);
        Ok(Rect {
            x1: rect.x1.max(0.0),
            y1: rect.y1.max(0.0),
            x2: rect.x2.max(0.0),
            y2: rect.y2.max(0.0),
        })
    }
}

impl Rect {
    /// Build a normalized rectangle from two arbitrary corner points.
    pub fn from_corners(ax: f64, ay: f64, bx: f64, by: f64) -> Self {
        Self {
            x1: ax.min(bx),
            y1: ay.min(by),
            x2: ax.max(bx),
            y2: ay.max(by),
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Clamp all corners into `[0, bounds]` per axis. Pointer capture
    /// keeps delivering events after the pointer leaves the canvas, so
    /// drag endpoints can land outside the backing buffer.
    pub fn clamped(&self, bounds: Size) -> Rect {
        Rect {
            x1: self.x1.clamp(0.0, bounds.width),
            y1: self.y1.clamp(0.0, bounds.height),
            x2: self.x2.clamp(0.0, bounds.width),
            y2: self.y2.clamp(0.0, bounds.height),
        }
    }

    /// Apply a per-axis scale to all four corners.
    pub fn scaled(&self, scale: Scale) -> Rect {
        Rect {
            x1: self.x1 * scale.x,
            y1: self.y1 * scale.y,
            x2: self.x2 * scale.x,
            y2: self.y2 * scale.y,
        }
    }
}

/// Per-axis ratio mapping canvas backing pixels to PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    /// Ratio between a page's point size and the canvas it was rendered on.
    pub fn between(pdf_page: Size, canvas: Size) -> Scale {
        Scale {
            x: pdf_page.width / canvas.width,
            y: pdf_page.height / canvas.height,
        }
    }
}

/// Translate one axis of a pointer event's viewport coordinate into canvas
/// backing-pixel space.
///
/// `rect_origin` and `rect_extent` come from the canvas bounding rect;
/// `backing_extent` is the canvas buffer size, which differs from the CSS
/// box under device-pixel-ratio or fit-to-width scaling.
///
/// The result is unclamped: a pointer outside the canvas maps to a
/// coordinate below zero or beyond the backing extent. Callers clamp
/// into the buffer ([`Rect::clamped`] or the capture layer's view).
pub fn client_to_canvas(
    client: f64,
    rect_origin: f64,
    rect_extent: f64,
    backing_extent: f64,
) -> f64 {
    (client - rect_origin) * (backing_extent / rect_extent)
}

/// A raw drag gesture: anchor and release points in canvas backing pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl DragGesture {
    /// The normalized rectangle spanned by the gesture.
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.start_x, self.start_y, self.end_x, self.end_y)
    }

    /// Whether the gesture is large enough to count as a selection.
    pub fn is_selection(&self) -> bool {
        let rect = self.rect();
        rect.width() > MIN_DRAG_PX && rect.height() > MIN_DRAG_PX
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coord() -> impl Strategy<Value = f64> {
        0.0f64..5000.0
    }

    fn dimension() -> impl Strategy<Value = f64> {
        1.0f64..5000.0
    }

    proptest! {
        /// Property: normalized rects always satisfy the corner ordering
        #[test]
        fn rect_corners_ordered(ax in coord(), ay in coord(), bx in coord(), by in coord()) {
            let rect = Rect::from_corners(ax, ay, bx, by);
            prop_assert!(rect.x1 <= rect.x2);
            prop_assert!(rect.y1 <= rect.y2);
            prop_assert!(rect.width() >= 0.0);
            prop_assert!(rect.height() >= 0.0);
        }

        /// Property: corner order does not matter
        #[test]
        fn from_corners_is_symmetric(ax in coord(), ay in coord(), bx in coord(), by in coord()) {
            prop_assert_eq!(
                Rect::from_corners(ax, ay, bx, by),
                Rect::from_corners(bx, by, ax, ay)
            );
        }

        /// Property: scaling the rect scales each corner element-wise
        #[test]
        fn scaled_is_elementwise(
            ax in coord(), ay in coord(), bx in coord(), by in coord(),
            page_w in dimension(), page_h in dimension(),
            canvas_w in dimension(), canvas_h in dimension(),
        ) {
            let rect = Rect::from_corners(ax, ay, bx, by);
            let scale = Scale::between(Size::new(page_w, page_h), Size::new(canvas_w, canvas_h));
            let scaled = rect.scaled(scale);

            let tolerance = 1e-9;
            prop_assert!((scaled.x1 - rect.x1 * scale.x).abs() < tolerance);
            prop_assert!((scaled.y1 - rect.y1 * scale.y).abs() < tolerance);
            prop_assert!((scaled.x2 - rect.x2 * scale.x).abs() < tolerance);
            prop_assert!((scaled.y2 - rect.y2 * scale.y).abs() < tolerance);
        }

        /// Property: scaling to PDF space and back returns the original rect
        #[test]
        fn scale_round_trips(
            ax in coord(), ay in coord(), bx in coord(), by in coord(),
            page_w in dimension(), page_h in dimension(),
            canvas_w in dimension(), canvas_h in dimension(),
        ) {
            let page = Size::new(page_w, page_h);
            let canvas = Size::new(canvas_w, canvas_h);
            let rect = Rect::from_corners(ax, ay, bx, by);

            let forward = rect.scaled(Scale::between(page, canvas));
            let back = forward.scaled(Scale::between(canvas, page));

            // Relative tolerance: coordinates can be in the thousands
            let tolerance = 1e-6 * (1.0 + rect.x2.max(rect.y2));
            prop_assert!((back.x1 - rect.x1).abs() < tolerance);
            prop_assert!((back.y1 - rect.y1).abs() < tolerance);
            prop_assert!((back.x2 - rect.x2).abs() < tolerance);
            prop_assert!((back.y2 - rect.y2).abs() < tolerance);
        }

        /// Property: clamping keeps corners ordered and inside the bounds,
        /// including for drags that start or end outside the canvas
        #[test]
        fn clamped_is_ordered_and_bounded(
            ax in -2000.0f64..7000.0, ay in -2000.0f64..7000.0,
            bx in -2000.0f64..7000.0, by in -2000.0f64..7000.0,
            w in dimension(), h in dimension(),
        ) {
            let rect = Rect::from_corners(ax, ay, bx, by).clamped(Size::new(w, h));
            prop_assert!(0.0 <= rect.x1 && rect.x1 <= rect.x2 && rect.x2 <= w);
            prop_assert!(0.0 <= rect.y1 && rect.y1 <= rect.y2 && rect.y2 <= h);
        }

        /// Property: client translation is linear in the client coordinate
        #[test]
        fn client_translation_is_linear(
            origin in coord(),
            extent in dimension(),
            backing in dimension(),
            offset in 0.0f64..1000.0,
        ) {
            let a = client_to_canvas(origin + offset, origin, extent, backing);
            let b = client_to_canvas(origin + 2.0 * offset, origin, extent, backing);
            let tolerance = 1e-6 * (1.0 + b.abs());
            prop_assert!((b - 2.0 * a).abs() < tolerance);
        }
    }
}
