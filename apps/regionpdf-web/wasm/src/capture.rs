//! Pointer capture for drawing extraction regions
//!
//! A gesture runs begin -> update* -> release, all in viewport (client)
//! coordinates; the capture converts them into canvas backing pixels as
//! they arrive. Page geometry resolves asynchronously after release, so
//! a released gesture becomes a [`PendingRegion`] carrying a one-shot
//! token. Starting a new gesture or resetting the capture invalidates
//! outstanding tokens, which keeps a slow geometry lookup from
//! materializing a stale region.

use regionpdf_core::geometry::client_to_canvas;
use regionpdf_core::{CanvasGeometry, DragGesture, Rect, Region, Size, ZoomMode};
use uuid::Uuid;
use web_sys::HtmlCanvasElement;

/// Identity of one begin..release gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureToken(Uuid);

impl GestureToken {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Snapshot of a canvas's position and sizes taken when a gesture begins.
///
/// Captured once per gesture: the bounding rect is a layout read, and the
/// transform must stay consistent even if the layout shifts mid-drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    pub origin_x: f64,
    pub origin_y: f64,
    pub display: Size,
    pub actual: Size,
}

impl CanvasView {
    pub fn new(origin_x: f64, origin_y: f64, display: Size, actual: Size) -> Self {
        Self {
            origin_x,
            origin_y,
            display,
            actual,
        }
    }

    /// Read the live geometry of a canvas element.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Self {
        let rect = canvas.get_bounding_client_rect();
        Self {
            origin_x: rect.left(),
            origin_y: rect.top(),
            display: Size::new(rect.width(), rect.height()),
            actual: Size::new(f64::from(canvas.width()), f64::from(canvas.height())),
        }
    }

    /// Map a pointer event's client coordinates into backing pixels,
    /// clamped into the buffer. Pointer capture keeps delivering events
    /// once the pointer leaves the canvas, and emitted coordinates must
    /// stay non-negative and on the page.
    pub fn to_canvas_point(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        let x = client_to_canvas(client_x, self.origin_x, self.display.width, self.actual.width);
        let y = client_to_canvas(
            client_y,
            self.origin_y,
            self.display.height,
            self.actual.height,
        );
        (
            x.clamp(0.0, self.actual.width),
            y.clamp(0.0, self.actual.height),
        )
    }

    pub fn geometry(&self) -> CanvasGeometry {
        CanvasGeometry {
            actual: self.actual,
            display: self.display,
        }
    }
}

/// A released gesture waiting for page geometry before it becomes a
/// [`Region`]. Redeemable exactly once, via [`RegionCapture::complete`].
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRegion {
    token: GestureToken,
    gesture: DragGesture,
    page: u32,
    canvas: CanvasGeometry,
    zoom: ZoomMode,
}

impl PendingRegion {
    pub fn page(&self) -> u32 {
        self.page
    }
}

struct ActiveGesture {
    token: GestureToken,
    view: CanvasView,
    page: u32,
    zoom: ZoomMode,
    start_x: f64,
    start_y: f64,
}

/// Drag state machine for one document view.
#[derive(Default)]
pub struct RegionCapture {
    active: Option<ActiveGesture>,
    outstanding: Option<GestureToken>,
}

impl RegionCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture at a pointer-down. Any in-flight gesture and any
    /// outstanding pending region are superseded.
    pub fn begin(
        &mut self,
        view: CanvasView,
        page: u32,
        zoom: ZoomMode,
        client_x: f64,
        client_y: f64,
    ) -> GestureToken {
        let (x, y) = view.to_canvas_point(client_x, client_y);
        let token = GestureToken::new();
        self.active = Some(ActiveGesture {
            token,
            view,
            page,
            zoom,
            start_x: x,
            start_y: y,
        });
        self.outstanding = Some(token);
        token
    }

    /// Track a pointer-move. Returns the live rectangle in backing pixels
    /// for drag feedback, or `None` when no gesture is active.
    pub fn update(&self, client_x: f64, client_y: f64) -> Option<Rect> {
        let active = self.active.as_ref()?;
        let (x, y) = active.view.to_canvas_point(client_x, client_y);
        Some(Rect::from_corners(
            active.start_x,
            active.start_y,
            x,
            y,
        ))
    }

    /// End the gesture at a pointer-up.
    ///
    /// Below the drag threshold the gesture is discarded as a click and
    /// its token invalidated. Otherwise the result is a pending region;
    /// the caller resolves page geometry and redeems it with
    /// [`RegionCapture::complete`].
    pub fn release(&mut self, client_x: f64, client_y: f64) -> Option<PendingRegion> {
        let active = self.active.take()?;
        let (x, y) = active.view.to_canvas_point(client_x, client_y);
        let gesture = DragGesture {
            start_x: active.start_x,
            start_y: active.start_y,
            end_x: x,
            end_y: y,
        };

        if !gesture.is_selection() {
            self.outstanding = None;
            return None;
        }

        Some(PendingRegion {
            token: active.token,
            gesture,
            page: active.page,
            canvas: active.view.geometry(),
            zoom: active.zoom,
        })
    }

    /// Redeem a pending region into a [`Region`].
    ///
    /// Returns `None` when the token has been superseded by a newer
    /// gesture or a reset. A missing `page_size` still yields a region,
    /// with `pdf_space` left empty.
    pub fn complete(&mut self, pending: PendingRegion, page_size: Option<Size>) -> Option<Region> {
        if self.outstanding != Some(pending.token) {
            return None;
        }
        self.outstanding = None;
        Region::from_gesture(
            pending.gesture,
            pending.page,
            pending.canvas,
            page_size,
            pending.zoom,
        )
    }

    /// Abandon any active gesture and invalidate outstanding tokens,
    /// used when the document or page changes mid-interaction.
    pub fn reset(&mut self) {
        self.active = None;
        self.outstanding = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }
}
