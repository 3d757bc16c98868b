//! Region overlay painting on top of the PDF canvas
//!
//! The painter owns a transparent canvas stacked over the rendered page
//! and subscribes to the region store. Store notifications only snapshot
//! the new region list and request an animation frame; any number of
//! mutations inside one frame collapse into a single repaint of the
//! latest snapshot.

use regionpdf_core::{Rect, Region, RegionStore};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const REGION_FILL: &str = "rgba(59, 130, 246, 0.18)";
const REGION_STROKE: &str = "#2563eb";
const LIVE_STROKE: &str = "#16a34a";

/// Regions belonging to one page, in insertion order. Draw order follows
/// insertion order, so later regions paint over earlier ones.
pub fn regions_on_page(regions: &[Region], page: u32) -> Vec<&Region> {
    regions.iter().filter(|r| r.page == page).collect()
}

struct PaintState {
    regions: Vec<Region>,
    live_rect: Option<Rect>,
    page: u32,
    scheduled: bool,
}

struct Inner {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    state: RefCell<PaintState>,
}

/// Paints the region overlay for one page canvas.
pub struct OverlayPainter {
    inner: Rc<Inner>,
}

impl OverlayPainter {
    /// Wrap an overlay canvas. The canvas is expected to share the page
    /// canvas's backing size so region pixels line up 1:1.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            inner: Rc::new(Inner {
                canvas,
                context,
                state: RefCell::new(PaintState {
                    regions: Vec::new(),
                    live_rect: None,
                    page: 1,
                    scheduled: false,
                }),
            }),
        })
    }

    /// Subscribe to a store. Every mutation snapshots the region list and
    /// schedules a repaint.
    pub fn attach(&self, store: &mut RegionStore) {
        let inner = Rc::clone(&self.inner);
        store.on_change(move |regions| {
            inner.state.borrow_mut().regions = regions.to_vec();
            Inner::schedule(&inner);
        });
    }

    /// Switch which page's regions are painted.
    pub fn set_page(&self, page: u32) {
        self.inner.state.borrow_mut().page = page;
        Inner::schedule(&self.inner);
    }

    /// Set or clear the in-progress drag rectangle.
    pub fn set_live_rect(&self, rect: Option<Rect>) {
        self.inner.state.borrow_mut().live_rect = rect;
        Inner::schedule(&self.inner);
    }

    /// Paint immediately, outside the animation-frame path. Used on
    /// initial mount before any store notification has fired.
    pub fn paint_now(&self) {
        self.inner.paint();
    }
}

impl Inner {
    /// Request one repaint on the next animation frame. Calls while a
    /// frame is already scheduled are absorbed; the frame paints whatever
    /// state is current when it runs.
    fn schedule(inner: &Rc<Inner>) {
        {
            let mut state = inner.state.borrow_mut();
            if state.scheduled {
                return;
            }
            state.scheduled = true;
        }

        let Some(window) = web_sys::window() else {
            inner.state.borrow_mut().scheduled = false;
            return;
        };

        let frame_inner = Rc::clone(inner);
        let callback = Closure::once_into_js(move || {
            frame_inner.state.borrow_mut().scheduled = false;
            frame_inner.paint();
        });

        if window
            .request_animation_frame(callback.unchecked_ref())
            .is_err()
        {
            inner.state.borrow_mut().scheduled = false;
            web_sys::console::warn_1(&JsValue::from_str(
                "requestAnimationFrame unavailable; overlay repaint dropped",
            ));
        }
    }

    fn paint(&self) {
        let state = self.state.borrow();
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());

        self.context.clear_rect(0.0, 0.0, width, height);
        self.context.set_line_width(2.0);

        self.context.set_fill_style_str(REGION_FILL);
        self.context.set_stroke_style_str(REGION_STROKE);
        for region in regions_on_page(&state.regions, state.page) {
            let rect = region.canvas_rect;
            self.context
                .fill_rect(rect.x1, rect.y1, rect.width(), rect.height());
            self.context
                .stroke_rect(rect.x1, rect.y1, rect.width(), rect.height());
        }

        if let Some(rect) = state.live_rect {
            self.context.set_stroke_style_str(LIVE_STROKE);
            self.context
                .stroke_rect(rect.x1, rect.y1, rect.width(), rect.height());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionpdf_core::{CanvasGeometry, DragGesture, Size, ZoomMode};

    fn region_on(page: u32) -> Region {
        let gesture = DragGesture {
            start_x: 10.0,
            start_y: 10.0,
            end_x: 120.0,
            end_y: 60.0,
        };
        let canvas = CanvasGeometry {
            actual: Size::new(800.0, 600.0),
            display: Size::new(800.0, 600.0),
        };
        Region::from_gesture(gesture, page, canvas, None, ZoomMode::Scale(1.0)).unwrap()
    }

    #[test]
    fn test_regions_on_page_filters_and_keeps_order() {
        let regions = vec![region_on(1), region_on(2), region_on(1)];
        let page_one = regions_on_page(&regions, 1);
        assert_eq!(page_one.len(), 2);
        assert!(std::ptr::eq(page_one[0], &regions[0]));
        assert!(std::ptr::eq(page_one[1], &regions[2]));
        assert!(regions_on_page(&regions, 3).is_empty());
    }
}
