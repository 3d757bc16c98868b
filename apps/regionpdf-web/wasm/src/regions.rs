//! WASM bindings for the region editing workflow
//!
//! [`RegionEditor`] is the single object the page script holds. It wires
//! the pointer capture, the store, and the overlay painter together and
//! exposes the store operations under camelCase names.

use crate::api::ExtractionClient;
use crate::capture::{CanvasView, RegionCapture};
use crate::overlay::OverlayPainter;
use regionpdf_core::{
    ProcessRegionsRequest, Region, RegionPatch, RegionStore, Size, ZoomMode,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// Region editing session for one document.
#[wasm_bindgen]
pub struct RegionEditor {
    store: Rc<RefCell<RegionStore>>,
    capture: RegionCapture,
    painter: Option<OverlayPainter>,
    zoom: ZoomMode,
    page_size: Option<Size>,
    current_page: u32,
}

#[allow(clippy::derivable_impls)]
impl Default for RegionEditor {
    fn default() -> Self {
        Self {
            store: Rc::new(RefCell::new(RegionStore::new())),
            capture: RegionCapture::new(),
            painter: None,
            zoom: ZoomMode::Scale(1.0),
            page_size: None,
            current_page: 1,
        }
    }
}

#[wasm_bindgen]
impl RegionEditor {
    /// Create a new region editor
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self::default()
    }

    /// Attach an overlay canvas; regions repaint on it after every change
    #[wasm_bindgen(js_name = attachOverlay)]
    pub fn attach_overlay(&mut self, canvas: HtmlCanvasElement) -> Result<(), JsValue> {
        let painter = OverlayPainter::new(canvas)?;
        painter.attach(&mut self.store.borrow_mut());
        painter.set_page(self.current_page);
        painter.paint_now();
        self.painter = Some(painter);
        Ok(())
    }

    /// Set a fixed zoom factor for subsequent gestures
    #[wasm_bindgen(js_name = setZoomScale)]
    pub fn set_zoom_scale(&mut self, scale: f64) {
        self.zoom = ZoomMode::Scale(scale);
    }

    /// Switch to fit-to-width zoom for subsequent gestures
    #[wasm_bindgen(js_name = setZoomFitWidth)]
    pub fn set_zoom_fit_width(&mut self) {
        self.zoom = ZoomMode::FitWidth;
    }

    /// Record the current page's native size in points
    #[wasm_bindgen(js_name = setPageSize)]
    pub fn set_page_size(&mut self, width: f64, height: f64) {
        self.page_size = Some(Size::new(width, height));
    }

    /// Forget the page size; regions capture in canvas pixels only
    #[wasm_bindgen(js_name = clearPageSize)]
    pub fn clear_page_size(&mut self) {
        self.page_size = None;
    }

    /// Switch pages. Cancels any in-flight gesture.
    #[wasm_bindgen(js_name = setPage)]
    pub fn set_page(&mut self, page: u32) {
        self.current_page = page;
        self.capture.reset();
        if let Some(painter) = &self.painter {
            painter.set_live_rect(None);
            painter.set_page(page);
        }
    }

    /// Start a drag at a pointerdown on the page canvas
    #[wasm_bindgen(js_name = beginGesture)]
    pub fn begin_gesture(&mut self, canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) {
        let view = CanvasView::from_canvas(canvas);
        self.capture
            .begin(view, self.current_page, self.zoom, client_x, client_y);
    }

    /// Track a pointermove while dragging
    #[wasm_bindgen(js_name = updateGesture)]
    pub fn update_gesture(&mut self, client_x: f64, client_y: f64) {
        let live = self.capture.update(client_x, client_y);
        if let Some(painter) = &self.painter {
            painter.set_live_rect(live);
        }
    }

    /// Finish the drag at a pointerup. Returns true when a region was
    /// added; false means the gesture was a click or was superseded.
    #[wasm_bindgen(js_name = finishGesture)]
    pub fn finish_gesture(&mut self, client_x: f64, client_y: f64) -> bool {
        if let Some(painter) = &self.painter {
            painter.set_live_rect(None);
        }

        let Some(pending) = self.capture.release(client_x, client_y) else {
            return false;
        };
        let Some(region) = self.capture.complete(pending, self.page_size) else {
            return false;
        };

        self.store.borrow_mut().add(region);
        true
    }

    /// Abandon any in-flight drag
    #[wasm_bindgen(js_name = cancelGesture)]
    pub fn cancel_gesture(&mut self) {
        self.capture.reset();
        if let Some(painter) = &self.painter {
            painter.set_live_rect(None);
        }
    }

    /// Delete one region by index; -1 clears all regions
    #[wasm_bindgen(js_name = deleteRegion)]
    pub fn delete_region(&mut self, index: i32) {
        self.store.borrow_mut().delete(index);
    }

    /// Clear all regions
    #[wasm_bindgen(js_name = clearRegions)]
    pub fn clear_regions(&mut self) {
        self.store.borrow_mut().clear_all();
    }

    /// Set the parameter name on one region; the label is normalized
    #[wasm_bindgen(js_name = updateParameterName)]
    pub fn update_parameter_name(&mut self, index: u32, label: &str) {
        self.store.borrow_mut().update(
            index as usize,
            &RegionPatch {
                parameter_name: Some(label.to_string()),
            },
        );
    }

    /// Get all regions as JSON
    #[wasm_bindgen(js_name = getRegionsJson)]
    pub fn get_regions_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.store.borrow().regions())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize regions: {}", e)))
    }

    /// Replace all regions from JSON (e.g. a saved template)
    #[wasm_bindgen(js_name = setRegionsJson)]
    pub fn set_regions_json(&mut self, json: &str) -> Result<(), JsValue> {
        let regions: Vec<Region> = serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse regions: {}", e)))?;
        self.store.borrow_mut().set_all(regions);
        Ok(())
    }

    /// Get region count
    #[wasm_bindgen(js_name = regionCount)]
    pub fn region_count(&self) -> usize {
        self.store.borrow().len()
    }

    /// Submit all regions to the extraction backend and return the
    /// parsed response
    #[wasm_bindgen(js_name = processRegions)]
    pub async fn process_regions(
        &self,
        base_url: String,
        document_id: String,
        template_type: String,
    ) -> Result<JsValue, JsValue> {
        // Snapshot before awaiting; the store must not stay borrowed
        // across the fetch.
        let regions = self.store.borrow().regions().to_vec();
        web_sys::console::log_1(&JsValue::from_str(&format!(
            "Submitting {} regions for document {}",
            regions.len(),
            document_id
        )));
        let request = ProcessRegionsRequest::new(&document_id, &template_type, regions);

        let client = ExtractionClient::new(&base_url);
        let response = client
            .process_regions(&request)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&response)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use regionpdf_core::{CanvasGeometry, DragGesture};

    fn editor_with_region(page: u32) -> RegionEditor {
        let mut editor = RegionEditor::default();
        let gesture = DragGesture {
            start_x: 100.0,
            start_y: 100.0,
            end_x: 300.0,
            end_y: 200.0,
        };
        let canvas = CanvasGeometry {
            actual: Size::new(800.0, 600.0),
            display: Size::new(800.0, 600.0),
        };
        let region = Region::from_gesture(
            gesture,
            page,
            canvas,
            Some(Size::new(612.0, 792.0)),
            ZoomMode::Scale(1.0),
        )
        .unwrap();
        editor.store.borrow_mut().add(region);
        editor
    }

    #[test]
    fn test_delete_and_clear() {
        let mut editor = editor_with_region(1);
        assert_eq!(editor.region_count(), 1);

        editor.delete_region(5); // out of range, no-op
        assert_eq!(editor.region_count(), 1);

        editor.delete_region(-1);
        assert_eq!(editor.region_count(), 0);
    }

    #[test]
    fn test_update_parameter_name_normalizes() {
        let mut editor = editor_with_region(1);
        editor.update_parameter_name(0, "Patient Name");

        let json = editor.get_regions_json().unwrap();
        let regions: Vec<Region> = serde_json::from_str(&json).unwrap();
        assert_eq!(regions[0].parameter_name.as_deref(), Some("patient_name"));
    }

    #[test]
    fn test_regions_json_round_trip() {
        let editor = editor_with_region(2);
        let json = editor.get_regions_json().unwrap();

        let mut fresh = RegionEditor::default();
        fresh.set_regions_json(&json).unwrap();
        assert_eq!(fresh.region_count(), 1);
        assert_eq!(fresh.get_regions_json().unwrap(), json);
    }

    #[test]
    fn test_set_regions_json_normalizes_inverted_rects() {
        // A saved template edited by hand can carry swapped corners or
        // negative coordinates; loading must not bypass normalization.
        let json = r#"[{
            "page": 1,
            "canvasRect": {"x1": 300.0, "y1": 200.0, "x2": -100.0, "y2": 100.0},
            "canvasActualSize": {"width": 800.0, "height": 600.0},
            "canvasDisplaySize": {"width": 800.0, "height": 600.0},
            "zoom": {"mode": "scale", "value": 1.0},
            "pdfSpace": null,
            "parameterName": null
        }]"#;

        let mut editor = RegionEditor::default();
        editor.set_regions_json(json).unwrap();

        let stored: Vec<Region> =
            serde_json::from_str(&editor.get_regions_json().unwrap()).unwrap();
        let rect = stored[0].canvas_rect;
        assert_eq!(rect.x1, 0.0);
        assert_eq!(rect.y1, 100.0);
        assert_eq!(rect.x2, 300.0);
        assert_eq!(rect.y2, 200.0);
        assert!(rect.x1 <= rect.x2 && rect.y1 <= rect.y2);
    }

    #[test]
    fn test_set_regions_json_rejects_garbage() {
        let mut editor = RegionEditor::default();
        assert!(editor.set_regions_json("not json").is_err());
        assert_eq!(editor.region_count(), 0);
    }

    #[test]
    fn test_set_page_cancels_gesture() {
        let mut editor = RegionEditor::default();
        let view = CanvasView::new(
            0.0,
            0.0,
            Size::new(800.0, 600.0),
            Size::new(800.0, 600.0),
        );
        editor.capture.begin(view, 1, editor.zoom, 10.0, 10.0);
        assert!(editor.capture.is_dragging());

        editor.set_page(2);
        assert!(!editor.capture.is_dragging());
        assert_eq!(editor.current_page, 2);
    }

    #[test]
    fn test_zoom_and_page_size_state() {
        let mut editor = RegionEditor::default();
        editor.set_zoom_fit_width();
        assert_eq!(editor.zoom, ZoomMode::FitWidth);

        editor.set_zoom_scale(1.5);
        assert_eq!(editor.zoom, ZoomMode::Scale(1.5));

        editor.set_page_size(612.0, 792.0);
        assert_eq!(editor.page_size, Some(Size::new(612.0, 792.0)));
        editor.clear_page_size();
        assert_eq!(editor.page_size, None);
    }
}
