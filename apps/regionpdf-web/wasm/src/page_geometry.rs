//! PDF page geometry from the raw document bytes
//!
//! The coordinate transform needs each page's native size in points.
//! pdf.js can report it, but parsing the bytes directly with lopdf keeps
//! the geometry available even before a page has been rendered, and is
//! the fallback when the render bridge reports nothing usable.

use regionpdf_core::Size;
use wasm_bindgen::prelude::*;

/// Reads page sizes out of a loaded PDF.
#[wasm_bindgen]
pub struct PageGeometry {
    doc: lopdf::Document,
}

#[wasm_bindgen]
impl PageGeometry {
    /// Parse a PDF from raw bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(data: &[u8]) -> Result<PageGeometry, JsValue> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| JsValue::from_str(&format!("Failed to load PDF: {}", e)))?;

        Ok(PageGeometry { doc })
    }

    /// Total number of pages.
    #[wasm_bindgen]
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Native size of a page in points, as `{width, height}` or `null`
    /// when the page is missing or its geometry cannot be read.
    #[wasm_bindgen(js_name = pageSize)]
    pub fn page_size_js(&self, page_num: u32) -> JsValue {
        match self.page_size(page_num) {
            Some(size) => serde_wasm_bindgen::to_value(&size).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    /// Render scale that makes the page fill `container_width` CSS pixels.
    #[wasm_bindgen(js_name = fitWidthScale)]
    pub fn fit_width_scale(&self, page_num: u32, container_width: f64) -> Option<f64> {
        let size = self.page_size(page_num)?;
        if size.width <= 0.0 {
            return None;
        }
        Some(container_width / size.width)
    }
}

// Internal implementation (not exposed to WASM)
impl PageGeometry {
    /// Native size of a page in points. `None` is the degraded case:
    /// region capture still works, only without the point-space transform.
    pub fn page_size(&self, page_num: u32) -> Option<Size> {
        let page_id = self.doc.get_pages().get(&page_num).copied()?;
        let page_dict = self.doc.get_object(page_id).ok()?.as_dict().ok()?;
        let rect = self.media_box(page_dict)?;
        let size = Size::new(rect[2] - rect[0], rect[3] - rect[1]);
        if size.width <= 0.0 || size.height <= 0.0 {
            return None;
        }
        Some(size)
    }

    /// Extract MediaBox from a page dictionary, traversing Parent if needed.
    fn media_box(&self, page_dict: &lopdf::Dictionary) -> Option<[f64; 4]> {
        if let Ok(media_box) = page_dict.get(b"MediaBox") {
            return self.parse_rect(media_box);
        }

        if let Ok(parent_ref) = page_dict.get(b"Parent") {
            if let Ok(parent_id) = parent_ref.as_reference() {
                if let Ok(parent) = self.doc.get_object(parent_id) {
                    if let Ok(parent_dict) = parent.as_dict() {
                        if let Ok(media_box) = parent_dict.get(b"MediaBox") {
                            return self.parse_rect(media_box);
                        }
                    }
                }
            }
        }

        // Default to US Letter size
        Some([0.0, 0.0, 612.0, 792.0])
    }

    /// Parse a PDF rectangle array into [x1, y1, x2, y2].
    fn parse_rect(&self, obj: &lopdf::Object) -> Option<[f64; 4]> {
        let arr = match obj {
            lopdf::Object::Array(a) => a,
            lopdf::Object::Reference(id) => {
                self.doc.get_object(*id).ok()?.as_array().ok()?
            }
            _ => return None,
        };

        if arr.len() != 4 {
            return None;
        }

        let mut values = [0.0f64; 4];
        for (i, obj) in arr.iter().enumerate() {
            values[i] = self.extract_number(obj)?;
        }

        Some(values)
    }

    fn extract_number(&self, obj: &lopdf::Object) -> Option<f64> {
        match obj {
            lopdf::Object::Integer(i) => Some(*i as f64),
            lopdf::Object::Real(r) => Some(*r as f64),
            lopdf::Object::Reference(id) => {
                self.extract_number(self.doc.get_object(*id).ok()?)
            }
            _ => None,
        }
    }
}
