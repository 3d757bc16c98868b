//! PDF.js integration for rendering PDFs in the browser via WASM

use js_sys::{Reflect, Uint8Array};
use regionpdf_core::Size;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

// External JavaScript functions from pdf-bridge.js
#[wasm_bindgen(module = "/www/js/pdf-bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = initPdfJs)]
    pub async fn init_pdf_js_internal(worker_src: &str) -> JsValue;

    #[wasm_bindgen(js_name = loadDocument)]
    pub async fn load_document_internal(data: Uint8Array) -> JsValue;

    #[wasm_bindgen(js_name = renderPage)]
    pub async fn render_page_internal(
        page_num: u32,
        canvas: &HtmlCanvasElement,
        scale: f64,
    ) -> JsValue;

    #[wasm_bindgen(js_name = getPageDimensions)]
    pub async fn get_page_dimensions_internal(page_num: u32) -> JsValue;
}

/// PdfViewer wraps pdf.js interaction for rendering PDFs in the browser
#[wasm_bindgen]
pub struct PdfViewer {
    document_proxy: Option<JsValue>,
    page_count: u32,
}

#[wasm_bindgen]
impl PdfViewer {
    /// Create a new PdfViewer instance
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            document_proxy: None,
            page_count: 0,
        }
    }

    /// Load a PDF document from bytes
    #[wasm_bindgen]
    pub async fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let uint8_array = Uint8Array::new_with_length(bytes.len() as u32);
        uint8_array.copy_from(bytes);

        let doc_result = load_document_internal(uint8_array).await;

        if doc_result.is_undefined() || doc_result.is_null() {
            return Err(JsValue::from_str("Failed to load PDF document"));
        }

        // Extract numPages from the result object
        if let Ok(num_pages) = Reflect::get(&doc_result, &JsValue::from_str("numPages")) {
            if let Some(count) = num_pages.as_f64() {
                self.page_count = count as u32;
            }
        }

        self.document_proxy = Some(doc_result);

        Ok(())
    }

    /// Get the number of pages in the loaded document
    #[wasm_bindgen]
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Check if a document is currently loaded
    #[wasm_bindgen]
    pub fn is_loaded(&self) -> bool {
        self.document_proxy.is_some() && self.page_count > 0
    }

    /// Render a page to a canvas element at a fixed scale factor
    #[wasm_bindgen]
    pub async fn render_page(
        &self,
        page_num: u32,
        canvas: HtmlCanvasElement,
        scale: f64,
    ) -> Result<(), JsValue> {
        self.check_page(page_num)?;
        render_page_internal(page_num, &canvas, scale).await;
        Ok(())
    }

    /// Render a page so its width fills `container_width` CSS pixels.
    ///
    /// Falls back to scale 1.0 when the page's base size is unavailable,
    /// so rendering never blocks on geometry.
    #[wasm_bindgen]
    pub async fn render_page_fit_width(
        &self,
        page_num: u32,
        canvas: HtmlCanvasElement,
        container_width: f64,
    ) -> Result<(), JsValue> {
        self.check_page(page_num)?;

        let scale = match self.page_base_size(page_num).await {
            Some(size) if size.width > 0.0 => container_width / size.width,
            _ => 1.0,
        };

        render_page_internal(page_num, &canvas, scale).await;
        Ok(())
    }

    /// Base (scale 1.0) page size in points, or `null` when the bridge
    /// reports nothing usable.
    #[wasm_bindgen(js_name = pageBaseSize)]
    pub async fn page_base_size_js(&self, page_num: u32) -> JsValue {
        match self.page_base_size(page_num).await {
            Some(size) => serde_wasm_bindgen::to_value(&size).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }
}

impl PdfViewer {
    /// Base page size via the pdf.js bridge. `None` means the viewer is
    /// operating without geometry; capture proceeds in canvas pixels only.
    pub async fn page_base_size(&self, page_num: u32) -> Option<Size> {
        if self.document_proxy.is_none() || page_num < 1 || page_num > self.page_count {
            return None;
        }

        let dimensions = get_page_dimensions_internal(page_num).await;
        if dimensions.is_undefined() || dimensions.is_null() {
            return None;
        }

        let width = Reflect::get(&dimensions, &JsValue::from_str("width"))
            .ok()?
            .as_f64()?;
        let height = Reflect::get(&dimensions, &JsValue::from_str("height"))
            .ok()?
            .as_f64()?;

        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Size::new(width, height))
    }

    fn check_page(&self, page_num: u32) -> Result<(), JsValue> {
        if self.document_proxy.is_none() {
            return Err(JsValue::from_str("No document loaded"));
        }

        if page_num < 1 || page_num > self.page_count {
            return Err(JsValue::from_str(&format!(
                "Invalid page number: {} (document has {} pages)",
                page_num, self.page_count
            )));
        }

        Ok(())
    }
}

impl Default for PdfViewer {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize PDF.js library with default worker
/// Must be called before creating PdfViewer instances
#[wasm_bindgen]
pub async fn init_pdf_js() -> Result<(), JsValue> {
    init_pdf_js_internal(
        "https://cdn.jsdelivr.net/npm/pdfjs-dist@3.11.174/build/pdf.worker.min.js",
    )
    .await;
    Ok(())
}

/// Initialize PDF.js library with custom worker URL
#[wasm_bindgen]
pub async fn init_pdf_js_with_worker(worker_src: &str) -> Result<(), JsValue> {
    init_pdf_js_internal(worker_src).await;
    Ok(())
}
