//! Backend extraction API client
//!
//! Thin fetch wrapper around the "process regions" endpoint. All JS
//! errors are flattened into [`RegionError::BackendError`] strings so
//! callers above the boundary never handle `JsValue` directly.

use regionpdf_core::{ProcessRegionsRequest, ProcessRegionsResponse, RegionError};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::JsFuture;
#[cfg(target_arch = "wasm32")]
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Client for the region extraction backend.
pub struct ExtractionClient {
    base_url: String,
}

impl ExtractionClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn process_regions_url(&self) -> String {
        format!("{}/api/process-regions", self.base_url)
    }

    /// Submit regions for extraction and parse the response.
    #[cfg(target_arch = "wasm32")]
    pub async fn process_regions(
        &self,
        request: &ProcessRegionsRequest,
    ) -> Result<ProcessRegionsResponse, RegionError> {
        let body = request.to_json()?;
        let url = self.process_regions_url();

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(&url, &opts)
            .map_err(|e| RegionError::BackendError(format!("Failed to build request: {:?}", e)))?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| RegionError::BackendError(format!("Failed to set headers: {:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| RegionError::BackendError("No window object".to_string()))?;

        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| RegionError::BackendError(format!("Fetch failed: {:?}", e)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| RegionError::BackendError("Fetch result is not a Response".to_string()))?;

        if !response.ok() {
            return Err(RegionError::BackendError(format!(
                "Server returned status {}",
                response.status()
            )));
        }

        let text = JsFuture::from(
            response
                .text()
                .map_err(|e| RegionError::BackendError(format!("Failed to read body: {:?}", e)))?,
        )
        .await
        .map_err(|e| RegionError::BackendError(format!("Failed to read body: {:?}", e)))?;

        let text = text
            .as_string()
            .ok_or_else(|| RegionError::BackendError("Response body is not text".to_string()))?;

        ProcessRegionsResponse::from_json(&text)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub async fn process_regions(
        &self,
        _request: &ProcessRegionsRequest,
    ) -> Result<ProcessRegionsResponse, RegionError> {
        Err(RegionError::BackendError(
            "Region processing is only available in the browser".to_string(),
        ))
    }
}
