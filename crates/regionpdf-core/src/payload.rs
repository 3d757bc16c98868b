//! Wire types for the backend extraction API
//!
//! The request is exactly the region model serialized with both
//! coordinate systems, scale factors, and normalized parameter names.
//! The response envelope is typed only as far as the UI needs it;
//! everything else the backend sends rides along in `extra` untouched.

use crate::region::Region;
use crate::RegionError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// "Process regions" request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRegionsRequest {
    pub document_id: String,
    pub template_type: String,
    pub regions: Vec<Region>,
}

impl ProcessRegionsRequest {
    pub fn new(document_id: &str, template_type: &str, regions: Vec<Region>) -> Self {
        Self {
            document_id: document_id.to_string(),
            template_type: template_type.to_string(),
            regions,
        }
    }

    pub fn to_json(&self) -> Result<String, RegionError> {
        serde_json::to_string(self).map_err(|e| RegionError::SerializationError(e.to_string()))
    }
}

/// Per-region outcome returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionExtraction {
    pub parameter_name: String,
    /// Extracted value; `None` when the backend could not read the region.
    pub value: Option<String>,
    pub confidence: f64,
    /// Extraction method the backend chose (e.g. "ocr", "vision").
    pub method: String,
    pub extracted_at: Option<DateTime<Utc>>,
    /// Reference to the cropped region image, when the backend stored one.
    pub cropped_image: Option<String>,
    /// Backend bookkeeping the UI displays or passes through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// "Process regions" response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRegionsResponse {
    pub results: Vec<RegionExtraction>,
}

impl ProcessRegionsResponse {
    pub fn from_json(body: &str) -> Result<Self, RegionError> {
        serde_json::from_str(body).map_err(|e| RegionError::SerializationError(e.to_string()))
    }
}
