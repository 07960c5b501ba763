use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::error;

/// Lambda proxy integration response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// Builds responses carrying the fixed CORS and caching headers.
#[derive(Debug, Clone)]
pub struct ResponseFormatter {
    allowed_origin: String,
    max_age: u64,
}

impl ResponseFormatter {
    pub fn new(allowed_origin: impl Into<String>, max_age: u64) -> Self {
        Self {
            allowed_origin: allowed_origin.into(),
            max_age,
        }
    }

    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert(
            "Access-Control-Allow-Origin".to_string(),
            self.allowed_origin.clone(),
        );
        headers.insert(
            "Access-Control-Allow-Headers".to_string(),
            "Content-Type".to_string(),
        );
        headers.insert(
            "Access-Control-Allow-Methods".to_string(),
            "GET,OPTIONS".to_string(),
        );
        // Always the full window, not what is left of it.
        headers.insert(
            "Cache-Control".to_string(),
            format!("public, max-age={}", self.max_age),
        );
        headers
    }

    pub fn json<T: Serialize>(&self, status_code: u16, body: &T) -> HttpResponse {
        match serde_json::to_string(body) {
            Ok(body) => self.raw(status_code, body),
            Err(e) => {
                error!("Failed to serialize response body: {}", e);
                self.raw(500, json!({ "error": "Internal Server Error" }).to_string())
            }
        }
    }

    pub fn error(&self, status_code: u16, message: &str) -> HttpResponse {
        self.raw(status_code, json!({ "error": message }).to_string())
    }

    fn raw(&self, status_code: u16, body: String) -> HttpResponse {
        HttpResponse {
            status_code,
            headers: self.headers(),
            body,
            is_base64_encoded: false,
        }
    }
}
