//! Minimal client for the AWS Lambda Runtime API.
//!
//! The loop in `main` long-polls `next`, hands the event to the handler and
//! posts the result back. Invocations are delivered one at a time.

use crate::utils::response::HttpResponse;
use reqwest::Client;
use serde_json::json;
use std::error::Error;
use tracing::debug;

const API_VERSION: &str = "2018-06-01";
const REQUEST_ID_HEADER: &str = "Lambda-Runtime-Aws-Request-Id";

#[derive(Debug)]
pub struct Invocation {
    pub request_id: String,
    pub payload: serde_json::Value,
}

pub struct RuntimeClient {
    client: Client,
    base_url: String,
}

impl RuntimeClient {
    /// `endpoint` is the `host:port` from `AWS_LAMBDA_RUNTIME_API`.
    pub fn new(client: Client, endpoint: &str) -> Self {
        let base_url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", endpoint)
        };
        Self {
            client,
            base_url: format!("{}/{}/runtime", base_url, API_VERSION),
        }
    }

    pub async fn next_invocation(&self) -> Result<Invocation, Box<dyn Error>> {
        let url = format!("{}/invocation/next", self.base_url);
        let response = self.client.get(&url).send().await?.error_for_status()?;

        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or("Missing request id header")?
            .to_string();
        let payload = response.json().await?;

        debug!("Received invocation {}", request_id);
        Ok(Invocation { request_id, payload })
    }

    pub async fn send_response(
        &self,
        request_id: &str,
        response: &HttpResponse,
    ) -> Result<(), Box<dyn Error>> {
        let url = format!("{}/invocation/{}/response", self.base_url, request_id);
        self.client
            .post(&url)
            .json(response)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Reports an invocation the handler could not process at all.
    pub async fn send_error(
        &self,
        request_id: &str,
        error_type: &str,
        message: &str,
    ) -> Result<(), Box<dyn Error>> {
        let url = format!("{}/invocation/{}/error", self.base_url, request_id);
        self.client
            .post(&url)
            .header("Lambda-Runtime-Function-Error-Type", error_type)
            .json(&json!({ "errorType": error_type, "errorMessage": message }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
