//! Shared HTTP shim for all provider adapters.
//!
//! ARCHITECTURAL RULE: no provider module builds its own reqwest client.
//! All upstream calls go through `JobsHttp`, so the timeout budget and
//! headers are set in exactly one place.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use super::FetchError;

/// The single HTTP client used by every provider adapter. Cheap to clone;
/// wraps one connection pool.
#[derive(Clone)]
pub struct JobsHttp {
    client: Client,
}

impl JobsHttp {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// GET a JSON document. Non-2xx statuses and undecodable bodies become
    /// `FetchError`s for the caller to recover from.
    pub async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }

    /// POST a JSON body and decode a JSON response. Used only by Workday's
    /// search endpoint.
    pub async fn post_json(&self, url: &str, body: &Value) -> Result<Value, FetchError> {
        let response = self
            .client
            .post(url)
            .header("accept", "application/json, text/plain, */*")
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }
}
