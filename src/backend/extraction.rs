//! Attendance extraction client
//!
//! One call: POST /get-attendance with credentials, deserializing the
//! reply straight into the wire-shaped [`AttendanceRecord`].

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::errors::{AuraError, Result};
use crate::types::AttendanceRecord;

/// Hosted extraction service
pub const DEFAULT_EXTRACTION_URL: &str = "https://aura-extraction.onrender.com";

/// Request timeout (the scrape behind the endpoint is slow)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Client for the attendance extraction service
#[derive(Debug, Clone)]
pub struct ExtractionClient {
    client: Client,
    base_url: String,
}

impl ExtractionClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_EXTRACTION_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AuraError::HttpError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Log in and fetch the attendance record
    pub async fn fetch_attendance(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AttendanceRecord> {
        let url = format!("{}/get-attendance", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| AuraError::ExtractionApi(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AuraError::ExtractionApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json::<AttendanceRecord>()
            .await
            .map_err(|e| AuraError::InvalidRecord(e.to_string()))
    }

    /// Check if the extraction service is reachable
    pub async fn health_check(&self) -> Result<bool> {
        match self.client.get(&self.base_url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}
