//! Generative backend client
//!
//! Consulted only after the local resolver reports `NoLocalMatch`. One
//! prompt goes out; a reply whose nested candidates/content/parts shape
//! does not hold is "no answer available" (`Ok(None)`), never a crash.
//! Network failure is an error the caller turns into a fixed,
//! user-visible apology.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{AuraError, Result};
use crate::types::AttendanceRecord;

/// Default generative-language API endpoint
pub const DEFAULT_GENERATIVE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_GENERATIVE_MODEL: &str = "gemini-2.0-flash";

/// Request timeout; without it a dead backend would hang the chat
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Generative backend client
#[derive(Debug, Clone)]
pub struct GenerativeClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GenerativeClient {
    /// Create a client against the default endpoint and model
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_config(DEFAULT_GENERATIVE_URL, DEFAULT_GENERATIVE_MODEL, api_key)
    }

    /// Create a client with custom endpoint and model
    pub fn with_config(base_url: &str, model: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AuraError::HttpError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Send one prompt; `Ok(None)` means the reply held no usable text
    pub async fn generate(&self, prompt: String) -> Result<Option<String>> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AuraError::GenerativeApi(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AuraError::GenerativeApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AuraError::GenerativeApi(format!("Malformed response: {}", e)))?;

        Ok(extract_text(payload))
    }

    /// Check whether the backend accepts this key
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/models?key={}", self.base_url, self.api_key);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

/// First non-empty text of the first candidate, if the shape holds
fn extract_text(payload: GenerateResponse) -> Option<String> {
    payload
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
        .filter(|text| !text.trim().is_empty())
}

/// Assemble the fallback prompt: assistant persona, user identity, the
/// full record as serialized context, then the raw query
pub fn build_prompt(username: &str, record: Option<&AttendanceRecord>, query: &str) -> String {
    let mut prompt = format!(
        "You are AURA, an Academic Utility and Resource Allocator assistant. \
         The user's name is {}. ",
        username
    );

    if let Some(record) = record {
        if let Ok(serialized) = serde_json::to_string(record) {
            prompt.push_str(&format!(
                "Here is the user's attendance data: {}. ",
                serialized
            ));
        }
    }

    prompt.push_str(&format!(
        "Please respond helpfully to the following query: {}",
        query
    ));
    prompt
}
