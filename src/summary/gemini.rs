//! Minimal Gemini REST client.
//!
//! One endpoint, one blocking call. Requests go straight to
//! `models/<model>:generateContent` with the API key in a header; the
//! response JSON is picked apart by hand so the only surface depended on
//! is `candidates[0].content.parts[].text`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::SummaryError;
use crate::config::SummaryConfig;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Longest error body fragment worth echoing back to the user.
const ERROR_SNIPPET_LEN: usize = 200;

#[derive(Debug)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Build a client from config, taking the key from `GEMINI_API_KEY`.
    pub fn from_config(config: &SummaryConfig) -> Result<Self, SummaryError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(SummaryError::MissingApiKey)?;

        Ok(Self {
            api_key,
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Send one prompt and return the model's text.
    pub fn generate(&self, prompt: &str) -> Result<String, SummaryError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };
        let body = serde_json::to_string(&request)
            .map_err(|err| SummaryError::Request(err.to_string()))?;

        let url = format!("{API_BASE}/{}:generateContent", self.model);
        tracing::debug!(model = %self.model, prompt_bytes = prompt.len(), "querying Gemini");

        let response = ureq::post(&url)
            .set("Content-Type", "application/json")
            .set("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .send_string(&body);

        let response = match response {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let detail = response.into_string().unwrap_or_default();
                return Err(SummaryError::Request(format!(
                    "HTTP {code}: {}",
                    snippet(&detail)
                )));
            }
            Err(err) => return Err(SummaryError::Request(err.to_string())),
        };

        let text = response
            .into_string()
            .map_err(|err| SummaryError::Request(err.to_string()))?;
        extract_text(&text)
    }
}

/// Pull the candidate text out of a raw generateContent response.
fn extract_text(raw: &str) -> Result<String, SummaryError> {
    let parsed: GenerateResponse =
        serde_json::from_str(raw).map_err(|err| SummaryError::InvalidResponse(err.to_string()))?;

    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(SummaryError::EmptyResponse);
    }
    Ok(text.trim().to_string())
}

fn snippet(detail: &str) -> String {
    let cleaned = detail.trim();
    if cleaned.len() <= ERROR_SNIPPET_LEN {
        cleaned.to_string()
    } else {
        let cut: String = cleaned.chars().take(ERROR_SNIPPET_LEN).collect();
        format!("{cut}…")
    }
}
