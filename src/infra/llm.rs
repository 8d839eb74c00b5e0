use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-05-20";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub struct GeminiClient {
    http: Client,
    endpoint: String,
    model: String,
}

impl GeminiClient {
    pub fn new(endpoint: String, model: String) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            model,
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl LanguageModelService for GeminiClient {
    async fn complete(&self, api_key: Option<&str>, prompt: &str) -> AppResult<String> {
        let api_key = api_key
            .ok_or_else(|| AppError::Configuration("Gemini API key not configured".to_string()))?;

        let response = self
            .http
            .post(self.generate_url())
            .query(&[("key", api_key)])
            .json(&GenerateContentRequest::new(prompt))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|err| {
                AppError::LanguageModel(format!("failed to call Gemini: {}", err.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::LanguageModel(format!(
                "Gemini responded with {status}: {body}"
            )));
        }

        // The request URL carries the key, so it is kept out of error messages.
        let payload: GenerateContentResponse = response.json().await.map_err(|err| {
            AppError::LanguageModel(format!(
                "failed to parse Gemini response: {}",
                err.without_url()
            ))
        })?;

        Ok(payload.first_text())
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    fn new(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}
