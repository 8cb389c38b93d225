//! Gemini `generateContent` client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use zenith_core::{GenerationError, GenerationOptions, TextGenerator};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: GEMINI_BASE_URL.to_string(),
            api_key,
            model: model.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&request_body(prompt, options))
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::Request(format!("invalid response: {}", e)))?;

        if !status.is_success() {
            let message = body["error"]["message"]
                .as_str()
                .unwrap_or("unknown error")
                .to_string();
            return Err(GenerationError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        response_text(&body).ok_or(GenerationError::Empty)
    }
}

fn request_body(prompt: &str, options: GenerationOptions) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "temperature": options.temperature,
            "maxOutputTokens": options.max_output_tokens,
        }
    })
}

/// Concatenated text parts of the first candidate.
fn response_text(body: &Value) -> Option<String> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
