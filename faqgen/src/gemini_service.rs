use crate::config;
use crate::models::*;
use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);
const TEMPERATURE: f32 = 0.0;
const MAX_OUTPUT_TOKENS: u32 = 1024;

pub struct GeminiService {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiService {
    pub fn new() -> Result<Self> {
        Self::with_client(Client::new())
    }

    /// Key and model are re-read from the environment on every construction,
    /// so edits to `api.env` apply to the next request without a restart.
    pub fn with_client(client: Client) -> Result<Self> {
        let api_key = config::get_api_key()
            .ok_or_else(|| anyhow!("GEMINI_API_KEY (or GOOGLE_API_KEY) is not set"))?;

        Ok(Self {
            client,
            api_key,
            model: config::get_model_name(),
        })
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            }),
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        log::info!("Calling Gemini model {}", self.model);

        let response = self
            .client
            .post(&url)
            .timeout(GENERATION_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "{} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                body
            ));
        }

        let value: Value = response.json().await?;
        Ok(extract_candidate_text(&value))
    }
}

/// Concatenated text parts of the first candidate. When the response carries
/// no text (safety block, empty candidates) the whole JSON is returned so the
/// caller can surface it.
pub fn extract_candidate_text(value: &Value) -> String {
    let response: GeminiResponse = serde_json::from_value(value.clone()).unwrap_or_default();

    let texts: Vec<&str> = response
        .candidates
        .first()
        .map(|candidate| {
            candidate
                .content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if texts.is_empty() {
        value.to_string()
    } else {
        texts.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let value = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "{\"faqs\": "}, {"text": "[]}"}]
                }
            }]
        });

        assert_eq!(extract_candidate_text(&value), "{\"faqs\": []}");
    }

    #[test]
    fn ignores_parts_without_text() {
        let value = json!({
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "image/png"}}, {"text": "hello"}]
                }
            }]
        });

        assert_eq!(extract_candidate_text(&value), "hello");
    }

    #[test]
    fn falls_back_to_whole_response_without_candidates() {
        let value = json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        });

        assert_eq!(extract_candidate_text(&value), value.to_string());
    }

    #[test]
    fn falls_back_when_candidates_have_unexpected_shape() {
        let value = json!({"candidates": "oops"});

        assert_eq!(extract_candidate_text(&value), value.to_string());
    }
}
