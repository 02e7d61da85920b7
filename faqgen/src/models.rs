use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// Payload of `POST /generate`. A well-formed client sets exactly one field;
/// absent fields are omitted from the JSON body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl GenerateRequest {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            text: None,
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            url: None,
            text: Some(text.into()),
        }
    }
}

/// Response of `POST /generate`. On success `faqs` is either an array of
/// question/answer objects or whatever other JSON the model produced; on
/// failure `raw` optionally carries the unparseable model output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faqs: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl GenerateReply {
    pub fn ok(faqs: Value) -> Self {
        Self {
            success: true,
            faqs: Some(faqs),
            error: None,
            raw: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            faqs: None,
            error: Some(message.into()),
            raw: None,
        }
    }

    pub fn error_with_raw(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            success: false,
            faqs: None,
            error: Some(message.into()),
            raw: Some(raw.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReply {
    pub ok: bool,
    pub has_key: bool,
    pub model: String,
}

// Wire types for the Gemini generateContent REST API (camelCase on the wire).

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: GeminiContent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generate_request_transmits_exactly_one_field() {
        let body = serde_json::to_value(GenerateRequest::from_text("hello")).unwrap();
        assert_eq!(body, json!({ "text": "hello" }));

        let body = serde_json::to_value(GenerateRequest::from_url("https://example.com")).unwrap();
        assert_eq!(body, json!({ "url": "https://example.com" }));
    }

    #[test]
    fn generate_reply_omits_absent_fields() {
        let body = serde_json::to_value(GenerateReply::ok(json!([]))).unwrap();
        assert_eq!(body, json!({ "success": true, "faqs": [] }));

        let body = serde_json::to_value(GenerateReply::error("boom")).unwrap();
        assert_eq!(body, json!({ "success": false, "error": "boom" }));
    }

    #[test]
    fn generate_reply_tolerates_missing_success() {
        let reply: GenerateReply = serde_json::from_value(json!({ "error": "x" })).unwrap();
        assert!(!reply.success);
        assert_eq!(reply.error.as_deref(), Some("x"));
    }

    #[test]
    fn faq_entry_defaults_missing_fields() {
        let entry: FaqEntry = serde_json::from_value(json!({ "question": "Q" })).unwrap();
        assert_eq!(entry.question, "Q");
        assert_eq!(entry.answer, "");
    }

    #[test]
    fn gemini_request_uses_camel_case_wire_names() {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: Some("hi".to_string()),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: 0.0,
                max_output_tokens: 1024,
            }),
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(body["contents"][0]["role"], "user");
    }
}
