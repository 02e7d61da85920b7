use crate::client::ApiClient;
use anyhow::Result;
use faq_system::models::{FaqEntry, GenerateReply, GenerateRequest};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const VALIDATION_MESSAGE: &str = "Enter a URL or paste page text to continue";
pub const GENERATING_MESSAGE: &str = "Generating FAQs…";
pub const DONE_MESSAGE: &str = "Done";
pub const DOWNLOAD_FILE_NAME: &str = "faqs.json";

/// What one submit round puts on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReply {
    pub status: String,
    pub is_error: bool,
    pub sections: Vec<FaqEntry>,
    pub raw: Option<String>,
    pub json_block: Option<String>,
    pub scraped_url: Option<String>,
}

impl RenderedReply {
    fn error(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            is_error: true,
            sections: Vec::new(),
            raw: None,
            json_block: None,
            scraped_url: None,
        }
    }
}

/// Both fields trimmed; pasted text wins over the URL, and a payload is only
/// built when at least one field has content.
pub fn build_payload(url: &str, text: &str) -> Option<GenerateRequest> {
    let url = url.trim();
    let text = text.trim();

    if !text.is_empty() {
        Some(GenerateRequest::from_text(text))
    } else if !url.is_empty() {
        Some(GenerateRequest::from_url(url))
    } else {
        None
    }
}

/// Driver for the submit/render/download cycle. The download action and the
/// scraped-page link only become available after a successful round; a failed
/// round hides them again but keeps the previous result.
pub struct FormSession {
    client: ApiClient,
    last_json: Option<Value>,
    download_visible: bool,
}

impl FormSession {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            last_json: None,
            download_visible: false,
        }
    }

    pub fn download_visible(&self) -> bool {
        self.download_visible
    }

    /// One round: validate, call the backend, fold the outcome into rendered
    /// output. Validation failures never reach the network.
    pub async fn submit(&mut self, url: &str, text: &str) -> RenderedReply {
        self.download_visible = false;

        let Some(payload) = build_payload(url, text) else {
            return RenderedReply::error(VALIDATION_MESSAGE);
        };

        match self.client.generate(&payload).await {
            Ok(reply) => self.render_reply(reply),
            Err(error) => RenderedReply::error(format!("Request failed: {error}")),
        }
    }

    fn render_reply(&mut self, reply: GenerateReply) -> RenderedReply {
        if !reply.success {
            let message = reply.error.unwrap_or_else(|| "Unknown error".to_string());
            return RenderedReply {
                status: format!("Error: {message}"),
                is_error: true,
                sections: Vec::new(),
                raw: reply.raw,
                json_block: None,
                scraped_url: None,
            };
        }

        self.last_json = reply.faqs.clone();
        self.download_visible = true;

        let (sections, json_block) = match reply.faqs {
            Some(Value::Array(items)) => (
                items
                    .into_iter()
                    .map(|item| serde_json::from_value(item).unwrap_or_default())
                    .collect(),
                None,
            ),
            Some(other) => (
                Vec::new(),
                Some(serde_json::to_string_pretty(&other).unwrap_or_else(|_| other.to_string())),
            ),
            None => (Vec::new(), None),
        };

        RenderedReply {
            status: DONE_MESSAGE.to_string(),
            is_error: false,
            sections,
            raw: None,
            json_block,
            scraped_url: Some(format!("{}/scraped", self.client.base_url())),
        }
    }

    /// Write the last successful result to `dir` as pretty-printed
    /// `faqs.json`. Without a previous success there is nothing to write.
    pub fn save_to(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let Some(json) = self.last_json.as_ref().filter(|value| !value.is_null()) else {
            return Ok(None);
        };

        let path = dir.join(DOWNLOAD_FILE_NAME);
        std::fs::write(&path, serde_json::to_string_pretty(json)?)?;
        Ok(Some(path))
    }
}
