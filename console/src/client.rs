use anyhow::Result;
use faq_system::models::{GenerateReply, GenerateRequest, HealthReply};
use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Thin client for the FAQ backend.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The backend answers errors with a JSON body too, so the reply is
    /// decoded whatever the HTTP status was. Only transport or decode
    /// failures surface as `Err`.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateReply> {
        log::debug!("POST {}/generate", self.base_url);

        let reply = self
            .http
            .post(format!("{}/generate", self.base_url))
            .json(request)
            .send()
            .await?
            .json::<GenerateReply>()
            .await?;

        Ok(reply)
    }

    pub async fn health(&self) -> Result<HealthReply> {
        let reply = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?
            .json::<HealthReply>()
            .await?;

        Ok(reply)
    }
}
