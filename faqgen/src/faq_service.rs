use crate::gemini_service::GeminiService;
use crate::models::GenerateReply;
use crate::scrape_service::ScrapeService;
use anyhow::Result;
use reqwest::Client;
use serde_json::Value;

pub const MISSING_INPUT_ERROR: &str = "Provide `url` or `text`.";
pub const SCRAPED_PAGE_FILE: &str = "scraped_page.txt";

const MODEL_NOT_FOUND_HINT: &str =
    " (Model not found for this API key. Try setting OPENAI_MODEL to a model available to your key.)";

/// End-to-end FAQ pipeline: resolve page text, prompt Gemini, parse the
/// model output into a reply.
#[derive(Clone)]
pub struct FaqService {
    client: Client,
}

impl FaqService {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Every failure is folded into the reply, so callers only map `success`
    /// onto a status code.
    pub async fn generate(&self, url: Option<&str>, text: Option<&str>) -> GenerateReply {
        match self.try_generate(url, text).await {
            Ok(reply) => reply,
            Err(error) => GenerateReply::error(augment_model_error(error.to_string())),
        }
    }

    async fn try_generate(&self, url: Option<&str>, text: Option<&str>) -> Result<GenerateReply> {
        let url = url.filter(|value| !value.is_empty());
        let text = text.filter(|value| !value.is_empty());

        let page_text = match (text, url) {
            (Some(text), _) => text.to_string(),
            (None, Some(url)) => {
                log::info!("Scraping {url}");
                let scraper = ScrapeService::with_client(self.client.clone());
                scraper.scrape_text(url).await?
            }
            (None, None) => String::new(),
        };

        // An empty scrape result is treated the same as no input at all.
        if page_text.is_empty() {
            return Ok(GenerateReply::error(MISSING_INPUT_ERROR));
        }

        persist_scraped_text(&page_text);

        let prompt = build_prompt(url.unwrap_or("pasted_text"), &page_text);
        let gemini = GeminiService::with_client(self.client.clone())?;
        let output = gemini.generate(&prompt).await?;

        Ok(parse_model_output(&output))
    }
}

// Kept for inspection via the /scraped endpoint; losing it is not an error.
fn persist_scraped_text(page_text: &str) {
    if let Err(error) = std::fs::write(SCRAPED_PAGE_FILE, page_text) {
        log::warn!("Could not write {SCRAPED_PAGE_FILE}: {error}");
    }
}

pub fn build_prompt(source: &str, page_text: &str) -> String {
    format!(
        "You are given a website URL and the site's scraped text. \
         Produce EXACTLY valid JSON with a single top-level key `faqs` which is \
         an array of exactly 5 objects. Each object must have the keys `question` \
         and `answer`. Answers must be concise and based only on the provided text. \
         Do not add commentary, analysis, or any extra keys. Return only the JSON \
         object and nothing else. Return only JSON (no markdown/backticks).\n\n\
         URL:\n{source}\n\nPAGE_TEXT:\n{page_text}\n"
    )
}

/// The model is asked for `{"faqs": [...]}` but replies are taken as-is when
/// the shape differs: any other JSON value is served whole so the caller can
/// still see what came back.
pub fn parse_model_output(output: &str) -> GenerateReply {
    match serde_json::from_str::<Value>(output) {
        Ok(parsed) => {
            let faqs = parsed
                .as_object()
                .and_then(|object| object.get("faqs"))
                .cloned()
                .unwrap_or(parsed);
            GenerateReply::ok(faqs)
        }
        Err(_) => GenerateReply::error_with_raw("Model output was not valid JSON", output),
    }
}

/// A 404 naming `models/` means the configured model is unknown to this key;
/// point at the override knob instead of leaving a bare status line.
pub fn augment_model_error(message: String) -> String {
    if message.contains("404") && message.contains("models/") {
        message + MODEL_NOT_FOUND_HINT
    } else {
        message
    }
}
