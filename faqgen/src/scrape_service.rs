use anyhow::Result;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html};
use std::time::Duration;

// Mirrors what a human reader would see: markup stripped, one space between
// runs of text, capped so prompts stay within the model's context window.
pub const MAX_PAGE_CHARS: usize = 25_000;

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);
const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

pub struct ScrapeService {
    client: Client,
}

impl ScrapeService {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch a page and reduce it to plain text, truncated to
    /// [`MAX_PAGE_CHARS`] characters.
    pub async fn scrape_text(&self, url: &str) -> Result<String> {
        log::info!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let text = extract_text(&body);
        Ok(truncate_chars(&text, MAX_PAGE_CHARS).to_string())
    }
}

/// Visible text of an HTML document: script/style/noscript subtrees dropped,
/// every whitespace run collapsed to a single space.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);

    let re_whitespace = Regex::new(r"\s+").unwrap();
    re_whitespace.replace_all(&raw, " ").trim().to_string()
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    if SKIPPED_TAGS.contains(&element.value().name()) {
        return;
    }

    for node in element.children() {
        if let Some(text) = node.value().as_text() {
            out.push_str(&text.text);
            out.push(' ');
        } else if let Some(child) = ElementRef::wrap(node) {
            collect_text(child, out);
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
