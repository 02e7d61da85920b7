use anyhow::Result;
use faq_system::config;
use faq_system::faq_service::build_prompt;
use faq_system::{GeminiService, ScrapeService};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::exit;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let input = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => prompt_for_input(),
    };
    if input.is_empty() {
        println!("ERROR: No input provided.");
        exit(1);
    }

    // A `.txt` path is read directly; anything else is treated as a URL.
    let (input_file, url) = classify_input(&input);

    if config::get_api_key().is_none() {
        println!("ERROR: Please set GEMINI_API_KEY or GOOGLE_API_KEY environment variable.");
        exit(1);
    }
    println!("Using model: {}", config::get_model_name());

    let page_text = match &input_file {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => {
                println!("Loaded text from {}", path.display());
                text
            }
            Err(error) => {
                println!("Failed to read input file {}: {}", path.display(), error);
                exit(1);
            }
        },
        None => {
            println!("Fetching and scraping {url}...");
            match ScrapeService::new().scrape_text(&url).await {
                Ok(text) => text,
                Err(error) => {
                    println!("Failed to fetch/scrape the URL: {error}");
                    exit(1);
                }
            }
        }
    };

    let prompt = build_prompt(&url, &page_text);

    println!("Querying Gemini for 5 FAQs (JSON)...");
    let output = match generate(&prompt).await {
        Ok(output) => output,
        Err(error) => {
            println!("Gemini API request failed: {error}");
            exit(1);
        }
    };

    match serde_json::from_str::<Value>(&output) {
        Ok(parsed) => {
            let pretty = serde_json::to_string_pretty(&parsed).unwrap_or(output);
            println!("{pretty}");
        }
        Err(_) => {
            println!("Warning: model output was not valid JSON. Raw output below:\n");
            println!("{output}");
        }
    }
}

async fn generate(prompt: &str) -> Result<String> {
    let gemini = GeminiService::new()?;
    gemini.generate(prompt).await
}

fn classify_input(input: &str) -> (Option<PathBuf>, String) {
    let path = Path::new(input);
    if path.is_file() && input.to_lowercase().ends_with(".txt") {
        let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        (
            Some(path.to_path_buf()),
            format!("file://{}", absolute.display()),
        )
    } else {
        (None, input.to_string())
    }
}

fn prompt_for_input() -> String {
    print!("Enter website URL (or path to .txt file): ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
    line.trim().to_string()
}
