use faq_system::faq_service::SCRAPED_PAGE_FILE;
use faq_system::ScrapeService;
use std::path::Path;

const DEFAULT_URL: &str = "https://abdelhamidsaidi.com";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_URL.to_string());

    println!("Fetching {url}...");
    let page_text = ScrapeService::new().scrape_text(&url).await?;

    if Path::new(SCRAPED_PAGE_FILE).exists() {
        std::fs::remove_file(SCRAPED_PAGE_FILE)?;
        println!("Existing file {SCRAPED_PAGE_FILE} removed.");
    }

    let save_path = std::env::current_dir()?.join(SCRAPED_PAGE_FILE);
    match std::fs::write(&save_path, &page_text) {
        Ok(()) => println!("Saved scraped text to {}", save_path.display()),
        Err(error) => {
            println!("Failed to save scraped text: {error}");
            println!("Scraped text output below:");
            println!("{}", page_text.chars().take(1000).collect::<String>());
        }
    }

    Ok(())
}
