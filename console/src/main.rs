mod client;
mod form;

use client::ApiClient;
use form::FormSession;
use std::io::Write;

#[tokio::main]
async fn main() {
    env_logger::init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| client::DEFAULT_BASE_URL.to_string());
    let client = ApiClient::with_base_url(base_url);

    match client.health().await {
        Ok(health) => println!(
            "Backend at {} is up (model {}, key {})",
            client.base_url(),
            health.model,
            if health.has_key { "set" } else { "missing" },
        ),
        Err(error) => println!("Backend at {} is unreachable: {error}", client.base_url()),
    }

    let mut session = FormSession::new(client);

    loop {
        println!();
        let Some(url) = read_line("Website URL (Enter to skip): ") else {
            break;
        };
        let Some(text) = read_line("Page text (Enter to skip): ") else {
            break;
        };

        if form::build_payload(&url, &text).is_some() {
            println!("{}", form::GENERATING_MESSAGE);
        }
        let rendered = session.submit(&url, &text).await;
        print_rendered(&rendered);

        if session.download_visible() {
            let Some(answer) = read_line("Save faqs.json here? [y/N]: ") else {
                break;
            };
            if answer.eq_ignore_ascii_case("y") {
                match session.save_to(std::path::Path::new(".")) {
                    Ok(Some(path)) => println!("Saved {}", path.display()),
                    Ok(None) => println!("Nothing to save yet."),
                    Err(error) => println!("Could not save: {error}"),
                }
            }
        }

        let Some(again) = read_line("Press Enter for another round, or q to quit: ") else {
            break;
        };
        if again.eq_ignore_ascii_case("q") {
            break;
        }
    }
}

fn print_rendered(rendered: &form::RenderedReply) {
    if rendered.is_error {
        eprintln!("{}", rendered.status);
    } else {
        println!("{}", rendered.status);
    }
    for entry in &rendered.sections {
        println!();
        println!("Q: {}", entry.question);
        println!("A: {}", entry.answer);
    }
    if let Some(block) = &rendered.json_block {
        println!("{block}");
    }
    if let Some(raw) = &rendered.raw {
        println!("{raw}");
    }
    if let Some(link) = &rendered.scraped_url {
        println!("View scraped text: {link}");
    }
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    match std::io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}
