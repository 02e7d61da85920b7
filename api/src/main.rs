mod handlers;

use axum::http::Method;
use axum::{
    routing::{get, post},
    Router,
};
use faq_system::FaqService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::handlers::{generate, health, index, scraped};

fn app(service: FaqService) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/scraped", get(scraped))
        .route("/generate", post(generate))
        .nest_service("/static", ServeDir::new("static"))
        .layer(cors)
        .with_state(service)
}

/// First bindable port among the preferred one and the usual fallbacks.
fn pick_port(preferred: u16) -> u16 {
    for candidate in [preferred, 5001, 5050, 8000] {
        if std::net::TcpListener::bind(("127.0.0.1", candidate)).is_ok() {
            return candidate;
        }
    }
    preferred
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let preferred = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(5000);
    let port = pick_port(preferred);

    let app = app(FaqService::new());

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .unwrap();
    println!("Listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
