use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use faq_system::config;
use faq_system::faq_service::{MISSING_INPUT_ERROR, SCRAPED_PAGE_FILE};
use faq_system::models::{GenerateReply, GenerateRequest, HealthReply};
use faq_system::FaqService;
use serde_json::json;

const INDEX_FILE: &str = "static/index.html";

/// POST /generate. Malformed bodies count as empty so the response is always
/// this handler's own JSON, never a framework 415/422.
pub async fn generate(
    State(service): State<FaqService>,
    payload: Option<Json<GenerateRequest>>,
) -> (StatusCode, Json<GenerateReply>) {
    let request = payload.map(|Json(request)| request).unwrap_or_default();

    let url = request.url.as_deref().filter(|value| !value.is_empty());
    let text = request.text.as_deref().filter(|value| !value.is_empty());

    log::info!(
        "generate: url={}, text={} chars",
        url.unwrap_or("-"),
        text.map_or(0, str::len)
    );

    let reply = service.generate(url, text).await;

    let status = if reply.success {
        StatusCode::OK
    } else if reply.error.as_deref() == Some(MISSING_INPUT_ERROR) {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    };

    (status, Json(reply))
}

pub async fn health() -> Json<HealthReply> {
    Json(HealthReply {
        ok: true,
        has_key: config::get_api_key().is_some(),
        model: config::get_model_name(),
    })
}

/// The page text saved by the last generation, for inspection.
pub async fn scraped() -> (StatusCode, String) {
    match tokio::fs::read_to_string(SCRAPED_PAGE_FILE).await {
        Ok(text) => (StatusCode::OK, text),
        Err(_) => (StatusCode::NOT_FOUND, String::new()),
    }
}

pub async fn index() -> axum::response::Response {
    match tokio::fs::read_to_string(INDEX_FILE).await {
        Ok(page) => Html(page).into_response(),
        Err(_) => Json(json!({
            "success": true,
            "message": "Backend running. Open /static/index.html for UI."
        }))
        .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app;
    use serde_json::Value;

    async fn spawn_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app(FaqService::new())).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn generate_without_inputs_is_a_400() {
        let base = spawn_server().await;
        let response = reqwest::Client::new()
            .post(format!("{base}/generate"))
            .json(&json!({}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], Value::Bool(false));
        assert_eq!(body["error"], "Provide `url` or `text`.");
    }

    #[tokio::test]
    async fn generate_treats_empty_strings_as_missing() {
        let base = spawn_server().await;
        let response = reqwest::Client::new()
            .post(format!("{base}/generate"))
            .json(&json!({ "url": "", "text": "" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn generate_tolerates_a_non_json_body() {
        let base = spawn_server().await;
        let response = reqwest::Client::new()
            .post(format!("{base}/generate"))
            .header("content-type", "text/plain")
            .body("not json")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Provide `url` or `text`.");
    }

    #[tokio::test]
    async fn generate_maps_a_failed_scrape_to_502() {
        let base = spawn_server().await;
        // Nothing listens on port 1, so the scrape fails without leaving
        // the host.
        let response = reqwest::Client::new()
            .post(format!("{base}/generate"))
            .json(&json!({ "url": "http://127.0.0.1:1" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 502);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], Value::Bool(false));
        assert!(body["error"].as_str().is_some_and(|error| !error.is_empty()));
    }

    #[tokio::test]
    async fn health_reports_ok_and_a_model_name() {
        let base = spawn_server().await;
        let response = reqwest::Client::new()
            .get(format!("{base}/health"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["ok"], Value::Bool(true));
        assert!(body["model"].as_str().is_some_and(|model| !model.is_empty()));
    }

    #[tokio::test]
    async fn scraped_serves_the_saved_page_when_present() {
        let base = spawn_server().await;
        let client = reqwest::Client::new();

        std::fs::remove_file(SCRAPED_PAGE_FILE).ok();
        let missing = client.get(format!("{base}/scraped")).send().await.unwrap();
        assert_eq!(missing.status().as_u16(), 404);

        std::fs::write(SCRAPED_PAGE_FILE, "saved page text").unwrap();
        let found = client.get(format!("{base}/scraped")).send().await.unwrap();
        assert_eq!(found.status().as_u16(), 200);
        assert_eq!(found.text().await.unwrap(), "saved page text");

        std::fs::remove_file(SCRAPED_PAGE_FILE).ok();
    }

    #[tokio::test]
    async fn index_serves_the_form_page() {
        let base = spawn_server().await;
        let response = reqwest::Client::new()
            .get(format!("{base}/"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        let page = response.text().await.unwrap();
        assert!(page.contains("<form"));
    }
}
