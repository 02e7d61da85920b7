pub mod config;
pub mod faq_service;
pub mod gemini_service;
pub mod models;
pub mod scrape_service;

pub use models::*;
pub use faq_service::FaqService;
pub use gemini_service::GeminiService;
pub use scrape_service::ScrapeService;
