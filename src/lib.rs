use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, LogLevel};

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod global_state;
pub mod infrastructure;
pub mod macros;

/// Entry point: logging, page config, then mount the dashboard
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let page_config = config::DashboardConfig::from_page();
    let config = page_config.clone().unwrap_or_default();

    let console_level = if config.debug_logging || cfg!(debug_assertions) {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));
    domain::logging::init_logger(Box::new(domain::logging::TeeLogger::new(vec![
        Box::new(infrastructure::services::ConsoleLogger::new(console_level)),
        Box::new(app::LeptosLogger),
    ])));

    if let Err(e) = page_config {
        log_warn!(LogComponent::Presentation("Initialize"), "ignoring page config: {}", e);
    }
    if config.require_api_key().is_err() {
        log_warn!(
            LogComponent::Presentation("Initialize"),
            "⚠️ DATA_API_KEY is not set; requests will fail"
        );
    }

    gloo::utils::document().set_title(&config.page_title);
    log_info!(LogComponent::Presentation("Initialize"), "🚀 Mounting {}", config.page_title);

    leptos::mount_to_body(move || leptos::view! { <app::App config=config.clone() /> });
}
