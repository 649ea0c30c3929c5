//! FlightTravel client entry point: probes the backend and lists featured blogs.

use std::process::ExitCode;

use client::config::ClientConfig;
use client::logging;
use client::services::api::ApiClient;
use client::services::site::{check_api_status, featured_blogs, ApiStatus};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let _guard = logging::init(&config);

    let api = match ApiClient::new(&config) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create API client");
            return ExitCode::FAILURE;
        }
    };

    match check_api_status(&api).await {
        ApiStatus::Online => println!("API online at {}", api.base_url()),
        ApiStatus::Offline { reason } => {
            println!("API offline: {}", reason);
            return ExitCode::FAILURE;
        }
    }

    let blogs = featured_blogs(&api, config.featured_count, config.featured_timeout).await;
    if blogs.is_empty() {
        println!("No featured blogs");
    }
    for blog in &blogs {
        let image = blog
            .featured_image_url(api.base_url())
            .map(|url| api.image_url(Some(&url)))
            .unwrap_or_else(|| api.image_url(None));
        println!("- {} [{}]", blog.title, image);
    }
    ExitCode::SUCCESS
}
