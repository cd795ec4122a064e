use std::sync::Arc;

use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reviewbot::services::{ClaudeClient, CompletionClient, GithubClient, PlatformClient};
use reviewbot::{handlers, AppState, Config};

/// Service banner endpoint
async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "AI Code Reviewer API",
        "status": "running",
        "endpoints": ["/health", "/webhook/github"]
    }))
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reviewbot=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    info!("Starting review server on {}:{}", config.host, config.port);

    if config.webhook_secret.is_none() {
        warn!("GITHUB_WEBHOOK_SECRET not configured; all webhook deliveries will be rejected");
    }

    // Collaborators are optional at boot: runs needing a missing one fail
    let platform: Option<Arc<dyn PlatformClient>> = match &config.github_token {
        Some(token) => Some(Arc::new(GithubClient::new(token.clone()))),
        None => {
            warn!("GITHUB_TOKEN not configured; review runs will fail until it is set");
            None
        }
    };

    let completion: Option<Arc<dyn CompletionClient>> = match &config.anthropic_api_key {
        Some(key) => Some(Arc::new(ClaudeClient::new(
            key.clone(),
            config.review_model.clone(),
            config.review_max_tokens,
        ))),
        None => {
            warn!("ANTHROPIC_API_KEY not configured; review runs will fail until it is set");
            None
        }
    };

    let server_addr = format!("{}:{}", config.host, config.port);

    let app_state = web::Data::new(AppState {
        config,
        platform,
        completion,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .route("/", web::get().to(index))
            .route("/health", web::get().to(health_check))
            .configure(handlers::configure_webhook_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}
