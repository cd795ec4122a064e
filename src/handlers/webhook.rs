//! Webhook handlers
//!
//! Ingress for platform change-notification events. The POST handler
//! takes the raw body bytes so signature verification runs over exactly
//! what arrived on the wire, before any JSON decoding.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use tracing::{error, info};

use crate::error::AppError;
use crate::models::{ProcessedEvent, WebhookPayload};
use crate::services::{ReviewPipeline, SignatureVerifier};
use crate::AppState;

const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

/// Standard API response wrapper
#[derive(Serialize)]
struct ApiResponse<T: Serialize> {
    data: T,
    meta: ResponseMeta,
}

#[derive(Serialize)]
struct ResponseMeta {
    request_id: String,
}

impl<T: Serialize> ApiResponse<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            meta: ResponseMeta {
                request_id: uuid::Uuid::new_v4().to_string(),
            },
        }
    }
}

pub fn configure_webhook_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/webhook/github")
            .route(web::get().to(webhook_status))
            .route(web::post().to(receive_github_event)),
    );
}

/// GET /webhook/github
///
/// Static status page for checking the endpoint is reachable.
pub async fn webhook_status() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(STATUS_PAGE)
}

/// POST /webhook/github
///
/// Verifies the delivery signature over the raw bytes, decodes the
/// event, and runs the review pipeline for opened/synchronize pull
/// request events. Everything else is acknowledged as a no-op.
pub async fn receive_github_event(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let verifier = SignatureVerifier::new(state.config.webhook_secret.clone());
    if !verifier.verify(&body, signature) {
        return Err(AppError::Unauthorized("invalid webhook signature".to_string()));
    }

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("malformed webhook payload: {e}")))?;

    info!(
        action = %payload.action,
        repository = %payload.repository.full_name,
        "received webhook event"
    );

    let review_requested = matches!(payload.action.as_str(), "opened" | "synchronize");
    let Some(pull_request) = payload.pull_request.filter(|_| review_requested) else {
        return Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Event acknowledged, no review required"
        })));
    };

    info!(
        pull_number = pull_request.number,
        title = %pull_request.title,
        head = %pull_request.head.sha,
        "processing pull request event"
    );

    let platform = state
        .platform
        .clone()
        .ok_or_else(|| AppError::Internal("GITHUB_TOKEN not configured".to_string()))?;
    let completion = state
        .completion
        .clone()
        .ok_or_else(|| AppError::Internal("ANTHROPIC_API_KEY not configured".to_string()))?;

    let pipeline = ReviewPipeline::new(platform, completion);
    let outcome = pipeline
        .run(
            &payload.repository.owner.login,
            &payload.repository.name,
            pull_request.number,
        )
        .await
        .map_err(|e| {
            error!(pull_number = pull_request.number, error = %e, "review pipeline failed");
            AppError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(ProcessedEvent {
        pull_number: pull_request.number,
        files_analyzed: outcome.files_analyzed,
        issues_detected: outcome.issues_detected,
        overall_score: outcome.review.overall_score,
        comments_posted: outcome.review.comments.len(),
    })))
}

const STATUS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Webhook Status</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 40px; background-color: #f5f5f5; }
    .container { background: white; padding: 30px; border-radius: 8px; }
    .status { color: #28a745; font-weight: bold; }
  </style>
</head>
<body>
  <div class="container">
    <h1>AI Code Reviewer</h1>
    <p class="status">Webhook endpoint is active</p>
    <p><strong>Expected method:</strong> POST</p>
    <p><strong>Webhook URL:</strong> <code>/webhook/github</code></p>
  </div>
</body>
</html>
"#;
