use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::services::PipelineError;

/// Application-level error type
#[derive(Debug)]
pub enum AppError {
    /// Signature verification failed at ingress
    Unauthorized(String),
    /// Payload decoded but is not a usable event
    Validation(String),
    /// Collaborator or configuration failure, fatal to the run
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
    meta: ErrorMeta,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[derive(Serialize)]
struct ErrorMeta {
    request_id: String,
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            error: ErrorBody {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
            meta: ErrorMeta {
                request_id: uuid::Uuid::new_v4().to_string(),
            },
        };

        match self {
            Self::Unauthorized(_) => HttpResponse::Unauthorized().json(error_response),
            Self::Validation(_) => HttpResponse::BadRequest().json(error_response),
            Self::Internal(_) => HttpResponse::InternalServerError().json(error_response),
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        Self::Internal(err.to_string())
    }
}
