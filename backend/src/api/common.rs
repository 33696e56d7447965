//! Error handling utilities for API responses.
//!
//! Provides the shared `{message}` response body and the conversion from
//! service-layer errors to HTTP responses.
//!
//! # Error Handling Flow
//! 1. Service layer returns a domain-specific `ServiceError`
//! 2. `service_error_to_http` converts it to a status code and JSON body
//! 3. Unexpected database or crypto failures collapse to a 500 without
//!    leaking their cause to the client
//!
//! Note that a duplicate email maps to 400, not 409; that status is part of
//! the documented contract of this service.

use crate::errors::ServiceError;
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Plain message body used for confirmations and all error responses
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Converts ServiceError to the appropriate HTTP response
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, Json<Message>) {
    let (status, message) = match error {
        ServiceError::Validation { message } => (StatusCode::BAD_REQUEST, message),
        ServiceError::NotFound { entity, .. } => (
            StatusCode::NOT_FOUND,
            format!("{} tidak ditemukan!", entity),
        ),
        ServiceError::AlreadyExists { entity, .. } => (
            StatusCode::BAD_REQUEST,
            format!("{} sudah digunakan!", entity),
        ),
        ServiceError::Auth { message } => (StatusCode::UNAUTHORIZED, message),
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            )
        }
        ServiceError::Internal { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            )
        }
    };

    (status, Json(Message::new(message)))
}
