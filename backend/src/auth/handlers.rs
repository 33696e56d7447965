//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for registration and
//! login, parse request data, and interact with the `auth::service` for the
//! core business logic.

use crate::AppState;
use crate::api::common::{Message, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};

/// Handle account registration request
#[axum::debug_handler]
pub async fn register(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, ResponseJson<Message>), (StatusCode, ResponseJson<Message>)> {
    let auth_service = AuthService::new(&state.pool, &state.jwt);

    match auth_service.register(payload).await {
        Ok(()) => Ok((
            StatusCode::CREATED,
            ResponseJson(Message::new("Pengguna berhasil didaftarkan")),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle account login request
#[axum::debug_handler]
pub async fn login(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<LoginResponse>, (StatusCode, ResponseJson<Message>)> {
    let auth_service = AuthService::new(&state.pool, &state.jwt);

    match auth_service.login(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}
