//! Handler functions for account management API endpoints.
//!
//! These functions process requests for account data behind the bearer-token
//! middleware, interact with the service layer, and return account-specific
//! information. The password hash never appears in any response.

use crate::AppState;
use crate::api::common::{Message, service_error_to_http};
use crate::database::models::{PenggunaPublic, UpdatePengguna};
use crate::services::pengguna_service::PenggunaService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::Json as ResponseJson,
};

/// Retrieves all accounts.
#[axum::debug_handler]
pub async fn list_pengguna(
    Extension(state): Extension<AppState>,
) -> Result<ResponseJson<Vec<PenggunaPublic>>, (StatusCode, ResponseJson<Message>)> {
    let service = PenggunaService::new(&state.pool);

    match service.list().await {
        Ok(pengguna) => Ok(ResponseJson(pengguna)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Retrieves an account by its ID.
#[axum::debug_handler]
pub async fn get_pengguna_by_id(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<ResponseJson<PenggunaPublic>, (StatusCode, ResponseJson<Message>)> {
    let service = PenggunaService::new(&state.pool);

    match service.get_required(id).await {
        Ok(pengguna) => Ok(ResponseJson(pengguna)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Updates an account's name, email and role.
#[axum::debug_handler]
pub async fn update_pengguna(
    Extension(claims): Extension<Claims>,
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePengguna>,
) -> Result<ResponseJson<Message>, (StatusCode, ResponseJson<Message>)> {
    tracing::info!("Updating pengguna {} requested by {}", id, claims.email);

    let service = PenggunaService::new(&state.pool);

    match service.update(id, payload).await {
        Ok(()) => Ok(ResponseJson(Message::new("Data pengguna berhasil diperbarui"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Deletes an account.
#[axum::debug_handler]
pub async fn delete_pengguna(
    Extension(claims): Extension<Claims>,
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<ResponseJson<Message>, (StatusCode, ResponseJson<Message>)> {
    tracing::info!("Deleting pengguna {} requested by {}", id, claims.email);

    let service = PenggunaService::new(&state.pool);

    match service.delete(id).await {
        Ok(()) => Ok(ResponseJson(Message::new("Pengguna berhasil dihapus"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
