//! Middleware for protecting authenticated routes.
//!
//! Validates the `Authorization: Bearer` header on every protected endpoint
//! in one place. Beyond token validity no further check is made: the decoded
//! claims are not matched against the resource a request targets. That weak
//! access model is part of the documented contract of this service.

use crate::AppState;
use crate::api::common::Message;
use axum::{
    Json,
    extract::{Extension, Request},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<Message>)> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| unauthorized("Token tidak ditemukan!"))?;

    // Check if it's a Bearer token
    if !auth_header.starts_with("Bearer ") {
        return Err(unauthorized("Token tidak ditemukan!"));
    }

    let token = &auth_header[7..]; // Remove "Bearer " prefix

    match state.jwt.validate_token(token) {
        Ok(claims) => {
            // Add claims to request extensions for use in handlers
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(_) => Err(unauthorized("Token tidak valid!")),
    }
}

fn unauthorized(message: &str) -> (StatusCode, Json<Message>) {
    (StatusCode::UNAUTHORIZED, Json(Message::new(message)))
}
