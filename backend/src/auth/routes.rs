//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle account registration and login and are designed to be
//! merged into the main Axum router.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
