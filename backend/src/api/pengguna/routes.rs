//! Defines the HTTP routes for account management.
//!
//! All routes here require a valid bearer token; the `jwt_auth` middleware
//! is applied to the whole router rather than per route.

use super::handlers::{delete_pengguna, get_pengguna_by_id, list_pengguna, update_pengguna};
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::get,
};

pub fn pengguna_router() -> Router {
    Router::new()
        .route("/", get(list_pengguna))
        .route(
            "/{id}",
            get(get_pengguna_by_id)
                .put(update_pengguna)
                .delete(delete_pengguna),
        )
        .layer(middleware::from_fn(jwt_auth))
}
