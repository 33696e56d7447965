//! Main entry point for the pengguna account service.
//!
//! This file initializes the Axum web server, sets up the database
//! connection, and registers all API routes and middleware. Configuration is
//! loaded once here and injected into shared state; with the
//! `--rehash-passwords` argument the process runs the operator-invoked
//! credential migration instead of serving.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use serde_json::{Value, json};
use services::pengguna_service::PenggunaService;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;
use utils::jwt::JwtUtils;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub jwt: Arc<JwtUtils>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        AppState {
            pool,
            jwt: Arc::new(JwtUtils::new(
                &config.jwt_secret,
                config.jwt_expires_in_seconds,
            )),
        }
    }
}

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();
    let state = AppState::new(db.pool().clone(), &config);

    // Operator-invoked migration pass; any failure is fatal and nothing is
    // served. See PenggunaService::rehash_all_passwords for the caveats.
    if std::env::args().any(|arg| arg == "--rehash-passwords") {
        let service = PenggunaService::new(&state.pool);
        let rehashed = service.rehash_all_passwords().await.unwrap();
        info!("Rehashed {} stored credentials", rehashed);
        return;
    }

    let app = app(state);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!("Starting pengguna service on port {}", config.server_port);
    axum::serve(listener, app).await.unwrap();
}

/// Assembles the full application router.
fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::auth_router())
        .nest("/pengguna", api::pengguna::routes::pengguna_router())
        .layer(Extension(state))
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "Pengguna Account Service",
        "version": "0.1.0"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use sqlx::sqlite::SqlitePoolOptions;
    use crate::utils::jwt::Claims;
    use tower::ServiceExt;

    async fn test_state() -> AppState {
        // A single pooled connection keeps every query on the same
        // in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();

        AppState {
            pool,
            jwt: Arc::new(JwtUtils::new("test-secret", 3600)),
        }
    }

    async fn request(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn register_ana(app: &Router) {
        let (status, _) = request(
            app,
            "POST",
            "/register",
            None,
            Some(json!({"nama": "Ana", "email": "ana@x.com", "kata_sandi": "pw123"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    async fn login_ana(app: &Router) -> String {
        let (status, body) = request(
            app,
            "POST",
            "/login",
            None,
            Some(json!({"email": "ana@x.com", "kata_sandi": "pw123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    async fn id_by_email(pool: &SqlitePool, email: &str) -> i64 {
        sqlx::query_scalar("SELECT id FROM pengguna WHERE email = ?")
            .bind(email)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn register_creates_account_with_hashed_password() {
        let state = test_state().await;
        let app = app(state.clone());

        register_ana(&app).await;

        let stored: String = sqlx::query_scalar("SELECT kata_sandi FROM pengguna WHERE email = ?")
            .bind("ana@x.com")
            .fetch_one(&state.pool)
            .await
            .unwrap();
        assert_ne!(stored, "pw123");
        assert!(stored.starts_with("$2"));

        let peran: String = sqlx::query_scalar("SELECT peran FROM pengguna WHERE email = ?")
            .bind("ana@x.com")
            .fetch_one(&state.pool)
            .await
            .unwrap();
        assert_eq!(peran, "pelamar");
    }

    #[tokio::test]
    async fn register_rejects_missing_fields() {
        let state = test_state().await;
        let app = app(state);

        let (status, body) = request(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"nama": "Ana", "email": "ana@x.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Semua field harus diisi!");

        // An empty field counts as missing, same as the contract.
        let (status, _) = request(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"nama": "", "email": "ana@x.com", "kata_sandi": "pw123"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let state = test_state().await;
        let app = app(state.clone());

        register_ana(&app).await;

        let (status, body) = request(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"nama": "Ana Lain", "email": "ana@x.com", "kata_sandi": "pw456"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email sudah digunakan!");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pengguna WHERE email = ?")
            .bind("ana@x.com")
            .fetch_one(&state.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn login_issues_token_with_account_claims() {
        let state = test_state().await;
        let app = app(state.clone());

        register_ana(&app).await;
        let token = login_ana(&app).await;

        let claims = state.jwt.validate_token(&token).unwrap();
        assert_eq!(claims.id, id_by_email(&state.pool, "ana@x.com").await);
        assert_eq!(claims.email, "ana@x.com");
        assert_eq!(claims.peran, "pelamar");
    }

    #[tokio::test]
    async fn login_failures_map_to_documented_statuses() {
        let state = test_state().await;
        let app = app(state);

        register_ana(&app).await;

        let (status, body) = request(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({"email": "ana@x.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email dan kata sandi harus diisi!");

        let (status, body) = request(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({"email": "nobody@x.com", "kata_sandi": "pw123"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Pengguna tidak ditemukan!");

        let (status, body) = request(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({"email": "ana@x.com", "kata_sandi": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Kata sandi salah!");
    }

    #[tokio::test]
    async fn protected_routes_reject_missing_or_invalid_tokens() {
        let state = test_state().await;
        let app = app(state);

        // No Authorization header.
        let (status, body) = request(&app, "GET", "/pengguna", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Token tidak ditemukan!");

        // Non-Bearer scheme.
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/pengguna")
                    .header(header::AUTHORIZATION, "Token abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Garbage token.
        let (status, body) =
            request(&app, "GET", "/pengguna", Some("not-a-real-token"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Token tidak valid!");
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let state = test_state().await;
        let app = app(state);

        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            id: 1,
            email: "ana@x.com".to_string(),
            peran: "pelamar".to_string(),
            exp: (now - 3600) as usize,
            iat: (now - 7200) as usize,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let (status, _) = request(&app, "GET", "/pengguna", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn list_and_get_return_accounts_without_password() {
        let state = test_state().await;
        let app = app(state.clone());

        register_ana(&app).await;
        let token = login_ana(&app).await;
        let id = id_by_email(&state.pool, "ana@x.com").await;

        let (status, body) = request(&app, "GET", "/pengguna", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let accounts = body.as_array().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0]["nama"], "Ana");
        assert_eq!(accounts[0]["email"], "ana@x.com");
        assert!(accounts[0].get("kata_sandi").is_none());

        let (status, body) =
            request(&app, "GET", &format!("/pengguna/{}", id), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id);
        assert_eq!(body["nama"], "Ana");
        assert!(body.get("kata_sandi").is_none());

        let (status, body) = request(
            &app,
            "GET",
            &format!("/pengguna/{}", id + 1000),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Pengguna tidak ditemukan!");
    }

    #[tokio::test]
    async fn update_changes_fields_but_not_password() {
        let state = test_state().await;
        let app = app(state.clone());

        register_ana(&app).await;
        let token = login_ana(&app).await;
        let id = id_by_email(&state.pool, "ana@x.com").await;

        let (status, _) = request(
            &app,
            "PUT",
            &format!("/pengguna/{}", id),
            Some(&token),
            Some(json!({"nama": "Ana Baru", "email": "ana@x.com", "peran": "konsultan"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) =
            request(&app, "GET", &format!("/pengguna/{}", id), Some(&token), None).await;
        assert_eq!(body["nama"], "Ana Baru");
        assert_eq!(body["peran"], "konsultan");

        // The password is untouched by an update, so the old one still works.
        login_ana(&app).await;

        let (status, _) = request(
            &app,
            "PUT",
            &format!("/pengguna/{}", id + 1000),
            Some(&token),
            Some(json!({"nama": "X", "email": "x@x.com", "peran": "pelamar"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_removes_account() {
        let state = test_state().await;
        let app = app(state.clone());

        register_ana(&app).await;
        let token = login_ana(&app).await;
        let id = id_by_email(&state.pool, "ana@x.com").await;

        let (status, body) =
            request(&app, "DELETE", &format!("/pengguna/{}", id), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Pengguna berhasil dihapus");

        let (status, _) =
            request(&app, "GET", &format!("/pengguna/{}", id), Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) =
            request(&app, "DELETE", &format!("/pengguna/{}", id), Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn email_uniqueness_is_application_level_only() {
        // The duplicate check is a lookup before the insert, so two
        // concurrent registrations with the same email can both succeed.
        // This test pins that the schema does not quietly close the race
        // with a unique index; adding one would be a contract change.
        let state = test_state().await;

        let indexes: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pragma_index_list('pengguna')")
                .fetch_one(&state.pool)
                .await
                .unwrap();
        assert_eq!(indexes, 0);
    }
}
