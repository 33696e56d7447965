//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::pengguna_repository::PenggunaRepository;
use crate::services::pengguna_service::PenggunaService;
use crate::utils::jwt::JwtUtils;
use crate::utils::require_field;
use sqlx::SqlitePool;

/// Default role assigned to accounts registered without one.
const DEFAULT_PERAN: &str = "pelamar";

/// Authentication service for handling registration, login and token issuance
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    jwt: &'a JwtUtils,
    pengguna_service: PenggunaService<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance with explicitly injected JWT keys
    pub fn new(pool: &'a SqlitePool, jwt: &'a JwtUtils) -> Self {
        let pengguna_service = PenggunaService::new(pool);

        AuthService {
            pool,
            jwt,
            pengguna_service,
        }
    }

    /// Registers a new account.
    ///
    /// The email must not already be registered. The check is a lookup
    /// before the insert, not a storage constraint, so two concurrent
    /// registrations with the same email can both pass it.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<()> {
        let nama = require_field(request.nama.as_deref(), "Semua field harus diisi!")?;
        let email = require_field(request.email.as_deref(), "Semua field harus diisi!")?;
        let kata_sandi = require_field(request.kata_sandi.as_deref(), "Semua field harus diisi!")?;

        let repo = PenggunaRepository::new(self.pool);
        if repo.email_exists(email).await? {
            return Err(ServiceError::already_exists("Email", email));
        }

        let hashed = PenggunaService::hash_password(kata_sandi)?;

        let peran = request
            .peran
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PERAN);

        repo.insert(nama, email, &hashed, peran).await?;

        tracing::info!("Registered new pengguna with email {}", email);
        Ok(())
    }

    /// Authenticates an account and issues a bearer token.
    ///
    /// The token encodes the account id, email and role and expires after
    /// the configured lifetime.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let email = require_field(request.email.as_deref(), "Email dan kata sandi harus diisi!")?;
        let kata_sandi =
            require_field(request.kata_sandi.as_deref(), "Email dan kata sandi harus diisi!")?;

        let pengguna = self.pengguna_service.authenticate(email, kata_sandi).await?;

        let token = self
            .jwt
            .generate_token(pengguna.id, &pengguna.email, &pengguna.peran)?;

        tracing::info!("Pengguna {} logged in", pengguna.id);

        Ok(LoginResponse {
            message: "Login berhasil".to_string(),
            token,
        })
    }
}
