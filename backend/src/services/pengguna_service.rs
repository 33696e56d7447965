//! Account business logic service.
//!
//! Handles all account-related business operations: credential hashing and
//! verification, lookups, updates, deletion, and the operator-invoked
//! password-rehash pass.

use crate::database::models::{Pengguna, PenggunaPublic, UpdatePengguna};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::pengguna_repository::PenggunaRepository;
use crate::utils::require_field;
use bcrypt::{DEFAULT_COST, hash, verify};
use sqlx::SqlitePool;

pub struct PenggunaService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> PenggunaService<'a> {
    /// Creates a new PenggunaService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Function to hash a password before storing in database
    ///
    /// # Errors
    /// Returns `ServiceError` if hashing fails
    pub fn hash_password(password: &str) -> ServiceResult<String> {
        hash(password, DEFAULT_COST)
            .map_err(|e| ServiceError::internal(format!("Password hashing failed: {}", e)))
    }

    /// Function to verify a password against the stored hash
    ///
    /// # Errors
    /// Returns `ServiceError` if the verification process itself fails; a
    /// plain mismatch is `Ok(false)`
    pub fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
        verify(password, hash)
            .map_err(|e| ServiceError::internal(format!("Password verification failed: {}", e)))
    }

    /// Authenticates an account by email and password.
    ///
    /// # Errors
    /// `NotFound` when no account has this email, `Auth` when the password
    /// does not match the stored hash.
    pub async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<Pengguna> {
        let repo = PenggunaRepository::new(self.pool);
        let pengguna = repo
            .get_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::not_found("Pengguna", email))?;

        if !Self::verify_password(password, &pengguna.kata_sandi)? {
            return Err(ServiceError::auth("Kata sandi salah!"));
        }

        Ok(pengguna)
    }

    /// Retrieves all accounts, without password hashes.
    pub async fn list(&self) -> ServiceResult<Vec<PenggunaPublic>> {
        let repo = PenggunaRepository::new(self.pool);
        let pengguna = repo.list_all().await?;
        Ok(pengguna)
    }

    /// Retrieves an account by ID with existence verification.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if the account doesn't exist
    pub async fn get_required(&self, id: i64) -> ServiceResult<PenggunaPublic> {
        let repo = PenggunaRepository::new(self.pool);
        let pengguna = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Pengguna", id.to_string()))?;
        Ok(pengguna)
    }

    /// Updates name, email and role for an account.
    ///
    /// The password cannot be changed through this operation and is left
    /// untouched. Existence is detected from the affected row count.
    pub async fn update(&self, id: i64, update: UpdatePengguna) -> ServiceResult<()> {
        let nama = require_field(update.nama.as_deref(), "Semua field harus diisi!")?;
        let email = require_field(update.email.as_deref(), "Semua field harus diisi!")?;
        let peran = require_field(update.peran.as_deref(), "Semua field harus diisi!")?;

        let repo = PenggunaRepository::new(self.pool);
        let affected = repo.update(id, nama, email, peran).await?;

        if affected == 0 {
            return Err(ServiceError::not_found("Pengguna", id.to_string()));
        }

        Ok(())
    }

    /// Deletes an account by ID.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let repo = PenggunaRepository::new(self.pool);
        let affected = repo.delete(id).await?;

        if affected == 0 {
            return Err(ServiceError::not_found("Pengguna", id.to_string()));
        }

        Ok(())
    }

    /// Rehashes every stored credential, unconditionally.
    ///
    /// Operator-invoked migration for stores that still contain plaintext
    /// passwords. The stored value is hashed as-is, whether or not it is
    /// already a bcrypt hash, so running this against an already-migrated
    /// store corrupts those credentials for login. This matches the observed
    /// behavior of the system being replaced; run it at most once.
    ///
    /// # Returns
    /// The number of rows rehashed.
    pub async fn rehash_all_passwords(&self) -> ServiceResult<usize> {
        let repo = PenggunaRepository::new(self.pool);
        let rows = repo.list_credentials().await?;
        let count = rows.len();

        for (id, kata_sandi) in rows {
            let hashed = Self::hash_password(&kata_sandi)?;
            repo.set_kata_sandi(id, &hashed).await?;
            tracing::info!("Credential for pengguna {} has been rehashed", id);
        }

        Ok(count)
    }
}
