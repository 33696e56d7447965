//! Database repository for account management operations.
//!
//! Provides CRUD operations for the `pengguna` table. Every method maps to a
//! single parameterized statement; no transactions are held across calls.

use crate::database::models::{Pengguna, PenggunaPublic};
use anyhow::Result;
use sqlx::SqlitePool;

/// Repository for account database operations.
pub struct PenggunaRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> PenggunaRepository<'a> {
    /// Creates a new PenggunaRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new account row. The id is assigned by the store.
    pub async fn insert(
        &self,
        nama: &str,
        email: &str,
        kata_sandi: &str,
        peran: &str,
    ) -> Result<()> {
        sqlx::query("INSERT INTO pengguna (nama, email, kata_sandi, peran) VALUES (?, ?, ?, ?)")
            .bind(nama)
            .bind(email)
            .bind(kata_sandi)
            .bind(peran)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Retrieves a full account row (including the password hash) by email.
    ///
    /// # Returns
    /// `Some(Pengguna)` if found, `None` otherwise
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Pengguna>> {
        let pengguna = sqlx::query_as::<_, Pengguna>(
            "SELECT id, nama, email, kata_sandi, peran FROM pengguna WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(pengguna)
    }

    /// Checks if an email is already registered.
    ///
    /// This check and the subsequent insert are not atomic; two concurrent
    /// registrations can both pass it. See the service layer for where this
    /// is flagged.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pengguna WHERE email = ?")
                .bind(email)
                .fetch_one(self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Retrieves all accounts without their password hashes.
    pub async fn list_all(&self) -> Result<Vec<PenggunaPublic>> {
        let pengguna = sqlx::query_as::<_, PenggunaPublic>(
            "SELECT id, nama, email, peran FROM pengguna",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(pengguna)
    }

    /// Retrieves a single account by id, without the password hash.
    ///
    /// # Returns
    /// `Some(PenggunaPublic)` if found, `None` otherwise
    pub async fn get_by_id(&self, id: i64) -> Result<Option<PenggunaPublic>> {
        let pengguna = sqlx::query_as::<_, PenggunaPublic>(
            "SELECT id, nama, email, peran FROM pengguna WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(pengguna)
    }

    /// Updates name, email and role for an account.
    ///
    /// # Returns
    /// The number of rows affected (0 when no account has this id)
    pub async fn update(&self, id: i64, nama: &str, email: &str, peran: &str) -> Result<u64> {
        let result =
            sqlx::query("UPDATE pengguna SET nama = ?, email = ?, peran = ? WHERE id = ?")
                .bind(nama)
                .bind(email)
                .bind(peran)
                .bind(id)
                .execute(self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    /// Deletes an account by id.
    ///
    /// # Returns
    /// The number of rows affected (0 when no account has this id)
    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM pengguna WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Retrieves id and stored credential for every account.
    ///
    /// Used only by the password-rehash migration pass.
    pub async fn list_credentials(&self) -> Result<Vec<(i64, String)>> {
        let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, kata_sandi FROM pengguna")
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Overwrites the stored credential for an account.
    pub async fn set_kata_sandi(&self, id: i64, kata_sandi: &str) -> Result<()> {
        sqlx::query("UPDATE pengguna SET kata_sandi = ? WHERE id = ?")
            .bind(kata_sandi)
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
