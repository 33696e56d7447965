//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the `pengguna` table. Note that these may differ from API-specific
//! models: the stored password hash is only ever carried by the full row
//! model and never serialized into a response.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full account row, including the bcrypt hash in `kata_sandi`.
///
/// Only the login path reads this; everything returned to clients goes
/// through [`PenggunaPublic`].
#[derive(Debug, Clone, FromRow)]
pub struct Pengguna {
    pub id: i64,
    pub nama: String,
    pub email: String,
    pub kata_sandi: String,
    pub peran: String,
}

/// Account projection safe to return from the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PenggunaPublic {
    pub id: i64,
    pub nama: String,
    pub email: String,
    pub peran: String,
}

/// Update payload for `PUT /pengguna/{id}`.
///
/// All three fields are required; the password is deliberately not
/// updatable through this interface. Fields are optional at the serde level
/// so a missing field surfaces as a validation error rather than a
/// deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePengguna {
    pub nama: Option<String>,
    pub email: Option<String>,
    pub peran: Option<String>,
}
