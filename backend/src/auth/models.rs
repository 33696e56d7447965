//! Data structures for authentication-related entities.
//!
//! Request and response payloads for the registration and login endpoints.
//! Required fields are optional at the serde level so that a missing or
//! empty field surfaces as a validation error with a JSON body instead of a
//! deserialization rejection.

use serde::{Deserialize, Serialize};

/// Registration request payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub nama: Option<String>,
    pub email: Option<String>,
    pub kata_sandi: Option<String>,
    /// Defaults to "pelamar" (applicant) when absent or empty.
    pub peran: Option<String>,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub kata_sandi: Option<String>,
}

/// Login response containing the bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}
