//! JWT token utilities for authentication.
//!
//! Provides token creation and validation for the account service. Keys are
//! built once from configuration at startup and shared through application
//! state rather than re-read from the environment per request.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::{ServiceError, ServiceResult};

/// JWT claims carried by an issued bearer token.
///
/// The claims identify the account that logged in but are not checked
/// against the resource a request targets; any valid token grants access to
/// the protected endpoints.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Account ID
    pub id: i64,
    /// Account email
    pub email: String,
    /// Account role
    pub peran: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from an explicit secret and lifetime.
    pub fn new(secret: &str, expires_in_seconds: u64) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds,
        }
    }

    /// Generate a new token for a logged-in account.
    pub fn generate_token(&self, id: i64, email: &str, peran: &str) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            id,
            email: email.to_string(),
            peran: peran.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a token.
    ///
    /// Expired tokens and tokens with an invalid signature are both rejected
    /// with the same authentication error.
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| ServiceError::auth("Token tidak valid!"))
    }
}
