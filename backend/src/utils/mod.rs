//! Collection of general utility functions and common traits.
//!
//! This module serves as a repository for small, reusable helper functions
//! that do not fit into other specific domain modules.

use crate::errors::{ServiceError, ServiceResult};

pub mod jwt;

/// Returns the field value when it is present and non-empty.
///
/// Mirrors the request contract where an absent field and an empty string
/// are both treated as "not supplied".
pub fn require_field<'a>(value: Option<&'a str>, message: &str) -> ServiceResult<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ServiceError::validation(message)),
    }
}
