//! Authentication module for account registration, login, and access control.
//!
//! This module provides the public interface for authentication-related
//! functionality: registration, login, token issuance, and the bearer-token
//! middleware protecting the account endpoints.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
