//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the account management
//! endpoints, excluding the registration and login routes which are handled
//! separately by the auth module.

pub mod common;
pub mod pengguna;
