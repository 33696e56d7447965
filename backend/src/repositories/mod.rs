//! Module for database repositories.
//!
//! Repositories own all SQL issued by the application; services above them
//! never touch the pool directly for queries.

pub mod pengguna_repository;
