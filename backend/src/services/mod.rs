//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business
//! operations and orchestrate interactions between the API handlers and the
//! repositories underneath.

pub mod pengguna_service;
