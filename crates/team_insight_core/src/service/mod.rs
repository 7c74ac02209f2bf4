//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep FFI/CLI callers decoupled from storage details.

pub mod dashboard_service;
pub mod team_service;
