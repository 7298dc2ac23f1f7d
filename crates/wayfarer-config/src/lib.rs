//! # Wayfarer Config
//!
//! Configuration management for Wayfarer.
//! Supports layered configuration from files and environment variables,
//! validated once at start-up.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
