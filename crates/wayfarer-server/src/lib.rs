//! # Wayfarer Server Library
//!
//! Dependency wiring, logging bootstrap and the serve loop for the
//! Wayfarer binary.

pub mod app;
pub mod di;
pub mod startup;
pub mod telemetry;
