//! # Wayfarer REST
//!
//! HTTP surface for Wayfarer: authentication, owner-scoped itinerary
//! endpoints, the public share link, and health checks.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
