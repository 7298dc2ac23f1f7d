//! # Wayfarer Repository
//!
//! Durable stores behind the service layer:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn ItineraryRepository>
//! MySqlUserRepository / MySqlItineraryRepository   (SQLx)
//!   ↓
//! MySQL
//! ```
//!
//! The [`memory`] module provides in-process stores with the same
//! uniqueness guarantees, used for local runs and tests.

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use memory::*;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
