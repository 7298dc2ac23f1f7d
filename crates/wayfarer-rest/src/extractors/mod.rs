//! Custom Axum extractors.

mod claims;
mod path;
mod validated;

pub use claims::*;
pub use path::*;
pub use validated::*;
