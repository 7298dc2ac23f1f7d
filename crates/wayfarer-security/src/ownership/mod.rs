//! Ownership-based authorization.

mod gate;

pub use gate::*;
