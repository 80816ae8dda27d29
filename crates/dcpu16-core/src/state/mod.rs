//! Architectural register model primitives.

/// Architectural register identifiers and decode helpers.
pub mod registers;

pub use registers::{Register, REGISTER_COUNT};
