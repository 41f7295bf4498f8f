//! Utils Module - Shared constants and helpers

pub mod constants;
pub mod lenient;

pub use constants::*;
