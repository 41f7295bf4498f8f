//! Providers Module - External Data Sources
//!
//! The GraphQL execution seam, the Bitquery transport behind it, and the
//! query documents the fetchers send through it.

pub mod bitquery;
pub mod graphql;
pub mod queries;

pub use bitquery::*;
pub use graphql::*;
