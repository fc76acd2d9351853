//! Infrastructure layer: concrete implementations of domain contracts.
//!
//! - [`persistence`] - PostgreSQL repository implementations

pub mod persistence;
