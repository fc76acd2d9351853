//! Data Transfer Objects for API requests and responses.
//!
//! Requests are validated with `validator`; responses are plain `Serialize`
//! structs built from domain entities.

pub mod analytics;
pub mod clicks;
pub mod health;
pub mod history;
pub mod links;
pub mod pagination;
pub mod shorten;
