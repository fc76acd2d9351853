//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for short links.
///
/// Codes are unique at the storage level. A concurrent insert of the same code
/// surfaces as [`AppError::Conflict`] from [`LinkRepository::create`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code, expired or not.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Returns true if any link, expired or not, holds `code`.
    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Links that have not expired, newest first.
    async fn list_active(&self) -> Result<Vec<Link>, AppError>;

    /// Links that have not expired, most clicked first.
    async fn top_active(&self, limit: i64) -> Result<Vec<Link>, AppError>;

    /// Deletes every expired link and returns how many were removed.
    ///
    /// Their click records go with them.
    async fn delete_expired(&self) -> Result<u64, AppError>;

    /// Total number of stored links.
    async fn count(&self) -> Result<i64, AppError>;
}
