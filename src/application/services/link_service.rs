//! Link creation, resolution and housekeeping.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::codegen::{CodeGenerator, CodeLookup};
use crate::domain::entities::{Link, NewLink};
use crate::domain::history::{HistoryEntry, UrlHistory};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Insert attempts when a concurrent writer claims the generated code first.
const MAX_WRITE_ATTEMPTS: usize = 3;

/// Number of links returned by [`LinkService::top_links`].
pub const TOP_LINKS_LIMIT: i64 = 10;

/// Service for creating and resolving shortened links.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    generator: CodeGenerator,
    history: Arc<UrlHistory>,
    base_url: String,
}

impl<L: LinkRepository> LinkService<L> {
    pub fn new(
        link_repository: Arc<L>,
        generator: CodeGenerator,
        history: Arc<UrlHistory>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            link_repository,
            generator,
            history,
            base_url: base_url.into(),
        }
    }

    /// Shortens `long_url`.
    ///
    /// The URL is stored as given. Repeated calls for the same URL produce
    /// distinct codes, since each earlier code makes its candidate taken.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty URL or an expiry in the past.
    /// Returns [`AppError::Conflict`] if no free code exists for the URL, or if
    /// every insert lost a race with a concurrent writer.
    pub async fn shorten(
        &self,
        long_url: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Link, AppError> {
        if long_url.is_empty() {
            return Err(AppError::bad_request(
                "URL must not be empty",
                json!({ "field": "url" }),
            ));
        }
        if let Some(expires_at) = expires_at {
            if expires_at <= Utc::now() {
                return Err(AppError::bad_request(
                    "Expiry must be in the future",
                    json!({ "expires_at": expires_at }),
                ));
            }
        }

        let lookup = RepositoryLookup(self.link_repository.as_ref());
        let mut last_conflict = None;

        for write_attempt in 1..=MAX_WRITE_ATTEMPTS {
            let generated = self.generator.generate(long_url, &lookup).await?;
            let strength = generated.strength();
            let new_link = NewLink {
                code: generated.into_code(),
                long_url: long_url.to_string(),
                strength,
                expires_at,
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    tracing::info!(code = %link.code, strength = strength.as_str(), "link created");
                    self.history.push(HistoryEntry::new(
                        link.long_url.clone(),
                        link.code.clone(),
                        link.strength,
                    ));
                    return Ok(link);
                }
                Err(e @ AppError::Conflict { .. }) => {
                    tracing::warn!(write_attempt, "code claimed concurrently, regenerating");
                    last_conflict = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_conflict.unwrap_or_else(|| {
            AppError::conflict("Failed to store short link", json!({}))
        }))
    }

    /// Looks up the link a visitor should be redirected to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code and [`AppError::Gone`]
    /// for an expired link.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        if link.is_expired() {
            return Err(AppError::gone(
                "Short link has expired",
                json!({ "code": code, "expired_at": link.expires_at }),
            ));
        }

        Ok(link)
    }

    pub async fn list_active(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_active().await
    }

    /// The most clicked links that have not expired.
    pub async fn top_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.top_active(TOP_LINKS_LIMIT).await
    }

    /// Removes expired links together with their click history.
    pub async fn delete_expired(&self) -> Result<u64, AppError> {
        let deleted = self.link_repository.delete_expired().await?;
        tracing::info!(deleted, "expired links removed");
        Ok(deleted)
    }

    /// Full short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}

struct RepositoryLookup<'a, L: ?Sized>(&'a L);

#[async_trait]
impl<'a, L: LinkRepository + ?Sized> CodeLookup for RepositoryLookup<'a, L> {
    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        self.0.exists_by_code(code).await
    }
}
