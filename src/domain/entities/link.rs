//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

use crate::codegen::CodeStrength;

/// A stored mapping from a short code to a long URL.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    /// Hash the code was generated with; weak codes collide more often.
    pub strength: CodeStrength,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a link that has never been visited and never expires.
    pub fn new(
        id: i64,
        code: String,
        long_url: String,
        strength: CodeStrength,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            long_url,
            strength,
            click_count: 0,
            created_at,
            last_accessed_at: None,
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Returns true once `expires_at` has been reached.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub long_url: String,
    pub strength: CodeStrength,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link() -> Link {
        Link::new(
            1,
            "I13pXxnD".to_string(),
            "https://example.com/a/very/long/path".to_string(),
            CodeStrength::Strong,
            Utc::now(),
        )
    }

    #[test]
    fn test_new_link_defaults() {
        let link = link();

        assert_eq!(link.click_count, 0);
        assert!(link.last_accessed_at.is_none());
        assert!(link.expires_at.is_none());
        assert!(!link.is_expired());
    }

    #[test]
    fn test_link_expiry_boundary() {
        let now = Utc::now();
        let link = link().with_expiry(Some(now));

        assert!(link.is_expired_at(now));
        assert!(!link.is_expired_at(now - Duration::seconds(1)));
    }

    #[test]
    fn test_future_expiry_is_active() {
        let link = link().with_expiry(Some(Utc::now() + Duration::hours(1)));
        assert!(!link.is_expired());
    }
}
