//! DTOs for link shortening endpoint.

use crate::codegen::CodeStrength;
use crate::error::ErrorInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten one or more URLs.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 100, message = "Between 1 and 100 URLs per request"))]
    #[validate(nested)]
    pub urls: Vec<UrlItem>,
}

/// Individual URL to be shortened.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UrlItem {
    /// Stored exactly as sent; only emptiness is rejected.
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub url: String,

    /// After this time the link answers 410 Gone.
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub summary: BatchSummary,
    pub items: Vec<ShortenResultItem>,
}

/// Outcome for one URL of the batch, without a discriminator field.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ShortenResultItem {
    Success {
        long_url: String,
        code: String,
        short_url: String,
        strength: CodeStrength,
        #[serde(skip_serializing_if = "Option::is_none")]
        expires_at: Option<DateTime<Utc>>,
    },
    Error {
        long_url: String,
        error: ErrorInfo,
    },
}

#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}
