//! Short-code generation.
//!
//! A code is the base-62 encoding of a hash of the long URL. The first eight
//! candidates come from a SHA-256 prefix; if all of them are taken, or the
//! strong hash is switched off, a 32-bit string hash is used instead and the
//! result is tagged as a weak fallback.
//!
//! ```rust,ignore
//! let generator = CodeGenerator::new(HashMode::Strong);
//! match generator.generate(&long_url, &lookup).await? {
//!     GeneratedCode::Strong(code) => save(code, CodeStrength::Strong),
//!     GeneratedCode::WeakFallback(code) => save(code, CodeStrength::Weak),
//! }
//! ```

pub mod base62;
pub mod digest;
pub mod generator;

pub use generator::{
    CodeGenerator, CodeLookup, CodeStrength, GeneratedCode, HashMode, MAX_ATTEMPTS, Probe,
};

#[cfg(test)]
pub use generator::MockCodeLookup;

use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("long URL must not be empty")]
    InvalidInput,
    #[error("strong hash primitive is unavailable")]
    PrimitiveUnavailable,
    #[error("all {attempts} candidate codes are taken")]
    Exhausted { attempts: u32 },
    #[error("existence lookup failed: {0}")]
    Lookup(#[source] Box<AppError>),
}
