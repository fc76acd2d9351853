//! Bounded, collision-aware short-code generation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CodegenError, base62, digest};
use crate::error::AppError;

/// Attempts per hash before the path is considered exhausted.
pub const MAX_ATTEMPTS: u32 = 8;

/// Answers whether a candidate code is already assigned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeLookup: Send + Sync {
    async fn code_exists(&self, code: &str) -> Result<bool, AppError>;
}

/// Hash used for the primary path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashMode {
    /// SHA-256 prefix, weak hash only after exhaustion.
    #[default]
    Strong,
    /// Strong primitive unavailable; every code comes from the weak hash.
    WeakOnly,
}

impl std::str::FromStr for HashMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "strong" => Ok(HashMode::Strong),
            "weak" => Ok(HashMode::WeakOnly),
            other => Err(format!("unknown hash mode '{other}', expected sha256 or weak")),
        }
    }
}

/// Guarantee level a code was produced under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeStrength {
    Strong,
    Weak,
}

impl CodeStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeStrength::Strong => "strong",
            CodeStrength::Weak => "weak",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "strong" => Some(CodeStrength::Strong),
            "weak" => Some(CodeStrength::Weak),
            _ => None,
        }
    }
}

/// A free code, tagged with the hash that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedCode {
    Strong(String),
    WeakFallback(String),
}

impl GeneratedCode {
    pub fn code(&self) -> &str {
        match self {
            GeneratedCode::Strong(code) | GeneratedCode::WeakFallback(code) => code,
        }
    }

    pub fn strength(&self) -> CodeStrength {
        match self {
            GeneratedCode::Strong(_) => CodeStrength::Strong,
            GeneratedCode::WeakFallback(_) => CodeStrength::Weak,
        }
    }

    pub fn into_code(self) -> String {
        match self {
            GeneratedCode::Strong(code) | GeneratedCode::WeakFallback(code) => code,
        }
    }
}

/// Outcome of one bounded probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Free { code: String, attempt: u32 },
    Exhausted,
}

/// Stateless code generator. Cheap to clone and share between tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeGenerator {
    mode: HashMode,
}

impl CodeGenerator {
    pub fn new(mode: HashMode) -> Self {
        if mode == HashMode::WeakOnly {
            tracing::warn!(
                "strong hash disabled, running in degraded mode: all codes use the 32-bit fallback hash"
            );
        }
        Self { mode }
    }

    pub fn mode(&self) -> HashMode {
        self.mode
    }

    /// Candidate code from the SHA-256 path for `attempt`.
    pub fn strong_candidate(&self, long_url: &str, attempt: u32) -> Result<String, CodegenError> {
        match self.mode {
            HashMode::Strong => {
                let input = digest::digest_input(long_url, attempt);
                Ok(base62::encode(digest::strong_value(&input)))
            }
            HashMode::WeakOnly => Err(CodegenError::PrimitiveUnavailable),
        }
    }

    /// Candidate code from the 32-bit fallback hash for `attempt`.
    pub fn weak_candidate(&self, long_url: &str, attempt: u32) -> String {
        let input = digest::digest_input(long_url, attempt);
        base62::encode(digest::weak_value(&input))
    }

    /// Tries strong candidates 0..MAX_ATTEMPTS, stopping at the first free one.
    pub async fn probe_strong<L>(&self, long_url: &str, lookup: &L) -> Result<Probe, CodegenError>
    where
        L: CodeLookup + ?Sized,
    {
        for attempt in 0..MAX_ATTEMPTS {
            let code = self.strong_candidate(long_url, attempt)?;
            if !Self::taken(lookup, &code).await? {
                return Ok(Probe::Free { code, attempt });
            }
            tracing::debug!(attempt, code = %code, "strong candidate taken");
        }
        Ok(Probe::Exhausted)
    }

    /// Same bounded loop over the weak hash.
    pub async fn probe_weak<L>(&self, long_url: &str, lookup: &L) -> Result<Probe, CodegenError>
    where
        L: CodeLookup + ?Sized,
    {
        for attempt in 0..MAX_ATTEMPTS {
            let code = self.weak_candidate(long_url, attempt);
            if !Self::taken(lookup, &code).await? {
                return Ok(Probe::Free { code, attempt });
            }
            tracing::debug!(attempt, code = %code, "weak candidate taken");
        }
        Ok(Probe::Exhausted)
    }

    /// Produces a free code for `long_url`.
    ///
    /// The strong path runs first. When the strong hash is unavailable or all of
    /// its attempts collide, the weak path runs and the result is tagged
    /// [`GeneratedCode::WeakFallback`]. Both paths exhausted is a hard error.
    pub async fn generate<L>(&self, long_url: &str, lookup: &L) -> Result<GeneratedCode, CodegenError>
    where
        L: CodeLookup + ?Sized,
    {
        if long_url.is_empty() {
            return Err(CodegenError::InvalidInput);
        }

        let mut attempts = 0;
        match self.probe_strong(long_url, lookup).await {
            Ok(Probe::Free { code, .. }) => return Ok(GeneratedCode::Strong(code)),
            Ok(Probe::Exhausted) => {
                attempts += MAX_ATTEMPTS;
                metrics::counter!("codegen_strong_exhausted_total").increment(1);
                tracing::warn!(
                    attempts = MAX_ATTEMPTS,
                    "strong candidates exhausted, falling back to weak hash"
                );
            }
            Err(CodegenError::PrimitiveUnavailable) => {}
            Err(e) => return Err(e),
        }

        match self.probe_weak(long_url, lookup).await? {
            Probe::Free { code, attempt } => {
                metrics::counter!("codegen_weak_fallback_total").increment(1);
                tracing::warn!(code = %code, attempt, "issued weak fallback code");
                Ok(GeneratedCode::WeakFallback(code))
            }
            Probe::Exhausted => {
                attempts += MAX_ATTEMPTS;
                tracing::error!(attempts, "no free short code for url");
                Err(CodegenError::Exhausted { attempts })
            }
        }
    }

    async fn taken<L>(lookup: &L, code: &str) -> Result<bool, CodegenError>
    where
        L: CodeLookup + ?Sized,
    {
        lookup
            .code_exists(code)
            .await
            .map_err(|e| CodegenError::Lookup(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    const LONG_URL: &str = "https://example.com/a/very/long/path";
    const STRONG: [&str; 8] = [
        "I13pXxnD", "XiACnduX", "TZdPsGAF", "0ws8Ti01", "HzSCmmqrb", "SSwAd03W", "P18aAEph",
        "LBdR9Cxc",
    ];

    #[test]
    fn strong_candidate_matches_golden_value() {
        let generator = CodeGenerator::default();
        assert_eq!(generator.strong_candidate(LONG_URL, 0).unwrap(), "I13pXxnD");
        assert_eq!(
            generator.strong_candidate("https://example.com", 0).unwrap(),
            "02J5inaf"
        );
    }

    #[test]
    fn strong_candidates_follow_attempt_suffix() {
        let generator = CodeGenerator::default();
        for (attempt, expected) in STRONG.iter().enumerate() {
            assert_eq!(
                generator.strong_candidate(LONG_URL, attempt as u32).unwrap(),
                *expected
            );
        }
    }

    #[test]
    fn attempts_zero_and_one_differ() {
        let generator = CodeGenerator::default();
        assert_ne!(
            generator.strong_candidate(LONG_URL, 0).unwrap(),
            generator.strong_candidate(LONG_URL, 1).unwrap()
        );
    }

    #[test]
    fn candidates_are_deterministic() {
        let a = CodeGenerator::default();
        let b = CodeGenerator::new(HashMode::Strong);
        assert_eq!(
            a.strong_candidate(LONG_URL, 3).unwrap(),
            b.strong_candidate(LONG_URL, 3).unwrap()
        );
        assert_eq!(a.weak_candidate(LONG_URL, 0), b.weak_candidate(LONG_URL, 0));
    }

    #[test]
    fn weak_candidates_match_known_values() {
        let generator = CodeGenerator::default();
        assert_eq!(generator.weak_candidate(LONG_URL, 0), "ClwSr");
        assert_eq!(generator.weak_candidate(LONG_URL, 1), "bFKRac");
        assert_eq!(generator.weak_candidate(LONG_URL, 2), "aFKRac");
        assert_eq!(generator.weak_candidate("polygenelubricants", 0), "bLMuvc");
    }

    #[test]
    fn strong_candidate_unavailable_in_weak_mode() {
        let generator = CodeGenerator::new(HashMode::WeakOnly);
        assert!(matches!(
            generator.strong_candidate(LONG_URL, 0),
            Err(CodegenError::PrimitiveUnavailable)
        ));
    }

    #[tokio::test]
    async fn probe_returns_fourth_candidate_after_three_collisions() {
        let calls = AtomicU32::new(0);
        let mut lookup = MockCodeLookup::new();
        lookup.expect_code_exists().times(4).returning(move |_| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Ok(n < 3)
        });

        let probe = CodeGenerator::default()
            .probe_strong(LONG_URL, &lookup)
            .await
            .unwrap();

        assert_eq!(
            probe,
            Probe::Free {
                code: STRONG[3].to_string(),
                attempt: 3
            }
        );
    }

    #[tokio::test]
    async fn probe_asks_for_candidates_in_order() {
        let mut lookup = MockCodeLookup::new();
        let mut seq = mockall::Sequence::new();
        for code in STRONG.into_iter().take(2) {
            lookup
                .expect_code_exists()
                .withf(move |c| c == code)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(true));
        }
        lookup
            .expect_code_exists()
            .withf(|c| c == STRONG[2])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));

        let probe = CodeGenerator::default()
            .probe_strong(LONG_URL, &lookup)
            .await
            .unwrap();

        assert!(matches!(probe, Probe::Free { attempt: 2, .. }));
    }

    #[tokio::test]
    async fn probe_exhausts_after_eight_queries() {
        let mut lookup = MockCodeLookup::new();
        lookup
            .expect_code_exists()
            .times(MAX_ATTEMPTS as usize)
            .returning(|_| Ok(true));

        let probe = CodeGenerator::default()
            .probe_strong(LONG_URL, &lookup)
            .await
            .unwrap();

        assert_eq!(probe, Probe::Exhausted);
    }

    #[tokio::test]
    async fn generate_prefers_strong_code() {
        let mut lookup = MockCodeLookup::new();
        lookup.expect_code_exists().times(1).returning(|_| Ok(false));

        let code = CodeGenerator::default()
            .generate(LONG_URL, &lookup)
            .await
            .unwrap();

        assert_eq!(code, GeneratedCode::Strong("I13pXxnD".to_string()));
        assert_eq!(code.strength(), CodeStrength::Strong);
    }

    #[tokio::test]
    async fn generate_falls_back_to_weak_after_strong_exhaustion() {
        let mut lookup = MockCodeLookup::new();
        lookup
            .expect_code_exists()
            .returning(|code| Ok(STRONG.contains(&code)));

        let code = CodeGenerator::default()
            .generate(LONG_URL, &lookup)
            .await
            .unwrap();

        assert_eq!(code, GeneratedCode::WeakFallback("ClwSr".to_string()));
        assert_eq!(code.strength(), CodeStrength::Weak);
    }

    #[tokio::test]
    async fn generate_retries_weak_hash_with_suffix() {
        let mut lookup = MockCodeLookup::new();
        lookup
            .expect_code_exists()
            .returning(|code| Ok(STRONG.contains(&code) || code == "ClwSr"));

        let code = CodeGenerator::default()
            .generate(LONG_URL, &lookup)
            .await
            .unwrap();

        assert_eq!(code, GeneratedCode::WeakFallback("bFKRac".to_string()));
    }

    #[tokio::test]
    async fn generate_fails_hard_when_everything_collides() {
        let mut lookup = MockCodeLookup::new();
        lookup
            .expect_code_exists()
            .times(2 * MAX_ATTEMPTS as usize)
            .returning(|_| Ok(true));

        let err = CodeGenerator::default()
            .generate(LONG_URL, &lookup)
            .await
            .unwrap_err();

        assert!(matches!(err, CodegenError::Exhausted { attempts: 16 }));
    }

    #[tokio::test]
    async fn generate_in_weak_mode_is_deterministic() {
        let mut lookup = MockCodeLookup::new();
        lookup.expect_code_exists().times(2).returning(|_| Ok(false));
        let generator = CodeGenerator::new(HashMode::WeakOnly);

        let first = generator.generate(LONG_URL, &lookup).await.unwrap();
        let second = generator.generate(LONG_URL, &lookup).await.unwrap();

        assert_eq!(first, GeneratedCode::WeakFallback("ClwSr".to_string()));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn generate_in_weak_mode_exhausts_after_eight_queries() {
        let mut lookup = MockCodeLookup::new();
        lookup
            .expect_code_exists()
            .times(MAX_ATTEMPTS as usize)
            .returning(|_| Ok(true));

        let err = CodeGenerator::new(HashMode::WeakOnly)
            .generate(LONG_URL, &lookup)
            .await
            .unwrap_err();

        assert!(matches!(err, CodegenError::Exhausted { attempts: 8 }));
    }

    #[tokio::test]
    async fn generate_rejects_empty_url() {
        let mut lookup = MockCodeLookup::new();
        lookup.expect_code_exists().times(0);

        let err = CodeGenerator::default()
            .generate("", &lookup)
            .await
            .unwrap_err();

        assert!(matches!(err, CodegenError::InvalidInput));
    }

    #[tokio::test]
    async fn generate_propagates_lookup_failure() {
        let mut lookup = MockCodeLookup::new();
        lookup
            .expect_code_exists()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let err = CodeGenerator::default()
            .generate(LONG_URL, &lookup)
            .await
            .unwrap_err();

        assert!(matches!(err, CodegenError::Lookup(_)));
    }

    #[test]
    fn hash_mode_parses_config_values() {
        assert_eq!("sha256".parse::<HashMode>().unwrap(), HashMode::Strong);
        assert_eq!("SHA256".parse::<HashMode>().unwrap(), HashMode::Strong);
        assert_eq!("weak".parse::<HashMode>().unwrap(), HashMode::WeakOnly);
        assert!("md5".parse::<HashMode>().is_err());
    }

    #[test]
    fn strength_round_trips_through_text() {
        for strength in [CodeStrength::Strong, CodeStrength::Weak] {
            assert_eq!(CodeStrength::parse(strength.as_str()), Some(strength));
        }
        assert_eq!(CodeStrength::parse("medium"), None);
    }
}
