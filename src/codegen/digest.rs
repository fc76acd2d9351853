//! Hash primitives feeding the base-62 encoder.

use sha2::{Digest, Sha256};

/// Number of leading digest bytes folded into a code value.
pub const DIGEST_PREFIX_BYTES: usize = 6;

/// Builds the text hashed for `attempt`: the URL itself for attempt 0,
/// `"<url>:<attempt>"` afterwards.
pub fn digest_input(long_url: &str, attempt: u32) -> String {
    if attempt == 0 {
        long_url.to_string()
    } else {
        format!("{long_url}:{attempt}")
    }
}

/// SHA-256 of the UTF-8 bytes, first six bytes read as a big-endian 48-bit
/// unsigned integer.
pub fn strong_value(input: &str) -> u64 {
    let digest = Sha256::digest(input.as_bytes());
    digest[..DIGEST_PREFIX_BYTES]
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | b as u64)
}

/// 32-bit string hash over UTF-16 code units: `h = 31 * h + unit`, wrapping.
pub fn string_hash(input: &str) -> i32 {
    input
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Absolute value of [`string_hash`]. `i32::MIN` has no positive
/// counterpart and is clamped to `i32::MAX`.
pub fn weak_value(input: &str) -> u64 {
    let hash = string_hash(input);
    if hash == i32::MIN {
        i32::MAX as u64
    } else {
        hash.unsigned_abs() as u64
    }
}
