//! Base-62 encoding of short-code values.
//!
//! Digits are emitted in the order repeated division produces them, so the
//! first character of a code is the least-significant digit. Codes issued by
//! earlier deployments use this ordering.

pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const BASE: u64 = 62;

/// Encodes `value` as a little-endian base-62 string. Zero encodes to `"a"`.
pub fn encode(mut value: u64) -> String {
    if value == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    // 62^11 > 2^64
    let mut out = String::with_capacity(11);
    while value > 0 {
        out.push(ALPHABET[(value % BASE) as usize] as char);
        value /= BASE;
    }
    out
}

/// Returns true if every character of `code` belongs to the alphabet.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
