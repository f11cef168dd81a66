//! Short code generation.

/// URL-safe alphabet used for short codes (64 symbols).
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Length of generated short codes.
pub const CODE_LENGTH: usize = 7;

/// Generates a cryptographically secure random short code.
///
/// Draws 7 characters from a 64-symbol URL-safe alphabet (~42 bits of
/// entropy), so collisions are improbable at this scale. The caller is still
/// expected to retry on the rare store-level uniqueness violation.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    // 64 symbols, so the low 6 bits of each byte index the alphabet uniformly.
    buffer
        .iter()
        .map(|b| ALPHABET[(b & 0x3f) as usize] as char)
        .collect()
}
