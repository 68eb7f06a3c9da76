//! Prompt fingerprints for log correlation. Prompts themselves are never logged.


/// Number of hex characters kept by [`prompt_fingerprint`].
pub const FINGERPRINT_HEX_CHARS: usize = 16;

/// Short hex prefix of the prompt's BLAKE3 hash, stable across runs.
#[inline]
pub fn prompt_fingerprint(prompt: &str) -> String {
    let hex = blake3::hash(prompt.as_bytes()).to_hex();
    hex.as_str()[..FINGERPRINT_HEX_CHARS].to_string()
}
