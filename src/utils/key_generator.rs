//! Random short key generation.
//!
//! Keys are drawn uniformly from the 62-character alphanumeric alphabet.
//! With the default length of 6 that gives 62^6 (about 56.8 billion) keys.

use rand::Rng;

/// Characters a generated key may contain.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of generated keys unless configured otherwise.
pub const DEFAULT_KEY_LENGTH: usize = 6;

/// Generates a random key of exactly `length` characters.
///
/// # Examples
///
/// ```
/// use url_alias::utils::key_generator::generate_key;
///
/// let key = generate_key(6);
/// assert_eq!(key.len(), 6);
/// assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_key(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Source of candidate short keys for the allocation engine.
///
/// Production code uses [`RandomKeySource`]. Tests substitute deterministic
/// sources to drive collision handling.
pub trait KeySource: Send + Sync {
    /// Produces one candidate of exactly `length` characters.
    fn candidate(&self, length: usize) -> String;
}

/// Thread-local CSPRNG backed key source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomKeySource;

impl KeySource for RandomKeySource {
    fn candidate(&self, length: usize) -> String {
        generate_key(length)
    }
}
