//! Helper functions used across the application.
//!
//! - [`key_generator`] - Random short key generation
//! - [`password`] - Argon2id password hashing
//! - [`url_normalizer`] - Target URL validation and normalization

pub mod key_generator;
pub mod password;
pub mod url_normalizer;
