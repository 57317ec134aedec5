//! Core domain entities.
//!
//! Entities are plain data structures. Creation inputs are separate structs
//! (`NewAliasRecord`, `NewUser`) because the registry assigns identifiers.
//!
//! - [`AliasRecord`] - A short key and its redirect target
//! - [`User`] - A registered account that owns alias records

pub mod alias_record;
pub mod user;

pub use alias_record::{AliasPage, AliasRecord, NewAliasRecord};
pub use user::{NewUser, User};
