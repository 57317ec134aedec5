//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`memory`] - Mutex-guarded in-memory repositories
//! - [`persistence`] - PostgreSQL repository implementations

pub mod memory;
pub mod persistence;
