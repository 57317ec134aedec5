//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls and enforce business rules. They
//! receive their repositories as injected trait objects and hold no other
//! shared state.
//!
//! # Available Services
//!
//! - [`services::alias_service::AliasService`] - Allocation, resolution, deletion and listing of short keys
//! - [`services::user_service::UserService`] - User registration
//! - [`services::auth_service::AuthService`] - HTTP Basic credential checks

pub mod services;
