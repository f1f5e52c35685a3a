//! Shared domain types for Taskling.
//!
//! This crate contains the core domain types used across the Taskling
//! backend: Account, ApiKey, Todo, the request/response shapes of the REST
//! API, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod account;
pub mod error;
pub mod todo;
