//! Business logic and repository trait definitions for Taskling.
//!
//! This crate defines the "ports" (repository traits) that the
//! infrastructure layer implements, and the services that enforce the
//! API's semantics: credential resolution, ownership scoping, partial vs.
//! full-replace updates. It depends only on `taskling-types` -- never on
//! `taskling-infra` or any database/IO crate.

pub mod repository;
pub mod service;
