//! Use-case services over the collection stores.
//!
//! # Responsibility
//! - Own one session's stores and id generators.
//! - Keep presentation callers decoupled from persistence wiring.

pub mod bookstore_service;
pub mod roster_service;
