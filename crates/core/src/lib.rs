//! Souk Core - Shared types library.
//!
//! This crate provides common types used across the Souk marketplace:
//! - `api` - JSON API serving buyers, sellers, and admins
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and the
//!   role/status enums with their transition rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
