//! Request middleware and authorization extractors.

pub mod auth;

pub use auth::{CurrentAdmin, CurrentSeller, CurrentUser};
