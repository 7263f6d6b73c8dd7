//! User and admin account models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use souk_core::{AdminId, Email, Role, UserId};

/// A marketplace user (buyer or seller).
///
/// The password hash never leaves the repository layer.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An admin account.
///
/// Admins are a disjoint identity space from users and authenticate against
/// their own token namespace.
#[derive(Debug, Clone, Serialize)]
pub struct Admin {
    pub id: AdminId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
