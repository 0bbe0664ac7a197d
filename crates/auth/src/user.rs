//! User account model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ledgerly_core::UserId;

/// A registered user as persisted.
///
/// # Invariants
/// - `email` is unique across the store (case-sensitive, stored as given).
/// - `password_hash` is a salted one-way bcrypt hash; the clear password is
///   never stored.
///
/// Deliberately not `Serialize`: the hash must never reach the wire. Use
/// [`PublicUser`] for anything client-facing.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, password_hash: String, name: Option<String>) -> Self {
        Self {
            id: UserId::new(),
            email,
            password_hash,
            name,
            created_at: Utc::now(),
        }
    }

    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

/// Client-facing view of a user (no credential material).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}
