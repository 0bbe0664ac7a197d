//! Persistence seam for user records.

use async_trait::async_trait;

use ledgerly_core::{DomainResult, UserId};

use crate::user::User;

/// User record storage.
///
/// Implementations map their own failures to `DomainError::Internal`, except
/// a duplicate-email insert which maps to `DomainError::Conflict`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &User) -> DomainResult<()>;

    /// Exact, case-sensitive email lookup.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;
}
