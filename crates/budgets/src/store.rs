//! Persistence seam for budget entries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use ledgerly_core::{BudgetId, DomainResult, UserId};

use crate::entry::{Budget, BudgetPatch};

/// Budget entry storage.
///
/// The `*_owned` operations take the entry id AND the owning user id and
/// must apply both in a single store call. That folded filter is the only
/// enforcement of tenant isolation; implementations must not split it into
/// load-then-check.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    async fn insert(&self, entry: &Budget) -> DomainResult<()>;

    /// All entries owned by `owner`, ordered by `date` descending
    /// (most recent first; ties broken by `created_at` descending).
    async fn list_for_user(&self, owner: UserId) -> DomainResult<Vec<Budget>>;

    /// Apply `patch` to the entry matching `id` AND `owner` atomically.
    /// Returns the updated entry, or `None` when no owned entry matches.
    async fn update_owned(
        &self,
        id: BudgetId,
        owner: UserId,
        patch: &BudgetPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Budget>>;

    /// Permanently remove the entry matching `id` AND `owner`.
    /// Returns whether anything was removed.
    async fn delete_owned(&self, id: BudgetId, owner: UserId) -> DomainResult<bool>;
}
