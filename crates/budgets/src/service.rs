//! Ownership-scoped CRUD over budget entries.

use std::sync::Arc;

use chrono::Utc;

use ledgerly_core::{BudgetId, DomainError, DomainResult, UserId};

use crate::entry::{Budget, BudgetDraft, BudgetPatch};
use crate::store::BudgetStore;

/// CRUD operations over budget entries, always scoped to a verified
/// requester identity. Callers obtain that identity from the auth layer;
/// it is a precondition here, not re-checked.
#[derive(Clone)]
pub struct BudgetService {
    entries: Arc<dyn BudgetStore>,
}

impl BudgetService {
    pub fn new(entries: Arc<dyn BudgetStore>) -> Self {
        Self { entries }
    }

    /// All of the requester's entries, most recent date first. An empty
    /// list is a valid result, not an error.
    pub async fn list(&self, requester: UserId) -> DomainResult<Vec<Budget>> {
        self.entries.list_for_user(requester).await
    }

    /// Validate and persist a new entry owned by the requester.
    ///
    /// `date` defaults to the current instant. Amount only has to be
    /// present and finite; zero and negative values are stored as given.
    pub async fn create(&self, requester: UserId, draft: BudgetDraft) -> DomainResult<Budget> {
        let category = match draft.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => return Err(DomainError::validation("category is required")),
        };
        let amount = match draft.amount {
            Some(a) if a.is_finite() => a,
            Some(_) => return Err(DomainError::validation("amount must be a finite number")),
            None => return Err(DomainError::validation("amount is required")),
        };
        let Some(kind) = draft.kind else {
            return Err(DomainError::validation("type is required"));
        };

        let now = Utc::now();
        let entry = Budget {
            id: BudgetId::new(),
            user_id: requester,
            category,
            amount,
            kind,
            date: draft.date.unwrap_or(now),
            description: draft.description.map(|d| d.trim().to_string()),
            created_at: now,
            updated_at: now,
        };

        self.entries.insert(&entry).await?;
        tracing::debug!(entry_id = %entry.id, user_id = %requester, "budget entry created");
        Ok(entry)
    }

    /// Apply a partial update to an entry the requester owns.
    ///
    /// The owning user id is never mutated, whatever the input carried.
    /// An entry owned by someone else surfaces as `NotFound`.
    pub async fn update(
        &self,
        requester: UserId,
        id: BudgetId,
        patch: BudgetPatch,
    ) -> DomainResult<Budget> {
        if let Some(amount) = patch.amount {
            if !amount.is_finite() {
                return Err(DomainError::validation("amount must be a finite number"));
            }
        }
        if let Some(category) = patch.category.as_deref() {
            if category.trim().is_empty() {
                return Err(DomainError::validation("category cannot be blank"));
            }
        }

        match self
            .entries
            .update_owned(id, requester, &patch, Utc::now())
            .await?
        {
            Some(entry) => Ok(entry),
            None => Err(DomainError::not_found()),
        }
    }

    /// Permanently delete an entry the requester owns (no tombstone).
    pub async fn delete(&self, requester: UserId, id: BudgetId) -> DomainResult<()> {
        if self.entries.delete_owned(id, requester).await? {
            tracing::debug!(entry_id = %id, user_id = %requester, "budget entry deleted");
            Ok(())
        } else {
            Err(DomainError::not_found())
        }
    }
}
