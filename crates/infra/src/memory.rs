//! In-memory stores for dev and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use ledgerly_auth::{User, UserStore};
use ledgerly_budgets::{Budget, BudgetPatch, BudgetStore};
use ledgerly_core::{BudgetId, DomainError, DomainResult, UserId};

/// In-memory user store. Enforces email uniqueness like the Postgres
/// unique index does.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &User) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::internal("user store lock poisoned"))?;
        if map.values().any(|u| u.email == user.email) {
            return Err(DomainError::conflict("user already exists"));
        }
        map.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let map = self
            .inner
            .read()
            .map_err(|_| DomainError::internal("user store lock poisoned"))?;
        Ok(map.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let map = self
            .inner
            .read()
            .map_err(|_| DomainError::internal("user store lock poisoned"))?;
        Ok(map.get(&id).cloned())
    }
}

/// In-memory budget entry store.
///
/// The owned update/delete paths check `id` AND `owner` under a single
/// write lock, mirroring the one-statement filter the Postgres store uses.
#[derive(Debug, Default)]
pub struct InMemoryBudgetStore {
    inner: RwLock<HashMap<BudgetId, Budget>>,
}

impl InMemoryBudgetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BudgetStore for InMemoryBudgetStore {
    async fn insert(&self, entry: &Budget) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::internal("budget store lock poisoned"))?;
        map.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn list_for_user(&self, owner: UserId) -> DomainResult<Vec<Budget>> {
        let map = self
            .inner
            .read()
            .map_err(|_| DomainError::internal("budget store lock poisoned"))?;
        let mut entries: Vec<Budget> = map
            .values()
            .filter(|e| e.user_id == owner)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(entries)
    }

    async fn update_owned(
        &self,
        id: BudgetId,
        owner: UserId,
        patch: &BudgetPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Budget>> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::internal("budget store lock poisoned"))?;
        match map.get_mut(&id) {
            Some(entry) if entry.user_id == owner => {
                entry.apply(patch, now);
                Ok(Some(entry.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_owned(&self, id: BudgetId, owner: UserId) -> DomainResult<bool> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::internal("budget store lock poisoned"))?;
        match map.get(&id) {
            Some(entry) if entry.user_id == owner => {
                map.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
