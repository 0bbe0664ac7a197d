//! Postgres-backed stores (sqlx).
//!
//! Every budget query includes `user_id` in the WHERE clause alongside the
//! entry id, so cross-user access is impossible at the query level and no
//! load-then-check window exists. Per-row atomicity of a single UPDATE or
//! DELETE statement is all the concurrency control this system uses; there
//! are no multi-row transactions and no retries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use ledgerly_auth::{User, UserStore};
use ledgerly_budgets::{Budget, BudgetKind, BudgetPatch, BudgetStore};
use ledgerly_core::{BudgetId, DomainError, DomainResult, UserId};

/// Open a connection pool against the configured database.
pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPool::connect(database_url).await?;
    Ok(pool)
}

/// Create tables and indexes if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            name TEXT,
            created_at TIMESTAMPTZ NOT NULL,
            CONSTRAINT users_email_key UNIQUE (email)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS budgets (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users (id),
            category TEXT NOT NULL,
            amount DOUBLE PRECISION NOT NULL,
            kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
            date TIMESTAMPTZ NOT NULL,
            description TEXT,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_budgets_user_date ON budgets (user_id, date DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Map a sqlx failure onto the domain taxonomy.
///
/// A unique violation (23505) on the email constraint maps to `Conflict`.
/// Other unique violations (the UUID primary keys) and everything else are
/// internal failures whose cause is logged, never sent to clients.
fn store_err(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some("23505") && db.constraint() == Some("users_email_key") {
            return DomainError::conflict("user already exists");
        }
    }
    tracing::error!(error = %e, "store operation failed");
    DomainError::internal(e.to_string())
}

fn user_from_row(row: &PgRow) -> DomainResult<User> {
    Ok(User {
        id: UserId::from_uuid(row.try_get::<Uuid, _>("id").map_err(store_err)?),
        email: row.try_get("email").map_err(store_err)?,
        password_hash: row.try_get("password_hash").map_err(store_err)?,
        name: row.try_get("name").map_err(store_err)?,
        created_at: row.try_get("created_at").map_err(store_err)?,
    })
}

fn budget_from_row(row: &PgRow) -> DomainResult<Budget> {
    let kind: String = row.try_get("kind").map_err(store_err)?;
    let kind: BudgetKind = kind
        .parse()
        .map_err(|_| DomainError::internal(format!("corrupt kind column: {kind:?}")))?;

    Ok(Budget {
        id: BudgetId::from_uuid(row.try_get::<Uuid, _>("id").map_err(store_err)?),
        user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id").map_err(store_err)?),
        category: row.try_get("category").map_err(store_err)?,
        amount: row.try_get("amount").map_err(store_err)?,
        kind,
        date: row.try_get("date").map_err(store_err)?,
        description: row.try_get("description").map_err(store_err)?,
        created_at: row.try_get("created_at").map_err(store_err)?,
        updated_at: row.try_get("updated_at").map_err(store_err)?,
    })
}

/// Postgres-backed user store.
#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn insert(&self, user: &User) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, name, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        // TEXT equality is case-sensitive, matching how emails are stored.
        let row = sqlx::query(
            "SELECT id, email, password_hash, name, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, name, created_at FROM users WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;
        row.as_ref().map(user_from_row).transpose()
    }
}

/// Postgres-backed budget entry store.
#[derive(Debug, Clone)]
pub struct PostgresBudgetStore {
    pool: PgPool,
}

impl PostgresBudgetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const BUDGET_COLUMNS: &str =
    "id, user_id, category, amount, kind, date, description, created_at, updated_at";

#[async_trait]
impl BudgetStore for PostgresBudgetStore {
    async fn insert(&self, entry: &Budget) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO budgets \
             (id, user_id, category, amount, kind, date, description, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(entry.id.as_uuid())
        .bind(entry.user_id.as_uuid())
        .bind(&entry.category)
        .bind(entry.amount)
        .bind(entry.kind.as_str())
        .bind(entry.date)
        .bind(&entry.description)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn list_for_user(&self, owner: UserId) -> DomainResult<Vec<Budget>> {
        let rows = sqlx::query(&format!(
            "SELECT {BUDGET_COLUMNS} FROM budgets WHERE user_id = $1 \
             ORDER BY date DESC, created_at DESC"
        ))
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;
        rows.iter().map(budget_from_row).collect()
    }

    async fn update_owned(
        &self,
        id: BudgetId,
        owner: UserId,
        patch: &BudgetPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Budget>> {
        // One statement: ownership filter and field merge happen atomically.
        let row = sqlx::query(&format!(
            "UPDATE budgets SET \
                category = COALESCE($3, category), \
                amount = COALESCE($4, amount), \
                kind = COALESCE($5, kind), \
                date = COALESCE($6, date), \
                description = COALESCE($7, description), \
                updated_at = $8 \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {BUDGET_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(owner.as_uuid())
        .bind(patch.category.as_deref().map(str::trim))
        .bind(patch.amount)
        .bind(patch.kind.map(|k| k.as_str()))
        .bind(patch.date)
        .bind(patch.description.as_deref().map(str::trim))
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;
        row.as_ref().map(budget_from_row).transpose()
    }

    async fn delete_owned(&self, id: BudgetId, owner: UserId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected() > 0)
    }
}
