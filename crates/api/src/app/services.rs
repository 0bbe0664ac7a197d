//! Store selection and service wiring.

use std::sync::Arc;

use anyhow::Context;

use ledgerly_auth::{AuthService, TokenSigner, UserStore};
use ledgerly_budgets::{BudgetService, BudgetStore};
use ledgerly_infra::{
    InMemoryBudgetStore, InMemoryUserStore, PostgresBudgetStore, PostgresUserStore,
};

use crate::config::ApiConfig;

/// The application's service graph, shared across requests.
#[derive(Clone)]
pub struct AppServices {
    pub auth: AuthService,
    pub budgets: BudgetService,
}

/// Wire services against Postgres when `DATABASE_URL` is configured, or
/// against in-memory stores otherwise (dev/tests).
///
/// A configured-but-unreachable database is an error; the process must not
/// come up half-connected.
pub async fn build_services(
    config: &ApiConfig,
    tokens: TokenSigner,
) -> anyhow::Result<AppServices> {
    let (users, entries): (Arc<dyn UserStore>, Arc<dyn BudgetStore>) = match &config.database_url {
        Some(url) => {
            let pool = ledgerly_infra::connect(url)
                .await
                .context("failed to connect to database")?;
            ledgerly_infra::ensure_schema(&pool)
                .await
                .context("failed to prepare database schema")?;
            tracing::info!("connected to Postgres store");
            (
                Arc::new(PostgresUserStore::new(pool.clone())),
                Arc::new(PostgresBudgetStore::new(pool)),
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores (data is not persisted)");
            (
                Arc::new(InMemoryUserStore::new()),
                Arc::new(InMemoryBudgetStore::new()),
            )
        }
    };

    Ok(AppServices {
        auth: AuthService::new(users, tokens),
        budgets: BudgetService::new(entries),
    })
}
