//! `ledgerly-infra` — storage drivers behind the domain store seams.
//!
//! Two implementations of `UserStore`/`BudgetStore`:
//! - in-memory (`memory`) for dev and tests,
//! - Postgres via sqlx (`postgres`) for production.

pub mod memory;
pub mod postgres;


pub use memory::{InMemoryBudgetStore, InMemoryUserStore};
pub use postgres::{connect, ensure_schema, PostgresBudgetStore, PostgresUserStore};
