//! `ledgerly-budgets` — budget entries: ownership-scoped CRUD and
//! aggregation.
//!
//! Pure domain plus the `BudgetStore` seam; storage drivers live in
//! `ledgerly-infra`.

pub mod entry;
pub mod service;
pub mod store;
pub mod summary;

pub use entry::{Budget, BudgetDraft, BudgetKind, BudgetPatch};
pub use service::BudgetService;
pub use store::BudgetStore;
pub use summary::{expenses_by_category, totals, CategoryTotal, Totals};
