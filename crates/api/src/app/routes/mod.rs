pub mod auth;
pub mod budgets;
pub mod system;
