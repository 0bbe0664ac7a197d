//! Budget entry model.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ledgerly_core::{BudgetId, DomainError, UserId};

/// Whether an entry adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetKind {
    Income,
    Expense,
}

impl BudgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetKind::Income => "income",
            BudgetKind::Expense => "expense",
        }
    }
}

impl core::fmt::Display for BudgetKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(BudgetKind::Income),
            "expense" => Ok(BudgetKind::Expense),
            other => Err(DomainError::validation(format!(
                "type must be income or expense, got {other:?}"
            ))),
        }
    }
}

/// A dated income/expense record owned by exactly one user.
///
/// # Invariants
/// - `user_id` is immutable after creation; no update path touches it.
/// - Every store read/update/delete filters by `id` AND `user_id` in one
///   call, so an entry owned by someone else is indistinguishable from a
///   nonexistent one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,
    pub user_id: UserId,
    pub category: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: BudgetKind,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw creation input before validation. All required fields are optional
/// here so the service can report what is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetDraft {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub kind: Option<BudgetKind>,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

/// Partial update: absent fields are left unchanged. `user_id` is not
/// representable here by construction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetPatch {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub kind: Option<BudgetKind>,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

impl Budget {
    /// Apply the supplied fields of `patch`, bumping `updated_at`.
    pub fn apply(&mut self, patch: &BudgetPatch, now: DateTime<Utc>) {
        if let Some(category) = &patch.category {
            self.category = category.trim().to_string();
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.trim().to_string());
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> Budget {
        let now = Utc::now();
        Budget {
            id: BudgetId::new(),
            user_id: UserId::new(),
            category: "Food".to_string(),
            amount: 12.5,
            kind: BudgetKind::Expense,
            date: now,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn apply_changes_only_supplied_fields() {
        let mut e = entry();
        let before = e.clone();
        let later = Utc::now();

        e.apply(
            &BudgetPatch {
                amount: Some(99.0),
                ..Default::default()
            },
            later,
        );

        assert_eq!(e.amount, 99.0);
        assert_eq!(e.category, before.category);
        assert_eq!(e.kind, before.kind);
        assert_eq!(e.date, before.date);
        assert_eq!(e.user_id, before.user_id);
        assert_eq!(e.updated_at, later);
    }

    #[test]
    fn apply_trims_text_fields() {
        let mut e = entry();
        e.apply(
            &BudgetPatch {
                category: Some("  Rent  ".to_string()),
                description: Some(" monthly ".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(e.category, "Rent");
        assert_eq!(e.description.as_deref(), Some("monthly"));
    }

    #[test]
    fn kind_serializes_as_type_on_the_wire() {
        let e = entry();
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "expense");
        assert!(json.get("kind").is_none());
        assert!(json.get("userId").is_some());
        // Absent description is omitted, not null.
        assert!(json.get("description").is_none());
    }

    #[test]
    fn kind_parses_exactly_two_values() {
        assert_eq!("income".parse::<BudgetKind>().unwrap(), BudgetKind::Income);
        assert_eq!("expense".parse::<BudgetKind>().unwrap(), BudgetKind::Expense);
        assert!("Income".parse::<BudgetKind>().is_err());
        assert!("transfer".parse::<BudgetKind>().is_err());
    }
}
