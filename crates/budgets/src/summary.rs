//! Pure aggregation over already-loaded budget entries. No I/O.

use serde::Serialize;

use crate::entry::{Budget, BudgetKind};

/// Income/expense sums and their difference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

/// Summed expense amount for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Sum amounts by kind. Empty input yields all zeros.
pub fn totals(entries: &[Budget]) -> Totals {
    let income: f64 = entries
        .iter()
        .filter(|e| e.kind == BudgetKind::Income)
        .map(|e| e.amount)
        .sum();
    let expenses: f64 = entries
        .iter()
        .filter(|e| e.kind == BudgetKind::Expense)
        .map(|e| e.amount)
        .sum();

    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Per-category expense sums, largest first.
///
/// Accumulation is order-preserving (first-encountered category first) and
/// the final sort is stable, so equal amounts keep encounter order. Income
/// entries are ignored; categories with no expense entries do not appear.
pub fn expenses_by_category(entries: &[Budget]) -> Vec<CategoryTotal> {
    let mut categories: Vec<CategoryTotal> = Vec::new();

    for entry in entries.iter().filter(|e| e.kind == BudgetKind::Expense) {
        match categories.iter_mut().find(|c| c.category == entry.category) {
            Some(existing) => existing.amount += entry.amount,
            None => categories.push(CategoryTotal {
                category: entry.category.clone(),
                amount: entry.amount,
            }),
        }
    }

    categories.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(core::cmp::Ordering::Equal)
    });
    categories
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use ledgerly_core::{BudgetId, UserId};
    use proptest::prelude::*;

    use super::*;

    fn entry(category: &str, amount: f64, kind: BudgetKind) -> Budget {
        let now = Utc::now();
        Budget {
            id: BudgetId::new(),
            user_id: UserId::new(),
            category: category.to_string(),
            amount,
            kind,
            date: now,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn totals_of_empty_input_is_all_zeros() {
        assert_eq!(
            totals(&[]),
            Totals {
                income: 0.0,
                expenses: 0.0,
                balance: 0.0
            }
        );
    }

    #[test]
    fn totals_sums_by_kind() {
        let entries = vec![
            entry("Salary", 100.0, BudgetKind::Income),
            entry("Food", 40.0, BudgetKind::Expense),
        ];
        assert_eq!(
            totals(&entries),
            Totals {
                income: 100.0,
                expenses: 40.0,
                balance: 60.0
            }
        );
    }

    #[test]
    fn by_category_sums_and_sorts_descending() {
        let entries = vec![
            entry("Food", 10.0, BudgetKind::Expense),
            entry("Food", 5.0, BudgetKind::Expense),
            entry("Rent", 20.0, BudgetKind::Expense),
        ];
        let got = expenses_by_category(&entries);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].category, "Rent");
        assert_eq!(got[0].amount, 20.0);
        assert_eq!(got[1].category, "Food");
        assert_eq!(got[1].amount, 15.0);
    }

    #[test]
    fn by_category_ignores_income_entries() {
        let entries = vec![
            entry("Salary", 100.0, BudgetKind::Income),
            entry("Food", 5.0, BudgetKind::Expense),
        ];
        let got = expenses_by_category(&entries);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].category, "Food");
    }

    #[test]
    fn by_category_ties_keep_first_encounter_order() {
        let entries = vec![
            entry("Travel", 7.0, BudgetKind::Expense),
            entry("Games", 7.0, BudgetKind::Expense),
        ];
        let got = expenses_by_category(&entries);
        assert_eq!(got[0].category, "Travel");
        assert_eq!(got[1].category, "Games");
    }

    fn arb_entries() -> impl Strategy<Value = Vec<Budget>> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["Food", "Rent", "Travel", "Games"]),
                -1000.0f64..1000.0,
                prop::bool::ANY,
            )
                .prop_map(|(category, amount, is_income)| {
                    let kind = if is_income {
                        BudgetKind::Income
                    } else {
                        BudgetKind::Expense
                    };
                    entry(category, amount, kind)
                }),
            0..40,
        )
    }

    proptest! {
        #[test]
        fn balance_is_income_minus_expenses(entries in arb_entries()) {
            let t = totals(&entries);
            prop_assert!((t.balance - (t.income - t.expenses)).abs() < 1e-9);
        }

        #[test]
        fn category_sums_partition_the_expense_total(entries in arb_entries()) {
            let t = totals(&entries);
            let by_cat: f64 = expenses_by_category(&entries).iter().map(|c| c.amount).sum();
            prop_assert!((by_cat - t.expenses).abs() < 1e-6);
        }

        #[test]
        fn by_category_is_sorted_descending(entries in arb_entries()) {
            let got = expenses_by_category(&entries);
            for pair in got.windows(2) {
                prop_assert!(pair[0].amount >= pair[1].amount);
            }
        }

        #[test]
        fn by_category_has_distinct_categories(entries in arb_entries()) {
            let got = expenses_by_category(&entries);
            for (i, a) in got.iter().enumerate() {
                for b in &got[i + 1..] {
                    prop_assert_ne!(&a.category, &b.category);
                }
            }
        }
    }
}
