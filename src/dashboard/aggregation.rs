//! Expense totals for the dashboard.

use std::collections::BTreeMap;

use crate::ledger::Expense;

/// The amount spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// The total spent and how it splits across categories.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ExpenseSummary {
    /// The sum of every expense amount.
    pub total: f64,
    /// The sum of the amounts in each category, sorted by category name.
    pub by_category: Vec<CategoryTotal>,
}

/// Sums the expense amounts overall and per category.
///
/// Categories are taken from the stored text, so categories outside of
/// [crate::ledger::ExpenseCategory] still get their own entry.
pub(super) fn summarize_expenses(expenses: &[Expense]) -> ExpenseSummary {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();

    for expense in expenses {
        *totals.entry(expense.category.as_str()).or_insert(0.0) += expense.amount;
    }

    ExpenseSummary {
        total: expenses.iter().map(|expense| expense.amount).sum(),
        by_category: totals
            .into_iter()
            .map(|(category, amount)| CategoryTotal {
                category: category.to_owned(),
                amount,
            })
            .collect(),
    }
}
