//! Upcoming expense records and their monthly projection

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    Pending,
    Paid,
}

/// A scheduled expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub category: String,
    pub amount: f64,
    /// Date the expense falls due; only its calendar month is used
    pub date: NaiveDate,
    pub status: ExpenseStatus,
    /// Recurring expenses repeat every month from `date` onward
    pub recurring: bool,
}

impl ExpenseRecord {
    /// Zero-based month index (January = 0) of the due date
    pub fn month_index(&self) -> usize {
        self.date.month0() as usize
    }
}

/// Spread expenses over a `months`-long horizon starting in January
///
/// Recurring records fill every month from their due month to the end of the
/// horizon; one-off records land only in their due month. Records due at or
/// past the horizon are ignored.
pub fn expense_projections(expenses: &[ExpenseRecord], months: usize) -> Vec<f64> {
    let mut projections = vec![0.0; months];

    for expense in expenses {
        let start = expense.month_index();
        if start >= months {
            log::debug!(
                "{} expense due in month {} falls outside {}-month horizon",
                expense.category,
                start,
                months
            );
            continue;
        }

        if expense.recurring {
            for slot in &mut projections[start..] {
                *slot += expense.amount;
            }
        } else {
            projections[start] += expense.amount;
        }
    }

    projections
}

/// Total amount per category
pub fn expenses_by_category(expenses: &[ExpenseRecord]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Sum of expenses not yet paid
pub fn pending_total(expenses: &[ExpenseRecord]) -> f64 {
    expenses
        .iter()
        .filter(|e| e.status == ExpenseStatus::Pending)
        .map(|e| e.amount)
        .sum()
}
