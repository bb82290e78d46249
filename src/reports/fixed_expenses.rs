//! Fixed expense payment status
//!
//! Derives the monthly paid/unpaid view over the obligation templates.
//! Status is computed against a reference instant, never stored, so the
//! whole list rolls back to unpaid at each month boundary on its own.

use chrono::{DateTime, Utc};

use crate::models::FixedExpense;

/// A template paired with its derived status for the reference month
#[derive(Debug, Clone)]
pub struct FixedExpenseStatus {
    pub expense: FixedExpense,
    pub is_paid: bool,
}

/// Statuses in display order: unpaid first, then ascending due day
pub fn payment_statuses(
    expenses: &[FixedExpense],
    now: DateTime<Utc>,
) -> Vec<FixedExpenseStatus> {
    let mut statuses: Vec<FixedExpenseStatus> = expenses
        .iter()
        .map(|expense| FixedExpenseStatus {
            is_paid: expense.is_paid_in_month(now),
            expense: expense.clone(),
        })
        .collect();

    statuses.sort_by(|a, b| {
        a.is_paid
            .cmp(&b.is_paid)
            .then(a.expense.day_of_month.cmp(&b.expense.day_of_month))
    });

    statuses
}

/// How far through the month's obligations the user is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentProgress {
    pub paid: usize,
    pub total: usize,
    /// 0-100; 0 when there are no obligations at all
    pub percent: f64,
}

/// Paid count, total count and percentage for the reference month
pub fn payment_progress(expenses: &[FixedExpense], now: DateTime<Utc>) -> PaymentProgress {
    let total = expenses.len();
    let paid = expenses
        .iter()
        .filter(|expense| expense.is_paid_in_month(now))
        .count();

    let percent = if total == 0 {
        0.0
    } else {
        paid as f64 / total as f64 * 100.0
    };

    PaymentProgress {
        paid,
        total,
        percent,
    }
}
