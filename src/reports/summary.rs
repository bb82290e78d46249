//! Financial summary
//!
//! Folds the full transaction set into the four headline figures shown on
//! a dashboard: spendable balance, savings balance, and the income and
//! expense totals for the current calendar month.

use chrono::{DateTime, Utc};

use crate::models::dates::same_calendar_month;
use crate::models::transaction::{AccountType, TransactionType};
use crate::models::{Money, Transaction};

/// Headline figures derived from the full transaction set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FinanceSummary {
    /// Net balance across the spending accounts
    pub total_balance: Money,

    /// Accumulated transfers into savings
    pub savings_balance: Money,

    /// Income dated in the current calendar month
    pub monthly_income: Money,

    /// Expenses dated in the current calendar month
    pub monthly_expense: Money,
}

/// Fold transactions into a summary
///
/// A single pure pass; reordering the input cannot change the result.
/// `now` is captured once by the caller; every "this month" decision in
/// the pass uses it.
///
/// Savings-account records contribute to the savings balance only when
/// they are transfers; any other type parked on the savings account is
/// skipped entirely rather than guessed at. A transfer booked off the
/// savings account (possible only in stored data that predates
/// validation) still reduces the spendable total.
pub fn summarize(transactions: &[Transaction], now: DateTime<Utc>) -> FinanceSummary {
    let mut summary = FinanceSummary::default();

    for txn in transactions {
        if txn.account_id == AccountType::Savings {
            if txn.kind == TransactionType::TransferToSavings {
                summary.savings_balance += txn.amount;
            }
            continue;
        }

        let this_month = same_calendar_month(txn.date, now);
        match txn.kind {
            TransactionType::Income => {
                summary.total_balance += txn.amount;
                if this_month {
                    summary.monthly_income += txn.amount;
                }
            }
            TransactionType::Expense => {
                summary.total_balance -= txn.amount;
                if this_month {
                    summary.monthly_expense += txn.amount;
                }
            }
            TransactionType::TransferToSavings => {
                // Never counts toward the monthly figures
                summary.total_balance -= txn.amount;
            }
        }
    }

    summary
}
