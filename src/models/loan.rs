//! Informal loan model
//!
//! Money lent to a person, repaid in any number of partial collections.
//! `amount_repaid` accumulates without clamping, so an overpayment is
//! visible in the record; `is_fully_paid` is a stored cache recomputed
//! from the single rule `amount_repaid >= amount_lent` on every payment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::dates;
use super::ids::LoanId;
use super::money::Money;

/// Description used when the caller does not supply one
pub const DEFAULT_LOAN_DESCRIPTION: &str = "Préstamo";

/// An outstanding or settled personal loan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    /// Unique identifier, minted by the store
    pub id: LoanId,

    pub person_name: String,

    /// Principal handed over at disbursement
    pub amount_lent: Money,

    /// Sum of all collections, never clamped to the principal
    pub amount_repaid: Money,

    #[serde(with = "dates::lenient", default = "Utc::now")]
    pub date_lent: DateTime<Utc>,

    pub description: String,

    /// Cached settled flag; authoritative copy of the recompute rule
    pub is_fully_paid: bool,
}

impl Loan {
    /// Apply a collection and recompute the settled flag
    pub fn record_repayment(&mut self, amount: Money) {
        self.amount_repaid += amount;
        self.is_fully_paid = self.amount_repaid >= self.amount_lent;
    }

    /// Repayment progress as a percentage, clamped to 0-100 for display
    pub fn progress(&self) -> f64 {
        if self.amount_lent.cents() <= 0 {
            return 0.0;
        }

        let ratio = self.amount_repaid.cents() as f64 / self.amount_lent.cents() as f64;
        (ratio * 100.0).clamp(0.0, 100.0)
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} / {}",
            self.person_name, self.amount_repaid, self.amount_lent
        )
    }
}

/// Input for disbursing a loan; the store mints the id
#[derive(Debug, Clone)]
pub struct NewLoan {
    pub person_name: String,
    pub amount_lent: Money,
    pub description: String,

    /// Stamped at construction; the disbursement transaction reuses it
    pub date_lent: DateTime<Utc>,
}

impl NewLoan {
    pub fn new(
        person_name: impl Into<String>,
        amount_lent: Money,
        description: Option<String>,
    ) -> Self {
        Self {
            person_name: person_name.into(),
            amount_lent,
            description: description.unwrap_or_else(|| DEFAULT_LOAN_DESCRIPTION.to_string()),
            date_lent: Utc::now(),
        }
    }

    /// Build the stored record under a minted id
    ///
    /// New loans start with nothing repaid.
    pub fn into_loan(self, id: LoanId) -> Loan {
        Loan {
            id,
            person_name: self.person_name,
            amount_lent: self.amount_lent,
            amount_repaid: Money::zero(),
            date_lent: self.date_lent,
            description: self.description,
            is_fully_paid: false,
        }
    }
}
