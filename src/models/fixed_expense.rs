//! Fixed expense model
//!
//! A recurring monthly obligation template. The template itself is not a
//! transaction; paying it creates a companion expense transaction and
//! stamps `last_paid_date`. The paid/unpaid status for a month is always
//! derived from that stamp, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::dates;
use super::ids::FixedExpenseId;
use super::money::Money;

/// A recurring obligation template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpense {
    /// Unique identifier, minted by the store
    pub id: FixedExpenseId,

    /// Display name ("Arriendo", "Internet", ...)
    pub name: String,

    /// Fixed value, or a rolling estimate when the amount varies
    pub amount: Money,

    /// Whether the real amount varies month to month
    #[serde(default)]
    pub is_variable_amount: bool,

    /// Advisory due day (1-31), not validated against month length
    pub day_of_month: u8,

    /// Category applied to companion transactions
    pub category: String,

    /// When the obligation was last marked paid
    #[serde(
        with = "dates::lenient_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_paid_date: Option<DateTime<Utc>>,
}

impl FixedExpense {
    /// Whether the obligation was paid in the same calendar month as `reference`
    ///
    /// The status rolls back to unpaid at the month boundary purely by
    /// virtue of this comparison; there is no stored reset.
    pub fn is_paid_in_month(&self, reference: DateTime<Utc>) -> bool {
        match self.last_paid_date {
            Some(paid) => dates::same_calendar_month(paid, reference),
            None => false,
        }
    }

    /// Validate the stored fields
    pub fn validate(&self) -> Result<(), FixedExpenseValidationError> {
        validate_parts(&self.name, self.amount, self.day_of_month)
    }
}

impl fmt::Display for FixedExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (día {})", self.name, self.day_of_month)
    }
}

/// Input for creating a fixed expense; the store mints the id
#[derive(Debug, Clone)]
pub struct NewFixedExpense {
    pub name: String,
    pub amount: Money,
    pub is_variable_amount: bool,
    pub day_of_month: u8,
    pub category: String,
}

impl NewFixedExpense {
    /// Create a fixed-amount obligation
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        day_of_month: u8,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            is_variable_amount: false,
            day_of_month,
            category: category.into(),
        }
    }

    /// Create a variable-amount obligation; `estimate` is the rolling
    /// estimate shown before each payment
    pub fn variable(
        name: impl Into<String>,
        estimate: Money,
        day_of_month: u8,
        category: impl Into<String>,
    ) -> Self {
        let mut expense = Self::new(name, estimate, day_of_month, category);
        expense.is_variable_amount = true;
        expense
    }

    /// Validate the input before it reaches the store
    pub fn validate(&self) -> Result<(), FixedExpenseValidationError> {
        validate_parts(&self.name, self.amount, self.day_of_month)
    }

    /// Build the stored record under a minted id
    ///
    /// New obligations start unpaid.
    pub fn into_fixed_expense(self, id: FixedExpenseId) -> FixedExpense {
        FixedExpense {
            id,
            name: self.name,
            amount: self.amount,
            is_variable_amount: self.is_variable_amount,
            day_of_month: self.day_of_month,
            category: self.category,
            last_paid_date: None,
        }
    }
}

fn validate_parts(
    name: &str,
    amount: Money,
    day_of_month: u8,
) -> Result<(), FixedExpenseValidationError> {
    if name.trim().is_empty() {
        return Err(FixedExpenseValidationError::EmptyName);
    }

    if !amount.is_positive() {
        return Err(FixedExpenseValidationError::NonPositiveAmount(amount));
    }

    if !(1..=31).contains(&day_of_month) {
        return Err(FixedExpenseValidationError::DayOutOfRange(day_of_month));
    }

    Ok(())
}

/// Validation errors for fixed expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixedExpenseValidationError {
    EmptyName,
    NonPositiveAmount(Money),
    DayOutOfRange(u8),
}

impl fmt::Display for FixedExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Fixed expense name cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Fixed expense amount must be positive (got {})", amount)
            }
            Self::DayOutOfRange(day) => {
                write!(f, "Day of month must be between 1 and 31 (got {})", day)
            }
        }
    }
}

impl std::error::Error for FixedExpenseValidationError {}
