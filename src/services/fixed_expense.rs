//! Fixed expense service
//!
//! CRUD for recurring obligation templates plus the mark-paid operation,
//! which stamps the template and books a companion expense transaction.

use chrono::Utc;
use tracing::warn;

use crate::error::{FinanceError, FinanceResult};
use crate::models::transaction::{AccountType, TransactionType};
use crate::models::{FixedExpense, FixedExpenseId, Money, NewFixedExpense, NewTransaction, Transaction, UserId};
use crate::storage::Store;

/// Service for managing a user's fixed expenses
pub struct FixedExpenseService<'a, S: Store> {
    store: &'a S,
    user: &'a UserId,
}

impl<'a, S: Store> FixedExpenseService<'a, S> {
    /// Create a new fixed expense service
    pub fn new(store: &'a S, user: &'a UserId) -> Self {
        Self { store, user }
    }

    /// Validate and persist a new obligation template
    pub fn add(&self, new: NewFixedExpense) -> FinanceResult<FixedExpense> {
        new.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.store.create_fixed_expense(self.user, new)
    }

    /// Replace a stored template after revalidating it
    pub fn update(&self, expense: &FixedExpense) -> FinanceResult<()> {
        expense
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.store.update_fixed_expense(self.user, expense)
    }

    /// Delete a template by id
    ///
    /// Companion transactions already booked from it stay in the ledger.
    pub fn delete(&self, id: FixedExpenseId) -> FinanceResult<()> {
        self.store.delete_fixed_expense(self.user, id)
    }

    /// All templates in store order
    pub fn list(&self) -> FinanceResult<Vec<FixedExpense>> {
        self.store.list_fixed_expenses(self.user)
    }

    /// Mark an obligation paid for the current month
    ///
    /// Books a companion expense transaction against the debit account for
    /// the template's amount, or for `override_amount` when the template is
    /// variable (required there, ignored otherwise).
    ///
    /// Two writes in a fixed order: the paid stamp first, the companion
    /// transaction second. A failure in between leaves the template marked
    /// paid with no ledger entry; that window is logged and the error
    /// propagated, never retried.
    pub fn mark_paid(
        &self,
        expense: &FixedExpense,
        override_amount: Option<Money>,
    ) -> FinanceResult<(FixedExpense, Transaction)> {
        let now = Utc::now();

        if expense.is_paid_in_month(now) {
            return Err(FinanceError::AlreadyPaid(expense.name.clone()));
        }

        let amount = if expense.is_variable_amount {
            match override_amount {
                Some(amount) if amount.is_positive() => amount,
                Some(amount) => {
                    return Err(FinanceError::Validation(format!(
                        "Payment amount must be positive (got {})",
                        amount
                    )))
                }
                None => {
                    return Err(FinanceError::Validation(format!(
                        "'{}' has a variable amount; a payment amount is required",
                        expense.name
                    )))
                }
            }
        } else {
            expense.amount
        };

        let mut paid = expense.clone();
        paid.last_paid_date = Some(now);
        self.store.update_fixed_expense(self.user, &paid)?;

        let mut companion = NewTransaction::new(
            TransactionType::Expense,
            AccountType::Debit,
            amount,
            format!("Pago recurrente: {}", expense.name),
            expense.category.clone(),
            now,
        );
        companion.created_at = Some(now);
        companion.is_fixed_expense = true;

        match self.store.create_transaction(self.user, companion) {
            Ok(transaction) => Ok((paid, transaction)),
            Err(err) => {
                warn!(
                    expense = %paid.id,
                    user = %self.user,
                    error = %err,
                    "fixed expense marked paid but companion transaction failed"
                );
                Err(err)
            }
        }
    }
}
