//! Loan service
//!
//! Disbursement and collection of informal loans. Each money movement
//! books a companion transaction so the ledger and the loan record stay
//! in step: an expense when the money leaves, an income per collection.

use chrono::Utc;
use tracing::warn;

use crate::error::{FinanceError, FinanceResult};
use crate::models::category::{LOAN_CATEGORY, LOAN_COLLECTION_CATEGORY};
use crate::models::transaction::{AccountType, TransactionType};
use crate::models::{Loan, LoanId, Money, NewLoan, NewTransaction, Transaction, UserId};
use crate::storage::Store;

/// Service for managing a user's loans
pub struct LoanService<'a, S: Store> {
    store: &'a S,
    user: &'a UserId,
}

impl<'a, S: Store> LoanService<'a, S> {
    /// Create a new loan service
    pub fn new(store: &'a S, user: &'a UserId) -> Self {
        Self { store, user }
    }

    /// Lend money to a person
    ///
    /// Creates the loan record, then books a companion expense against the
    /// debit account for the full principal, dated at disbursement. The
    /// companion write comes second; on failure the loan stands without a
    /// ledger entry, logged and propagated.
    pub fn disburse(
        &self,
        person_name: &str,
        amount_lent: Money,
        description: Option<String>,
    ) -> FinanceResult<(Loan, Transaction)> {
        if person_name.trim().is_empty() {
            return Err(FinanceError::Validation(
                "Loan person name cannot be empty".into(),
            ));
        }
        if !amount_lent.is_positive() {
            return Err(FinanceError::Validation(format!(
                "Loan amount must be positive (got {})",
                amount_lent
            )));
        }

        let loan = self
            .store
            .create_loan(self.user, NewLoan::new(person_name, amount_lent, description))?;

        let mut companion = NewTransaction::new(
            TransactionType::Expense,
            AccountType::Debit,
            amount_lent,
            format!("Préstamo a: {}", loan.person_name),
            LOAN_CATEGORY,
            loan.date_lent,
        );
        companion.created_at = Some(loan.date_lent);

        match self.store.create_transaction(self.user, companion) {
            Ok(transaction) => Ok((loan, transaction)),
            Err(err) => {
                warn!(
                    loan = %loan.id,
                    user = %self.user,
                    error = %err,
                    "loan created but disbursement transaction failed"
                );
                Err(err)
            }
        }
    }

    /// Record a repayment against a loan
    ///
    /// The repaid total accumulates without clamping and the settled flag
    /// is recomputed; a companion income transaction is booked against the
    /// debit account. Settled loans reject further collections.
    pub fn collect(&self, loan: &Loan, amount: Money) -> FinanceResult<(Loan, Transaction)> {
        if !amount.is_positive() {
            return Err(FinanceError::Validation(format!(
                "Collection amount must be positive (got {})",
                amount
            )));
        }
        if loan.is_fully_paid {
            return Err(FinanceError::AlreadySettled(loan.person_name.clone()));
        }

        let now = Utc::now();
        let mut updated = loan.clone();
        updated.record_repayment(amount);
        self.store.update_loan(self.user, &updated)?;

        let mut companion = NewTransaction::new(
            TransactionType::Income,
            AccountType::Debit,
            amount,
            format!("Cobro préstamo: {}", loan.person_name),
            LOAN_COLLECTION_CATEGORY,
            now,
        );
        companion.created_at = Some(now);

        match self.store.create_transaction(self.user, companion) {
            Ok(transaction) => Ok((updated, transaction)),
            Err(err) => {
                warn!(
                    loan = %updated.id,
                    user = %self.user,
                    error = %err,
                    "repayment recorded but collection transaction failed"
                );
                Err(err)
            }
        }
    }

    /// Delete a loan by id
    ///
    /// Companion transactions already booked from it stay in the ledger.
    pub fn delete(&self, id: LoanId) -> FinanceResult<()> {
        self.store.delete_loan(self.user, id)
    }

    /// All loans in store order
    pub fn list(&self) -> FinanceResult<Vec<Loan>> {
        self.store.list_loans(self.user)
    }
}
