//! Storage layer
//!
//! Persistence behind a user-scoped document store trait. Records for each
//! user live in per-collection JSON documents; the bundled [`JsonStore`]
//! keeps them on the local filesystem with atomic writes.

pub mod file_io;
pub mod json_store;

pub use file_io::{read_json, write_json_atomic};
pub use json_store::JsonStore;

use crate::error::FinanceResult;
use crate::models::{
    Category, CategoryId, FixedExpense, FixedExpenseId, Loan, LoanId, NewCategory,
    NewFixedExpense, NewLoan, NewTransaction, Transaction, TransactionId, UserId,
};

/// A user-scoped document store for the four record collections
///
/// Implementations mint ids on create and return the stored record.
/// `update` and `delete` fail with a not-found error when the id is absent
/// from the user's collection; neither is an upsert.
pub trait Store {
    fn list_transactions(&self, user: &UserId) -> FinanceResult<Vec<Transaction>>;
    fn create_transaction(&self, user: &UserId, new: NewTransaction) -> FinanceResult<Transaction>;
    fn update_transaction(&self, user: &UserId, transaction: &Transaction) -> FinanceResult<()>;
    fn delete_transaction(&self, user: &UserId, id: TransactionId) -> FinanceResult<()>;

    fn list_fixed_expenses(&self, user: &UserId) -> FinanceResult<Vec<FixedExpense>>;
    fn create_fixed_expense(
        &self,
        user: &UserId,
        new: NewFixedExpense,
    ) -> FinanceResult<FixedExpense>;
    fn update_fixed_expense(&self, user: &UserId, expense: &FixedExpense) -> FinanceResult<()>;
    fn delete_fixed_expense(&self, user: &UserId, id: FixedExpenseId) -> FinanceResult<()>;

    fn list_loans(&self, user: &UserId) -> FinanceResult<Vec<Loan>>;
    fn create_loan(&self, user: &UserId, new: NewLoan) -> FinanceResult<Loan>;
    fn update_loan(&self, user: &UserId, loan: &Loan) -> FinanceResult<()>;
    fn delete_loan(&self, user: &UserId, id: LoanId) -> FinanceResult<()>;

    fn list_categories(&self, user: &UserId) -> FinanceResult<Vec<Category>>;
    fn create_category(&self, user: &UserId, new: NewCategory) -> FinanceResult<Category>;
    fn update_category(&self, user: &UserId, category: &Category) -> FinanceResult<()>;
    fn delete_category(&self, user: &UserId, id: CategoryId) -> FinanceResult<()>;
}
