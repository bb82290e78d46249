//! Core data models
//!
//! This module contains the data structures that represent the finance
//! domain: transactions, fixed expenses, loans, categories, and the money
//! and id primitives they share.

pub mod category;
pub mod dates;
pub mod fixed_expense;
pub mod ids;
pub mod loan;
pub mod money;
pub mod transaction;

pub use category::{Category, NewCategory};
pub use fixed_expense::{FixedExpense, NewFixedExpense};
pub use ids::{CategoryId, FixedExpenseId, LoanId, TransactionId, UserId};
pub use loan::{Loan, NewLoan};
pub use money::Money;
pub use transaction::{AccountType, NewTransaction, Transaction, TransactionType};
