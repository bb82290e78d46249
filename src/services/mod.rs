//! Service layer
//!
//! Business logic on top of the store: validation, domain-state checks,
//! and the companion-transaction operations that keep the ledger in step
//! with fixed expenses and loans.

pub mod category;
pub mod fixed_expense;
pub mod loan;
pub mod transaction;

pub use category::CategoryService;
pub use fixed_expense::FixedExpenseService;
pub use loan::LoanService;
pub use transaction::TransactionService;
