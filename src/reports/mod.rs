//! Reports module
//!
//! Pure derivations over snapshot data: the financial summary, filtered
//! transaction history, and fixed expense payment status.

pub mod fixed_expenses;
pub mod history;
pub mod summary;

pub use fixed_expenses::{payment_progress, payment_statuses, FixedExpenseStatus, PaymentProgress};
pub use history::{filter_history, recent, savings_activity, HistoryFilter};
pub use summary::{summarize, FinanceSummary};
