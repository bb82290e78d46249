//! Finanzas - Personal finance tracking for everyday money
//!
//! This library is the core of the Finanzas personal finance tracker. It
//! records income, expenses and savings transfers across a small fixed set
//! of accounts, tracks recurring obligations and informal loans to friends
//! and family, and derives balances and monthly figures from the raw
//! transaction log. Every derived movement, a paid obligation, a loan
//! disbursement, a repayment, lands in the same ledger as an ordinary
//! transaction.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory and per-user path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, fixed expenses, loans, categories)
//! - `storage`: Per-user JSON document storage
//! - `services`: Business logic layer
//! - `reports`: Derived views over stored data
//! - `session`: Per-user facade tying the layers together
//!
//! # Example
//!
//! ```rust,ignore
//! use finanzas::session::FinanceSession;
//! use finanzas::storage::JsonStore;
//! use finanzas::models::UserId;
//!
//! let store = JsonStore::open_default()?;
//! let mut session = FinanceSession::open(store, UserId::new("user-1"))?;
//! let summary = session.summary();
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
pub use session::FinanceSession;
