//! Transaction model
//!
//! An atomic financial event in a user's ledger. Transactions are either
//! entered directly or created as companions of another operation (paying
//! a fixed expense, disbursing or collecting a loan).
//!
//! Documents are stored with camelCase field names and RFC 3339 dates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::SAVINGS_TRANSFER_CATEGORY;
use super::dates;
use super::ids::TransactionId;
use super::money::Money;

/// Kind of ledger event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money entering the household ledger
    Income,
    /// Money leaving the household ledger
    Expense,
    /// Money moved from a spending account into savings
    TransferToSavings,
}

impl TransactionType {
    /// Wire name as stored in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::TransferToSavings => "transfer_to_savings",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account a transaction is booked against
///
/// Accounts are a fixed set, not user records. The savings account is
/// special: only transfers to savings land there, and its balance is
/// tracked separately from the spendable total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Debit,
    Cash,
    Credit,
    Savings,
}

impl AccountType {
    /// All accounts in display order
    pub const ALL: [AccountType; 4] = [Self::Debit, Self::Cash, Self::Credit, Self::Savings];

    /// Wire name as stored in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Cash => "cash",
            Self::Credit => "credit",
            Self::Savings => "savings",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Debit => "Tarjeta Débito",
            Self::Cash => "Efectivo",
            Self::Credit => "Tarjeta Crédito",
            Self::Savings => "Cuenta Ahorros",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier, minted by the store
    pub id: TransactionId,

    /// Amount, always entered positive; the type decides the sign of its
    /// contribution to balances
    pub amount: Money,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Category name; membership in the resolved option list is not
    /// enforced at write time
    #[serde(default)]
    pub category: String,

    /// User-selected effective date
    #[serde(with = "dates::lenient", default = "Utc::now")]
    pub date: DateTime<Utc>,

    /// System timestamp of record creation; absent on older records
    #[serde(
        with = "dates::lenient_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    /// Kind of ledger event
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Account the event is booked against
    pub account_id: AccountType,

    /// Set on companions created by the fixed-expense engine
    #[serde(default)]
    pub is_fixed_expense: bool,
}

impl Transaction {
    /// Validate the stored fields
    ///
    /// Applied on update as well as create; `id` and `created_at` are not
    /// part of validation because they never change.
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_parts(self.amount, &self.description, self.kind, self.account_id)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount
        )
    }
}

/// Input for creating a transaction; the store mints the id
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Money,
    pub description: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
    pub kind: TransactionType,
    pub account_id: AccountType,
    pub is_fixed_expense: bool,
}

impl NewTransaction {
    /// Create a user-entered transaction effective at `date`
    pub fn new(
        kind: TransactionType,
        account_id: AccountType,
        amount: Money,
        description: impl Into<String>,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            category: category.into(),
            date,
            created_at: Some(Utc::now()),
            kind,
            account_id,
            is_fixed_expense: false,
        }
    }

    /// Create a transfer into savings
    ///
    /// The category and account are fixed for transfers; callers only
    /// choose amount, description and date.
    pub fn transfer_to_savings(
        amount: Money,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self::new(
            TransactionType::TransferToSavings,
            AccountType::Savings,
            amount,
            description,
            SAVINGS_TRANSFER_CATEGORY,
            date,
        )
    }

    /// Validate the input before it reaches the store
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_parts(self.amount, &self.description, self.kind, self.account_id)
    }

    /// Build the stored record under a minted id
    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            description: self.description,
            category: self.category,
            date: self.date,
            created_at: self.created_at,
            kind: self.kind,
            account_id: self.account_id,
            is_fixed_expense: self.is_fixed_expense,
        }
    }
}

/// The savings invariant runs in both directions: transfers only ever land
/// on the savings account, and the savings account only ever holds
/// transfers. Violations are rejected, never coerced.
fn validate_parts(
    amount: Money,
    description: &str,
    kind: TransactionType,
    account_id: AccountType,
) -> Result<(), TransactionValidationError> {
    if !amount.is_positive() {
        return Err(TransactionValidationError::NonPositiveAmount(amount));
    }

    if description.trim().is_empty() {
        return Err(TransactionValidationError::EmptyDescription);
    }

    if kind == TransactionType::TransferToSavings && account_id != AccountType::Savings {
        return Err(TransactionValidationError::TransferRequiresSavingsAccount);
    }

    if account_id == AccountType::Savings && kind != TransactionType::TransferToSavings {
        return Err(TransactionValidationError::SavingsAccountRequiresTransfer);
    }

    Ok(())
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    EmptyDescription,
    TransferRequiresSavingsAccount,
    SavingsAccountRequiresTransfer,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive (got {})", amount)
            }
            Self::EmptyDescription => write!(f, "Transaction description cannot be empty"),
            Self::TransferRequiresSavingsAccount => write!(
                f,
                "Transfers to savings must be booked against the savings account"
            ),
            Self::SavingsAccountRequiresTransfer => write!(
                f,
                "The savings account only holds transfers to savings"
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
