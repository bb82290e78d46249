//! Transaction service
//!
//! Validation and persistence for user-entered transactions. Companion
//! transactions from paying fixed expenses or moving loan money are
//! created by their own services, not here.

use crate::error::{FinanceError, FinanceResult};
use crate::models::{NewTransaction, Transaction, TransactionId, UserId};
use crate::storage::Store;

/// Service for managing a user's transactions
pub struct TransactionService<'a, S: Store> {
    store: &'a S,
    user: &'a UserId,
}

impl<'a, S: Store> TransactionService<'a, S> {
    /// Create a new transaction service
    pub fn new(store: &'a S, user: &'a UserId) -> Self {
        Self { store, user }
    }

    /// Validate and persist a new transaction
    pub fn add(&self, new: NewTransaction) -> FinanceResult<Transaction> {
        new.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.store.create_transaction(self.user, new)
    }

    /// Replace a stored transaction after revalidating it
    ///
    /// `id` and `created_at` are carried over untouched by callers; the
    /// record is replaced wholesale.
    pub fn update(&self, transaction: &Transaction) -> FinanceResult<()> {
        transaction
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.store.update_transaction(self.user, transaction)
    }

    /// Delete a transaction by id
    ///
    /// No cascade: deleting a companion transaction leaves the fixed
    /// expense or loan that produced it untouched.
    pub fn delete(&self, id: TransactionId) -> FinanceResult<()> {
        self.store.delete_transaction(self.user, id)
    }

    /// All transactions in store order
    pub fn list(&self) -> FinanceResult<Vec<Transaction>> {
        self.store.list_transactions(self.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorePaths;
    use crate::models::transaction::{AccountType, TransactionType};
    use crate::models::Money;
    use crate::storage::JsonStore;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, JsonStore, UserId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = JsonStore::new(paths);
        (temp_dir, store, UserId::new("user-1"))
    }

    fn sample(amount: i64, description: &str) -> NewTransaction {
        NewTransaction::new(
            TransactionType::Expense,
            AccountType::Debit,
            Money::from_cents(amount),
            description,
            "Alimentación",
            Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_add_and_list() {
        let (_temp_dir, store, user) = create_test_store();
        let service = TransactionService::new(&store, &user);

        let created = service.add(sample(5000, "Mercado")).unwrap();

        let listed = service.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
    }

    #[test]
    fn test_add_rejects_invalid_input_without_writing() {
        let (_temp_dir, store, user) = create_test_store();
        let service = TransactionService::new(&store, &user);

        let err = service.add(sample(0, "Mercado")).unwrap_err();
        assert!(err.is_validation());

        let err = service.add(sample(5000, "   ")).unwrap_err();
        assert!(err.is_validation());

        // Transfer booked against a spending account
        let mut bad = sample(5000, "Ahorro");
        bad.kind = TransactionType::TransferToSavings;
        let err = service.add(bad).unwrap_err();
        assert!(err.is_validation());

        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_update_revalidates() {
        let (_temp_dir, store, user) = create_test_store();
        let service = TransactionService::new(&store, &user);

        let mut txn = service.add(sample(5000, "Mercado")).unwrap();

        txn.amount = Money::from_cents(-100);
        let err = service.update(&txn).unwrap_err();
        assert!(err.is_validation());

        txn.amount = Money::from_cents(7500);
        txn.description = "Mercado semanal".to_string();
        service.update(&txn).unwrap();

        let listed = service.list().unwrap();
        assert_eq!(listed[0].amount, Money::from_cents(7500));
        assert_eq!(listed[0].description, "Mercado semanal");
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, store, user) = create_test_store();
        let service = TransactionService::new(&store, &user);

        let txn = service.add(sample(5000, "Mercado")).unwrap();
        service.delete(txn.id).unwrap();
        assert!(service.list().unwrap().is_empty());

        let err = service.delete(txn.id).unwrap_err();
        assert!(err.is_not_found());
    }
}
