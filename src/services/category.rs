//! Category service
//!
//! CRUD for user-defined categories. Built-in categories are compile-time
//! constants, so only custom ones pass through here; deleting a built-in
//! is impossible by construction.

use crate::error::{FinanceError, FinanceResult};
use crate::models::category::category_options;
use crate::models::transaction::TransactionType;
use crate::models::{Category, CategoryId, NewCategory, UserId};
use crate::storage::Store;

/// Service for managing a user's custom categories
pub struct CategoryService<'a, S: Store> {
    store: &'a S,
    user: &'a UserId,
}

impl<'a, S: Store> CategoryService<'a, S> {
    /// Create a new category service
    pub fn new(store: &'a S, user: &'a UserId) -> Self {
        Self { store, user }
    }

    /// Create a custom category scoped to one transaction type
    ///
    /// The name is trimmed before storing. Duplicates are allowed at write
    /// time; option resolution deduplicates on read.
    pub fn add(&self, name: &str, kind: TransactionType) -> FinanceResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinanceError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        self.store
            .create_category(self.user, NewCategory::new(name, kind))
    }

    /// Delete a custom category by id
    ///
    /// Transactions keep their category text; nothing is relabeled.
    pub fn delete(&self, id: CategoryId) -> FinanceResult<()> {
        self.store.delete_category(self.user, id)
    }

    /// All custom categories in store order
    pub fn list(&self) -> FinanceResult<Vec<Category>> {
        self.store.list_categories(self.user)
    }

    /// Category names offered for a transaction type, built-ins included
    pub fn options(&self, kind: TransactionType) -> FinanceResult<Vec<String>> {
        let customs = self.store.list_categories(self.user)?;
        Ok(category_options(kind, &customs))
    }
}
