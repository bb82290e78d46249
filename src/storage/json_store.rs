//! JSON file implementation of the document store
//!
//! One document per user per collection under `users/{user_id}/`. Every
//! mutation reloads the owning document, applies the change, and rewrites
//! the file atomically, so a crash mid-write never leaves a half-updated
//! file.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::StorePaths;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    Category, CategoryId, FixedExpense, FixedExpenseId, Loan, LoanId, NewCategory,
    NewFixedExpense, NewLoan, NewTransaction, Transaction, TransactionId, UserId,
};

use super::file_io::{read_json, write_json_atomic};
use super::Store;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TransactionsDoc {
    transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixedExpensesDoc {
    fixed_expenses: Vec<FixedExpense>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LoansDoc {
    loans: Vec<Loan>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CategoriesDoc {
    categories: Vec<Category>,
}

/// Local filesystem store keeping each user's collections as JSON files
pub struct JsonStore {
    paths: StorePaths,
}

impl JsonStore {
    /// Create a store over an explicit path layout
    pub fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    /// Create a store at the platform default location
    pub fn open_default() -> FinanceResult<Self> {
        Ok(Self::new(StorePaths::new()?))
    }

    /// Path layout in use
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    fn load_transactions(&self, user: &UserId) -> FinanceResult<TransactionsDoc> {
        read_json(self.paths.transactions_file(user))
    }

    fn save_transactions(&self, user: &UserId, doc: &TransactionsDoc) -> FinanceResult<()> {
        debug!(user = %user, count = doc.transactions.len(), "writing transactions document");
        write_json_atomic(self.paths.transactions_file(user), doc)
    }

    fn load_fixed_expenses(&self, user: &UserId) -> FinanceResult<FixedExpensesDoc> {
        read_json(self.paths.fixed_expenses_file(user))
    }

    fn save_fixed_expenses(&self, user: &UserId, doc: &FixedExpensesDoc) -> FinanceResult<()> {
        debug!(user = %user, count = doc.fixed_expenses.len(), "writing fixed expenses document");
        write_json_atomic(self.paths.fixed_expenses_file(user), doc)
    }

    fn load_loans(&self, user: &UserId) -> FinanceResult<LoansDoc> {
        read_json(self.paths.loans_file(user))
    }

    fn save_loans(&self, user: &UserId, doc: &LoansDoc) -> FinanceResult<()> {
        debug!(user = %user, count = doc.loans.len(), "writing loans document");
        write_json_atomic(self.paths.loans_file(user), doc)
    }

    fn load_categories(&self, user: &UserId) -> FinanceResult<CategoriesDoc> {
        read_json(self.paths.categories_file(user))
    }

    fn save_categories(&self, user: &UserId, doc: &CategoriesDoc) -> FinanceResult<()> {
        debug!(user = %user, count = doc.categories.len(), "writing categories document");
        write_json_atomic(self.paths.categories_file(user), doc)
    }
}

impl Store for JsonStore {
    fn list_transactions(&self, user: &UserId) -> FinanceResult<Vec<Transaction>> {
        Ok(self.load_transactions(user)?.transactions)
    }

    fn create_transaction(&self, user: &UserId, new: NewTransaction) -> FinanceResult<Transaction> {
        let mut doc = self.load_transactions(user)?;
        let transaction = new.into_transaction(TransactionId::new());
        doc.transactions.push(transaction.clone());
        self.save_transactions(user, &doc)?;
        Ok(transaction)
    }

    fn update_transaction(&self, user: &UserId, transaction: &Transaction) -> FinanceResult<()> {
        let mut doc = self.load_transactions(user)?;
        let slot = doc
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction.id)
            .ok_or_else(|| FinanceError::transaction_not_found(transaction.id.to_string()))?;
        *slot = transaction.clone();
        self.save_transactions(user, &doc)
    }

    fn delete_transaction(&self, user: &UserId, id: TransactionId) -> FinanceResult<()> {
        let mut doc = self.load_transactions(user)?;
        let before = doc.transactions.len();
        doc.transactions.retain(|t| t.id != id);
        if doc.transactions.len() == before {
            return Err(FinanceError::transaction_not_found(id.to_string()));
        }
        self.save_transactions(user, &doc)
    }

    fn list_fixed_expenses(&self, user: &UserId) -> FinanceResult<Vec<FixedExpense>> {
        Ok(self.load_fixed_expenses(user)?.fixed_expenses)
    }

    fn create_fixed_expense(
        &self,
        user: &UserId,
        new: NewFixedExpense,
    ) -> FinanceResult<FixedExpense> {
        let mut doc = self.load_fixed_expenses(user)?;
        let expense = new.into_fixed_expense(FixedExpenseId::new());
        doc.fixed_expenses.push(expense.clone());
        self.save_fixed_expenses(user, &doc)?;
        Ok(expense)
    }

    fn update_fixed_expense(&self, user: &UserId, expense: &FixedExpense) -> FinanceResult<()> {
        let mut doc = self.load_fixed_expenses(user)?;
        let slot = doc
            .fixed_expenses
            .iter_mut()
            .find(|e| e.id == expense.id)
            .ok_or_else(|| FinanceError::fixed_expense_not_found(expense.id.to_string()))?;
        *slot = expense.clone();
        self.save_fixed_expenses(user, &doc)
    }

    fn delete_fixed_expense(&self, user: &UserId, id: FixedExpenseId) -> FinanceResult<()> {
        let mut doc = self.load_fixed_expenses(user)?;
        let before = doc.fixed_expenses.len();
        doc.fixed_expenses.retain(|e| e.id != id);
        if doc.fixed_expenses.len() == before {
            return Err(FinanceError::fixed_expense_not_found(id.to_string()));
        }
        self.save_fixed_expenses(user, &doc)
    }

    fn list_loans(&self, user: &UserId) -> FinanceResult<Vec<Loan>> {
        Ok(self.load_loans(user)?.loans)
    }

    fn create_loan(&self, user: &UserId, new: NewLoan) -> FinanceResult<Loan> {
        let mut doc = self.load_loans(user)?;
        let loan = new.into_loan(LoanId::new());
        doc.loans.push(loan.clone());
        self.save_loans(user, &doc)?;
        Ok(loan)
    }

    fn update_loan(&self, user: &UserId, loan: &Loan) -> FinanceResult<()> {
        let mut doc = self.load_loans(user)?;
        let slot = doc
            .loans
            .iter_mut()
            .find(|l| l.id == loan.id)
            .ok_or_else(|| FinanceError::loan_not_found(loan.id.to_string()))?;
        *slot = loan.clone();
        self.save_loans(user, &doc)
    }

    fn delete_loan(&self, user: &UserId, id: LoanId) -> FinanceResult<()> {
        let mut doc = self.load_loans(user)?;
        let before = doc.loans.len();
        doc.loans.retain(|l| l.id != id);
        if doc.loans.len() == before {
            return Err(FinanceError::loan_not_found(id.to_string()));
        }
        self.save_loans(user, &doc)
    }

    fn list_categories(&self, user: &UserId) -> FinanceResult<Vec<Category>> {
        Ok(self.load_categories(user)?.categories)
    }

    fn create_category(&self, user: &UserId, new: NewCategory) -> FinanceResult<Category> {
        let mut doc = self.load_categories(user)?;
        let category = new.into_category(CategoryId::new());
        doc.categories.push(category.clone());
        self.save_categories(user, &doc)?;
        Ok(category)
    }

    fn update_category(&self, user: &UserId, category: &Category) -> FinanceResult<()> {
        let mut doc = self.load_categories(user)?;
        let slot = doc
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| FinanceError::category_not_found(category.id.to_string()))?;
        *slot = category.clone();
        self.save_categories(user, &doc)
    }

    fn delete_category(&self, user: &UserId, id: CategoryId) -> FinanceResult<()> {
        let mut doc = self.load_categories(user)?;
        let before = doc.categories.len();
        doc.categories.retain(|c| c.id != id);
        if doc.categories.len() == before {
            return Err(FinanceError::category_not_found(id.to_string()));
        }
        self.save_categories(user, &doc)
    }
}
