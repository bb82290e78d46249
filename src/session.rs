//! Session facade
//!
//! A `FinanceSession` is the per-user entry point: it owns the store
//! handle and an in-memory snapshot of the four collections. Every
//! mutation goes through the store and then reloads the snapshot
//! wholesale, so derived views always reflect what the store holds.
//!
//! Sessions are created at sign-in and dropped at sign-out; switching
//! users means building a new session, never mutating one in place.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{FinanceError, FinanceResult};
use crate::models::category::category_options;
use crate::models::transaction::{AccountType, TransactionType};
use crate::models::{
    Category, CategoryId, FixedExpense, FixedExpenseId, Loan, LoanId, Money, NewFixedExpense,
    NewTransaction, Transaction, TransactionId, UserId,
};
use crate::reports::{
    self, FinanceSummary, FixedExpenseStatus, HistoryFilter, PaymentProgress,
};
use crate::services::{
    CategoryService, FixedExpenseService, LoanService, TransactionService,
};
use crate::storage::Store;

/// A signed-in user's view over their finance data
pub struct FinanceSession<S: Store> {
    store: S,
    user: UserId,
    transactions: Vec<Transaction>,
    fixed_expenses: Vec<FixedExpense>,
    loans: Vec<Loan>,
    categories: Vec<Category>,
}

impl<S: Store> FinanceSession<S> {
    /// Open a session for a user, loading all four collections
    ///
    /// All-or-nothing: any load failure aborts the open.
    pub fn open(store: S, user: UserId) -> FinanceResult<Self> {
        let mut session = Self {
            store,
            user,
            transactions: Vec::new(),
            fixed_expenses: Vec::new(),
            loans: Vec::new(),
            categories: Vec::new(),
        };
        session.refresh()?;
        Ok(session)
    }

    /// Reload the snapshot from the store
    ///
    /// All four collections are loaded before any of them is swapped in;
    /// a failed load leaves the previous snapshot intact.
    pub fn refresh(&mut self) -> FinanceResult<()> {
        let transactions = self.store.list_transactions(&self.user)?;
        let fixed_expenses = self.store.list_fixed_expenses(&self.user)?;
        let loans = self.store.list_loans(&self.user)?;
        let categories = self.store.list_categories(&self.user)?;

        debug!(
            user = %self.user,
            transactions = transactions.len(),
            fixed_expenses = fixed_expenses.len(),
            loans = loans.len(),
            categories = categories.len(),
            "snapshot refreshed"
        );

        self.transactions = transactions;
        self.fixed_expenses = fixed_expenses;
        self.loans = loans;
        self.categories = categories;
        Ok(())
    }

    // === Snapshot accessors ===

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn fixed_expenses(&self) -> &[FixedExpense] {
        &self.fixed_expenses
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    // === Transactions ===

    /// Record a transaction and refresh the snapshot
    pub fn add_transaction(&mut self, new: NewTransaction) -> FinanceResult<Transaction> {
        let transaction = TransactionService::new(&self.store, &self.user).add(new)?;
        self.refresh()?;
        Ok(transaction)
    }

    /// Replace a transaction present in the snapshot
    pub fn update_transaction(&mut self, transaction: &Transaction) -> FinanceResult<()> {
        if !self.transactions.iter().any(|t| t.id == transaction.id) {
            return Err(FinanceError::transaction_not_found(
                transaction.id.to_string(),
            ));
        }

        TransactionService::new(&self.store, &self.user).update(transaction)?;
        self.refresh()
    }

    /// Delete a transaction present in the snapshot
    pub fn delete_transaction(&mut self, id: TransactionId) -> FinanceResult<()> {
        if !self.transactions.iter().any(|t| t.id == id) {
            return Err(FinanceError::transaction_not_found(id.to_string()));
        }

        TransactionService::new(&self.store, &self.user).delete(id)?;
        self.refresh()
    }

    // === Fixed expenses ===

    /// Create an obligation template and refresh the snapshot
    pub fn add_fixed_expense(&mut self, new: NewFixedExpense) -> FinanceResult<FixedExpense> {
        let expense = FixedExpenseService::new(&self.store, &self.user).add(new)?;
        self.refresh()?;
        Ok(expense)
    }

    /// Replace a template present in the snapshot
    pub fn update_fixed_expense(&mut self, expense: &FixedExpense) -> FinanceResult<()> {
        if !self.fixed_expenses.iter().any(|e| e.id == expense.id) {
            return Err(FinanceError::fixed_expense_not_found(expense.id.to_string()));
        }

        FixedExpenseService::new(&self.store, &self.user).update(expense)?;
        self.refresh()
    }

    /// Delete a template present in the snapshot
    pub fn delete_fixed_expense(&mut self, id: FixedExpenseId) -> FinanceResult<()> {
        if !self.fixed_expenses.iter().any(|e| e.id == id) {
            return Err(FinanceError::fixed_expense_not_found(id.to_string()));
        }

        FixedExpenseService::new(&self.store, &self.user).delete(id)?;
        self.refresh()
    }

    /// Mark an obligation paid and book its companion transaction
    ///
    /// For variable-amount templates `override_amount` is required and
    /// becomes the booked amount; fixed templates ignore it.
    pub fn mark_fixed_expense_paid(
        &mut self,
        id: FixedExpenseId,
        override_amount: Option<Money>,
    ) -> FinanceResult<(FixedExpense, Transaction)> {
        let expense = self
            .fixed_expenses
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| FinanceError::fixed_expense_not_found(id.to_string()))?
            .clone();

        let result = FixedExpenseService::new(&self.store, &self.user)
            .mark_paid(&expense, override_amount)?;
        self.refresh()?;
        Ok(result)
    }

    // === Loans ===

    /// Lend money and book the disbursement transaction
    pub fn add_loan(
        &mut self,
        person_name: &str,
        amount_lent: Money,
        description: Option<String>,
    ) -> FinanceResult<(Loan, Transaction)> {
        let result =
            LoanService::new(&self.store, &self.user).disburse(person_name, amount_lent, description)?;
        self.refresh()?;
        Ok(result)
    }

    /// Record a repayment and book the collection transaction
    pub fn collect_loan(
        &mut self,
        id: LoanId,
        amount: Money,
    ) -> FinanceResult<(Loan, Transaction)> {
        let loan = self
            .loans
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| FinanceError::loan_not_found(id.to_string()))?
            .clone();

        let result = LoanService::new(&self.store, &self.user).collect(&loan, amount)?;
        self.refresh()?;
        Ok(result)
    }

    /// Delete a loan present in the snapshot
    ///
    /// Its companion transactions stay in the ledger.
    pub fn delete_loan(&mut self, id: LoanId) -> FinanceResult<()> {
        if !self.loans.iter().any(|l| l.id == id) {
            return Err(FinanceError::loan_not_found(id.to_string()));
        }

        LoanService::new(&self.store, &self.user).delete(id)?;
        self.refresh()
    }

    // === Categories ===

    /// Create a custom category for one transaction type
    pub fn add_category(&mut self, name: &str, kind: TransactionType) -> FinanceResult<Category> {
        let category = CategoryService::new(&self.store, &self.user).add(name, kind)?;
        self.refresh()?;
        Ok(category)
    }

    /// Delete a custom category present in the snapshot
    pub fn delete_category(&mut self, id: CategoryId) -> FinanceResult<()> {
        if !self.categories.iter().any(|c| c.id == id) {
            return Err(FinanceError::category_not_found(id.to_string()));
        }

        CategoryService::new(&self.store, &self.user).delete(id)?;
        self.refresh()
    }

    // === Derived views ===

    /// Headline figures over the current snapshot
    pub fn summary(&self) -> FinanceSummary {
        reports::summarize(&self.transactions, Utc::now())
    }

    /// Category names offered for a transaction type
    pub fn category_options(&self, kind: TransactionType) -> Vec<String> {
        category_options(kind, &self.categories)
    }

    /// Filtered transaction history, newest first
    pub fn history(&self, filter: &HistoryFilter) -> Vec<Transaction> {
        reports::filter_history(&self.transactions, filter)
    }

    /// Obligation statuses for the current month, in display order
    pub fn fixed_expense_statuses(&self) -> Vec<FixedExpenseStatus> {
        reports::payment_statuses(&self.fixed_expenses, Utc::now())
    }

    /// Paid/total progress over this month's obligations
    pub fn payment_progress(&self) -> PaymentProgress {
        reports::payment_progress(&self.fixed_expenses, Utc::now())
    }

    /// Both legs of savings activity, in store order
    pub fn savings_activity(&self) -> Vec<Transaction> {
        reports::savings_activity(&self.transactions)
    }

    /// The `n` most recent transactions
    pub fn recent(&self, n: usize) -> Vec<Transaction> {
        reports::recent(&self.transactions, n)
    }

    /// Start a rapid-entry run over this session
    pub fn batch_entry(&mut self, template: BatchTemplate) -> BatchEntry<'_, S> {
        BatchEntry {
            session: self,
            template,
            entries: Vec::new(),
        }
    }
}

/// Field values retained between rapid-entry submissions
#[derive(Debug, Clone)]
pub struct BatchTemplate {
    pub date: DateTime<Utc>,
    pub kind: TransactionType,
    pub category: String,
    pub account_id: AccountType,
}

impl BatchTemplate {
    pub fn new(
        date: DateTime<Utc>,
        kind: TransactionType,
        category: impl Into<String>,
        account_id: AccountType,
    ) -> Self {
        Self {
            date,
            kind,
            category: category.into(),
            account_id,
        }
    }
}

/// Rapid-entry helper for several similar transactions in a row
///
/// Each submission is an ordinary validated create; only description and
/// amount change between them, the template carries the rest. Submitted
/// transactions are echoed newest-first in an ephemeral list that lives
/// only as long as the helper.
pub struct BatchEntry<'s, S: Store> {
    session: &'s mut FinanceSession<S>,
    template: BatchTemplate,
    entries: Vec<Transaction>,
}

impl<'s, S: Store> BatchEntry<'s, S> {
    /// Persist one entry built from the template
    ///
    /// A transfer template forces the savings category and account, the
    /// same coercion the single-entry form applies.
    pub fn submit(&mut self, description: &str, amount: Money) -> FinanceResult<Transaction> {
        let new = if self.template.kind == TransactionType::TransferToSavings {
            NewTransaction::transfer_to_savings(amount, description, self.template.date)
        } else {
            NewTransaction::new(
                self.template.kind,
                self.template.account_id,
                amount,
                description,
                self.template.category.clone(),
                self.template.date,
            )
        };

        let transaction = self.session.add_transaction(new)?;
        self.entries.insert(0, transaction.clone());
        Ok(transaction)
    }

    /// This run's submissions, newest first
    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn template(&self) -> &BatchTemplate {
        &self.template
    }

    /// Adjust the retained fields mid-run
    pub fn template_mut(&mut self) -> &mut BatchTemplate {
        &mut self.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorePaths;
    use crate::models::Money;
    use crate::storage::JsonStore;
    use tempfile::TempDir;

    fn open_test_session() -> (TempDir, FinanceSession<JsonStore>) {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = JsonStore::new(paths);
        let session = FinanceSession::open(store, UserId::new("user-1")).unwrap();
        (temp_dir, session)
    }

    fn expense_now(cents: i64, description: &str) -> NewTransaction {
        NewTransaction::new(
            TransactionType::Expense,
            AccountType::Debit,
            Money::from_cents(cents),
            description,
            "Alimentación",
            Utc::now(),
        )
    }

    #[test]
    fn test_open_empty() {
        let (_temp_dir, session) = open_test_session();

        assert!(session.transactions().is_empty());
        assert!(session.fixed_expenses().is_empty());
        assert!(session.loans().is_empty());
        assert!(session.categories().is_empty());
        assert_eq!(session.summary(), FinanceSummary::default());
    }

    #[test]
    fn test_add_transaction_refreshes_snapshot_and_summary() {
        let (_temp_dir, mut session) = open_test_session();

        session.add_transaction(expense_now(5000, "Mercado")).unwrap();
        let income = NewTransaction::new(
            TransactionType::Income,
            AccountType::Debit,
            Money::from_cents(20000),
            "Salario",
            "Salario",
            Utc::now(),
        );
        session.add_transaction(income).unwrap();

        assert_eq!(session.transactions().len(), 2);

        let summary = session.summary();
        assert_eq!(summary.total_balance, Money::from_cents(15000));
        assert_eq!(summary.monthly_income, Money::from_cents(20000));
        assert_eq!(summary.monthly_expense, Money::from_cents(5000));
    }

    #[test]
    fn test_update_and_delete_require_snapshot_presence() {
        let (_temp_dir, mut session) = open_test_session();

        let phantom = expense_now(100, "fantasma").into_transaction(TransactionId::new());
        let err = session.update_transaction(&phantom).unwrap_err();
        assert!(err.is_not_found());

        let err = session.delete_transaction(phantom.id).unwrap_err();
        assert!(err.is_not_found());

        let mut txn = session.add_transaction(expense_now(5000, "Mercado")).unwrap();
        txn.amount = Money::from_cents(6000);
        session.update_transaction(&txn).unwrap();
        assert_eq!(session.transactions()[0].amount, Money::from_cents(6000));

        session.delete_transaction(txn.id).unwrap();
        assert!(session.transactions().is_empty());
    }

    #[test]
    fn test_mark_fixed_expense_paid_flow() {
        let (_temp_dir, mut session) = open_test_session();

        let expense = session
            .add_fixed_expense(NewFixedExpense::new(
                "Arriendo",
                Money::from_cents(80000000),
                5,
                "Vivienda",
            ))
            .unwrap();

        let statuses = session.fixed_expense_statuses();
        assert!(!statuses[0].is_paid);

        session.mark_fixed_expense_paid(expense.id, None).unwrap();

        let statuses = session.fixed_expense_statuses();
        assert!(statuses[0].is_paid);

        // Companion transaction landed in the snapshot
        assert_eq!(session.transactions().len(), 1);
        assert!(session.transactions()[0].is_fixed_expense);

        let progress = session.payment_progress();
        assert_eq!(progress.paid, 1);
        assert_eq!(progress.total, 1);

        // Second attempt this month is rejected
        let err = session.mark_fixed_expense_paid(expense.id, None).unwrap_err();
        assert!(matches!(err, FinanceError::AlreadyPaid(_)));
    }

    #[test]
    fn test_loan_flow() {
        let (_temp_dir, mut session) = open_test_session();

        let (loan, _) = session
            .add_loan("Carlos", Money::from_cents(100000), None)
            .unwrap();
        assert_eq!(session.loans().len(), 1);
        assert_eq!(session.transactions().len(), 1);

        let (updated, _) = session.collect_loan(loan.id, Money::from_cents(40000)).unwrap();
        assert_eq!(updated.amount_repaid, Money::from_cents(40000));
        assert!(!updated.is_fully_paid);
        assert_eq!(session.transactions().len(), 2);

        session.delete_loan(loan.id).unwrap();
        assert!(session.loans().is_empty());
        // Ledger entries survive the loan record
        assert_eq!(session.transactions().len(), 2);
    }

    #[test]
    fn test_category_options_follow_mutations() {
        let (_temp_dir, mut session) = open_test_session();

        let before = session.category_options(TransactionType::Expense);
        assert!(!before.contains(&"Mascotas".to_string()));

        let category = session.add_category("Mascotas", TransactionType::Expense).unwrap();
        let after = session.category_options(TransactionType::Expense);
        assert!(after.contains(&"Mascotas".to_string()));

        session.delete_category(category.id).unwrap();
        let restored = session.category_options(TransactionType::Expense);
        assert_eq!(restored, before);
    }

    #[test]
    fn test_batch_entry_retains_template_and_echoes() {
        let (_temp_dir, mut session) = open_test_session();

        let template = BatchTemplate::new(
            Utc::now(),
            TransactionType::Expense,
            "Alimentación",
            AccountType::Cash,
        );

        let mut batch = session.batch_entry(template);
        batch.submit("Mercado", Money::from_cents(5000)).unwrap();
        batch.submit("Farmacia", Money::from_cents(1200)).unwrap();

        // Newest first
        let echoed: Vec<&str> = batch.entries().iter().map(|t| t.description.as_str()).collect();
        assert_eq!(echoed, vec!["Farmacia", "Mercado"]);
        assert_eq!(batch.entries()[0].account_id, AccountType::Cash);

        drop(batch);
        assert_eq!(session.transactions().len(), 2);
    }

    #[test]
    fn test_batch_entry_transfer_forces_savings_fields() {
        let (_temp_dir, mut session) = open_test_session();

        // Whatever category and account the template carries, a transfer
        // lands on the savings account under the transfer category
        let template = BatchTemplate::new(
            Utc::now(),
            TransactionType::TransferToSavings,
            "Alimentación",
            AccountType::Debit,
        );

        let mut batch = session.batch_entry(template);
        let transaction = batch.submit("Ahorro mensual", Money::from_cents(3000)).unwrap();

        assert_eq!(transaction.account_id, AccountType::Savings);
        assert_eq!(transaction.category, "Ahorro");

        drop(batch);
        assert_eq!(session.savings_activity().len(), 1);
        assert_eq!(session.summary().savings_balance, Money::from_cents(3000));
    }

    #[test]
    fn test_batch_entry_rejects_invalid_submission() {
        let (_temp_dir, mut session) = open_test_session();

        let template = BatchTemplate::new(
            Utc::now(),
            TransactionType::Expense,
            "Alimentación",
            AccountType::Debit,
        );

        let mut batch = session.batch_entry(template);
        let err = batch.submit("", Money::from_cents(5000)).unwrap_err();
        assert!(err.is_validation());

        let err = batch.submit("Mercado", Money::zero()).unwrap_err();
        assert!(err.is_validation());

        // Failed submissions are not echoed
        assert!(batch.entries().is_empty());
    }

    #[test]
    fn test_recent_via_session() {
        let (_temp_dir, mut session) = open_test_session();

        for i in 1..=7 {
            session
                .add_transaction(expense_now(1000 * i, &format!("gasto {}", i)))
                .unwrap();
        }

        let recent = session.recent(5);
        assert_eq!(recent.len(), 5);
    }
}
