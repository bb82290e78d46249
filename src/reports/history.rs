//! Transaction history
//!
//! Compound filtering over the transaction set plus the small list views
//! a dashboard needs (recent entries, savings activity).

use crate::models::transaction::{AccountType, TransactionType};
use crate::models::Transaction;

/// Filter options for the history view
///
/// Predicates are AND-combined; an unset field matches everything.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// Case-insensitive substring on description, category, or the
    /// formatted amount
    pub search: Option<String>,
    /// Exact transaction type
    pub kind: Option<TransactionType>,
    /// Exact category name
    pub category: Option<String>,
    /// Calendar month as a "YYYY-MM" string
    pub month: Option<String>,
}

impl HistoryFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by free-text search
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Filter by transaction type
    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Filter by category name
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by calendar month ("YYYY-MM")
    pub fn month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    /// Check if a transaction matches this filter
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(ref term) = self.search {
            let term = term.to_lowercase();
            let matches_text = txn.description.to_lowercase().contains(&term)
                || txn.category.to_lowercase().contains(&term)
                || txn.amount.to_string().contains(&term);
            if !matches_text {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }

        if let Some(ref category) = self.category {
            if &txn.category != category {
                return false;
            }
        }

        if let Some(ref month) = self.month {
            if !txn.date.to_rfc3339().starts_with(month.as_str()) {
                return false;
            }
        }

        true
    }
}

/// Filtered transactions, newest first
///
/// The sort is stable, so records sharing a date keep their store order.
pub fn filter_history(transactions: &[Transaction], filter: &HistoryFilter) -> Vec<Transaction> {
    let mut matched: Vec<Transaction> = transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.date.cmp(&a.date));
    matched
}

/// The `n` most recent transactions by date
pub fn recent(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

/// Both legs of savings activity, in store order
///
/// Records on the savings account and transfer records wherever they are
/// booked; the union tolerates stored data that violates the savings
/// invariant.
pub fn savings_activity(transactions: &[Transaction]) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| {
            t.account_id == AccountType::Savings || t.kind == TransactionType::TransferToSavings
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewTransaction, TransactionId};
    use chrono::{DateTime, TimeZone, Utc};

    fn txn(
        kind: TransactionType,
        cents: i64,
        description: &str,
        category: &str,
        date: DateTime<Utc>,
    ) -> Transaction {
        let account = if kind == TransactionType::TransferToSavings {
            AccountType::Savings
        } else {
            AccountType::Debit
        };
        NewTransaction::new(kind, account, Money::from_cents(cents), description, category, date)
            .into_transaction(TransactionId::new())
    }

    fn march(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    fn sample_set() -> Vec<Transaction> {
        vec![
            txn(TransactionType::Income, 20000, "Salario marzo", "Salario", march(1)),
            txn(TransactionType::Expense, 5000, "Mercado", "Alimentación", march(5)),
            txn(
                TransactionType::Expense,
                1500,
                "Bus al centro",
                "Transporte",
                Utc.with_ymd_and_hms(2024, 2, 20, 12, 0, 0).unwrap(),
            ),
            txn(TransactionType::TransferToSavings, 3000, "Ahorro mensual", "Ahorro", march(10)),
        ]
    }

    #[test]
    fn test_default_filter_returns_all_sorted_desc() {
        let transactions = sample_set();
        let result = filter_history(&transactions, &HistoryFilter::default());

        assert_eq!(result.len(), 4);
        for pair in result.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
        assert_eq!(result[0].description, "Ahorro mensual");
        assert_eq!(result[3].description, "Bus al centro");
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let transactions = sample_set();

        let by_description = filter_history(&transactions, &HistoryFilter::new().search("MERCADO"));
        assert_eq!(by_description.len(), 1);

        let by_category = filter_history(&transactions, &HistoryFilter::new().search("transporte"));
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].description, "Bus al centro");

        // Digits match against the formatted amount
        let by_amount = filter_history(&transactions, &HistoryFilter::new().search("200.00"));
        assert_eq!(by_amount.len(), 1);
        assert_eq!(by_amount[0].description, "Salario marzo");
    }

    #[test]
    fn test_kind_and_category_filters() {
        let transactions = sample_set();

        let expenses =
            filter_history(&transactions, &HistoryFilter::new().kind(TransactionType::Expense));
        assert_eq!(expenses.len(), 2);

        let food = filter_history(&transactions, &HistoryFilter::new().category("Alimentación"));
        assert_eq!(food.len(), 1);

        // Exact category match, no substring behavior
        let partial = filter_history(&transactions, &HistoryFilter::new().category("Aliment"));
        assert!(partial.is_empty());
    }

    #[test]
    fn test_month_filter() {
        let transactions = sample_set();

        let march_only = filter_history(&transactions, &HistoryFilter::new().month("2024-03"));
        assert_eq!(march_only.len(), 3);

        let february = filter_history(&transactions, &HistoryFilter::new().month("2024-02"));
        assert_eq!(february.len(), 1);

        let empty = filter_history(&transactions, &HistoryFilter::new().month("2023-03"));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let transactions = sample_set();

        let filter = HistoryFilter::new()
            .kind(TransactionType::Expense)
            .month("2024-03");
        let result = filter_history(&transactions, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].description, "Mercado");
    }

    #[test]
    fn test_same_date_keeps_store_order() {
        let date = march(7);
        let transactions = vec![
            txn(TransactionType::Expense, 100, "primero", "Otros", date),
            txn(TransactionType::Expense, 200, "segundo", "Otros", date),
            txn(TransactionType::Expense, 300, "tercero", "Otros", date),
        ];

        let result = filter_history(&transactions, &HistoryFilter::default());
        let order: Vec<&str> = result.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, vec!["primero", "segundo", "tercero"]);
    }

    #[test]
    fn test_recent_takes_newest_n() {
        let transactions = sample_set();

        let top_two = recent(&transactions, 2);
        assert_eq!(top_two.len(), 2);
        assert_eq!(top_two[0].description, "Ahorro mensual");
        assert_eq!(top_two[1].description, "Mercado");

        let all = recent(&transactions, 50);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_savings_activity_keeps_store_order() {
        let mut transactions = sample_set();
        transactions.push(txn(TransactionType::TransferToSavings, 900, "Extra", "Ahorro", march(2)));

        let activity = savings_activity(&transactions);
        // Store order, not date order: the March 10 transfer was stored first
        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0].description, "Ahorro mensual");
        assert_eq!(activity[1].description, "Extra");
    }
}
