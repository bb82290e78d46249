//! Category model and option resolution
//!
//! Each transaction type has a fixed built-in category set; users extend a
//! set with custom categories scoped to the same type. Pickers always see
//! the merged union, deduplicated and sorted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::ids::CategoryId;
use super::transaction::TransactionType;

/// Built-in categories for income transactions
pub const INCOME_CATEGORIES: &[&str] = &["Salario", "Freelance", "Venta", "Regalo", "Otros"];

/// Built-in categories for expense transactions
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Alimentación",
    "Transporte",
    "Vivienda",
    "Servicios",
    "Ocio",
    "Salud",
    "Educación",
    "Compras",
    "Otros",
];

/// Built-in categories for transfers to savings
pub const SAVINGS_CATEGORIES: &[&str] = &[
    "Ahorro General",
    "Fondo de Emergencia",
    "Meta Específica",
];

/// Category stamped on loan disbursement transactions
pub const LOAN_CATEGORY: &str = "Préstamos";

/// Category stamped on loan collection transactions
pub const LOAN_COLLECTION_CATEGORY: &str = "Cobro Préstamos";

/// Category forced onto quick-entry transfers to savings
pub const SAVINGS_TRANSFER_CATEGORY: &str = "Ahorro";

/// The built-in set for a transaction type
pub fn builtin_categories(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
        TransactionType::TransferToSavings => SAVINGS_CATEGORIES,
    }
}

/// A user-defined category scoped to one transaction type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier, minted by the store
    pub id: CategoryId,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Input for creating a custom category; the store mints the id
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub kind: TransactionType,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, kind: TransactionType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            kind: self.kind,
        }
    }
}

/// Resolve the category names offered for a transaction type
///
/// Union of the built-in set and the custom categories of the same type,
/// deduplicated and sorted. Pure and idempotent; custom names that shadow
/// a built-in appear once.
pub fn category_options(kind: TransactionType, customs: &[Category]) -> Vec<String> {
    let mut names: BTreeSet<String> = builtin_categories(kind)
        .iter()
        .map(|name| name.to_string())
        .collect();

    for category in customs.iter().filter(|c| c.kind == kind) {
        names.insert(category.name.clone());
    }

    names.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(name: &str, kind: TransactionType) -> Category {
        NewCategory::new(name, kind).into_category(CategoryId::new())
    }

    #[test]
    fn test_builtins_per_type() {
        assert!(builtin_categories(TransactionType::Income).contains(&"Salario"));
        assert!(builtin_categories(TransactionType::Expense).contains(&"Alimentación"));
        assert!(builtin_categories(TransactionType::TransferToSavings).contains(&"Ahorro General"));
    }

    #[test]
    fn test_options_without_customs_are_sorted_builtins() {
        let options = category_options(TransactionType::TransferToSavings, &[]);
        assert_eq!(
            options,
            vec!["Ahorro General", "Fondo de Emergencia", "Meta Específica"]
        );
    }

    #[test]
    fn test_options_merge_customs_of_matching_type() {
        let customs = vec![
            custom("Mascotas", TransactionType::Expense),
            custom("Bonos", TransactionType::Income),
        ];

        let options = category_options(TransactionType::Expense, &customs);
        assert!(options.contains(&"Mascotas".to_string()));
        assert!(!options.contains(&"Bonos".to_string()));

        // Sorted after the merge, not appended
        let mut sorted = options.clone();
        sorted.sort();
        assert_eq!(options, sorted);
    }

    #[test]
    fn test_custom_shadowing_builtin_appears_once() {
        let customs = vec![custom("Salario", TransactionType::Income)];
        let options = category_options(TransactionType::Income, &customs);

        let count = options.iter().filter(|name| *name == "Salario").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_options_are_idempotent() {
        let customs = vec![custom("Viajes", TransactionType::Expense)];
        let first = category_options(TransactionType::Expense, &customs);
        let second = category_options(TransactionType::Expense, &customs);
        assert_eq!(first, second);
    }

    #[test]
    fn test_document_field_names() {
        let category = custom("Mascotas", TransactionType::Expense);
        let json = serde_json::to_string(&category).unwrap();

        assert!(json.contains("\"type\":\"expense\""));
        assert!(json.contains("\"name\":\"Mascotas\""));

        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, category.id);
        assert_eq!(back.kind, TransactionType::Expense);
    }
}
