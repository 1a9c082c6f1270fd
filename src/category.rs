//! The category vocabularies offered by the entry form and their display
//! labels.

use crate::transaction::TransactionKind;

/// Category values and display labels offered for expenses.
pub(crate) const EXPENSE_CATEGORIES: &[(&str, &str)] = &[
    ("food", "Food & Groceries"),
    ("transport", "Transport"),
    ("utilities", "Utilities"),
    ("business", "Business"),
    ("health", "Health & Medical"),
    ("entertainment", "Entertainment"),
    ("other", "Other"),
];

/// Category values and display labels offered for income.
pub(crate) const INCOME_CATEGORIES: &[(&str, &str)] = &[
    ("salary", "Salary"),
    ("client", "Client Payment"),
    ("investment", "Investment"),
    ("other-income", "Other Income"),
];

/// The categories the entry form offers for `kind`.
pub(crate) fn categories_for(kind: TransactionKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
    }
}

/// The display label for `category`.
///
/// Categories outside the known vocabularies display as their raw value, so a
/// record whose category was renamed or hand-edited still renders.
pub(crate) fn display_name(category: &str) -> &str {
    EXPENSE_CATEGORIES
        .iter()
        .chain(INCOME_CATEGORIES)
        .find(|(value, _)| *value == category)
        .map(|(_, label)| *label)
        .unwrap_or(category)
}
