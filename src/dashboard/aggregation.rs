//! Pure summary and filtering functions over the mirrored transaction list.
//!
//! Everything here takes `&[Transaction]` and performs no I/O. Date matching
//! works on parsed [Date] components rather than string prefixes, so there is
//! no hidden dependency on zero-padded date formatting.

use time::{Date, Month};

use crate::transaction::{Classification, Transaction, TransactionKind};

/// Income, expense, and balance totals for one day or one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Summary {
    /// Total income in the period.
    pub(crate) income: f64,
    /// Total expenses in the period.
    pub(crate) expenses: f64,
    /// `income - expenses`.
    pub(crate) balance: f64,
}

/// Sum the amounts of transactions matching `kind` whose date satisfies
/// `date_matches`. An empty selection sums to 0.
fn sum_where(
    transactions: &[Transaction],
    kind: TransactionKind,
    date_matches: impl Fn(Date) -> bool,
) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind && date_matches(transaction.date))
        .map(|transaction| transaction.amount)
        .sum()
}

/// Totals for the transactions dated exactly `today`.
pub(crate) fn daily_summary(transactions: &[Transaction], today: Date) -> Summary {
    let income = sum_where(transactions, TransactionKind::Income, |date| date == today);
    let expenses = sum_where(transactions, TransactionKind::Expense, |date| date == today);

    Summary {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Totals for the transactions dated within the given calendar month.
pub(crate) fn monthly_summary(transactions: &[Transaction], year: i32, month: Month) -> Summary {
    let in_month = |date: Date| date.year() == year && date.month() == month;

    let income = sum_where(transactions, TransactionKind::Income, in_month);
    let expenses = sum_where(transactions, TransactionKind::Expense, in_month);

    Summary {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// The filter controls offered by the history view.
///
/// Criteria are conjunctive; a `None` criterion matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TransactionCriteria {
    /// Match only this direction of money flow.
    pub(crate) kind: Option<TransactionKind>,
    /// Match only this category value.
    pub(crate) category: Option<String>,
    /// Match only this classification.
    pub(crate) classification: Option<Classification>,
}

/// The subset of `transactions` matching every supplied criterion, in the
/// input order.
pub(crate) fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    criteria: &TransactionCriteria,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|transaction| {
            criteria
                .kind
                .is_none_or(|kind| transaction.kind == kind)
        })
        .filter(|transaction| {
            criteria
                .category
                .as_deref()
                .is_none_or(|category| transaction.category == category)
        })
        .filter(|transaction| {
            criteria
                .classification
                .is_none_or(|classification| transaction.classification == classification)
        })
        .collect()
}

/// The first `n` records of the current (newest-first) ordering.
///
/// Returns fewer when the list is shorter than `n`.
pub(crate) fn recent(transactions: &[Transaction], n: usize) -> &[Transaction] {
    &transactions[..n.min(transactions.len())]
}

#[cfg(test)]
mod aggregation_tests {
    use time::macros::{date, datetime};

    use super::*;

    fn transaction(
        id: i64,
        kind: TransactionKind,
        amount: f64,
        date: Date,
        category: &str,
        classification: Classification,
    ) -> Transaction {
        Transaction {
            id,
            kind,
            amount,
            description: format!("transaction {id}"),
            category: category.to_owned(),
            classification,
            date,
            source: None,
            created_at: datetime!(2024-01-05 12:00 UTC),
        }
    }

    fn sample_list() -> Vec<Transaction> {
        vec![
            transaction(
                1,
                TransactionKind::Income,
                5000.0,
                date!(2024 - 01 - 05),
                "client",
                Classification::Business,
            ),
            transaction(
                2,
                TransactionKind::Expense,
                150.0,
                date!(2024 - 01 - 05),
                "food",
                Classification::Personal,
            ),
            transaction(
                3,
                TransactionKind::Expense,
                500.0,
                date!(2024 - 01 - 20),
                "business",
                Classification::Business,
            ),
            transaction(
                4,
                TransactionKind::Income,
                75.25,
                date!(2024 - 02 - 01),
                "other-income",
                Classification::Personal,
            ),
        ]
    }

    #[test]
    fn sum_over_no_matches_is_zero() {
        let transactions = sample_list();

        let summary = daily_summary(&transactions, date!(1999 - 01 - 01));

        assert_eq!(summary.income, 0.0);
        assert_eq!(summary.expenses, 0.0);
        assert_eq!(summary.balance, 0.0);
    }

    #[test]
    fn daily_summary_balance_is_income_minus_expenses() {
        let transactions = sample_list();

        let summary = daily_summary(&transactions, date!(2024 - 01 - 05));

        assert_eq!(summary.income, 5000.0);
        assert_eq!(summary.expenses, 150.0);
        assert_eq!(summary.balance, summary.income - summary.expenses);
    }

    #[test]
    fn monthly_summary_spans_the_whole_month() {
        let transactions = sample_list();

        let summary = monthly_summary(&transactions, 2024, Month::January);

        assert_eq!(summary.income, 5000.0);
        assert_eq!(summary.expenses, 650.0);
        assert_eq!(summary.balance, 4350.0);
    }

    #[test]
    fn monthly_summary_does_not_leak_into_other_months() {
        let transactions = sample_list();

        let summary = monthly_summary(&transactions, 2024, Month::February);

        assert_eq!(summary.income, 75.25);
        assert_eq!(summary.expenses, 0.0);
    }

    #[test]
    fn empty_criteria_returns_input_unchanged() {
        let transactions = sample_list();

        let filtered = filter_transactions(&transactions, &TransactionCriteria::default());

        let expected: Vec<&Transaction> = transactions.iter().collect();
        assert_eq!(filtered, expected);
    }

    #[test]
    fn kind_filters_partition_the_list() {
        let transactions = sample_list();

        let income = filter_transactions(
            &transactions,
            &TransactionCriteria {
                kind: Some(TransactionKind::Income),
                ..Default::default()
            },
        );
        let expenses = filter_transactions(
            &transactions,
            &TransactionCriteria {
                kind: Some(TransactionKind::Expense),
                ..Default::default()
            },
        );

        assert_eq!(income.len() + expenses.len(), transactions.len());
        assert!(income.iter().all(|t| expenses.iter().all(|e| e.id != t.id)));
    }

    #[test]
    fn criteria_are_conjunctive() {
        let transactions = sample_list();

        let filtered = filter_transactions(
            &transactions,
            &TransactionCriteria {
                kind: Some(TransactionKind::Expense),
                category: None,
                classification: Some(Classification::Business),
            },
        );

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 3);
    }

    #[test]
    fn filter_preserves_input_order() {
        let transactions = sample_list();

        let filtered = filter_transactions(
            &transactions,
            &TransactionCriteria {
                kind: Some(TransactionKind::Expense),
                ..Default::default()
            },
        );

        let ids: Vec<i64> = filtered.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn recent_returns_a_prefix_of_the_list() {
        let transactions = sample_list();

        assert_eq!(recent(&transactions, 2), &transactions[..2]);
        assert_eq!(recent(&transactions, 10).len(), transactions.len());
        assert!(recent(&[], 5).is_empty());
    }
}
