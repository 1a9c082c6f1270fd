//! Card components for the dashboard summary figures and recent transactions.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::Summary,
    html::format_currency,
    transaction::{Transaction, TransactionKind},
};

/// Renders a row of income/expenses/balance cards for one period.
pub(super) fn summary_cards_view(period_label: &str, summary: &Summary) -> Markup {
    html! {
        section class="w-full mx-auto mt-8" {
            h3 class="text-xl font-semibold mb-4" { (period_label) }

            div class="grid grid-cols-1 sm:grid-cols-3 gap-4" {
                (summary_card("Income", summary.income, "text-green-600 dark:text-green-400"))
                (summary_card("Expenses", summary.expenses, "text-red-600 dark:text-red-400"))
                (summary_card(
                    "Balance",
                    summary.balance,
                    if summary.balance < 0.0 {
                        "text-red-600 dark:text-red-400"
                    } else {
                        "text-gray-900 dark:text-white"
                    },
                ))
            }
        }
    }
}

fn summary_card(label: &str, amount: f64, amount_style: &str) -> Markup {
    // Balance may be negative even though individual amounts never are.
    let formatted = if amount < 0.0 {
        format!("-{}", format_currency(amount.abs()))
    } else {
        format_currency(amount)
    };

    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
        {
            p class="text-sm text-gray-600 dark:text-gray-400" { (label) }
            p class=(format!("text-2xl font-bold {amount_style}")) { (formatted) }
        }
    }
}

/// Renders the recent-transactions list, or an empty state when there are no
/// transactions yet.
pub(super) fn recent_transactions_view(transactions: &[Transaction]) -> Markup {
    html! {
        section class="w-full mx-auto mt-8 mb-8" {
            h3 class="text-xl font-semibold mb-4" { "Recent Transactions" }

            @if transactions.is_empty() {
                p class="text-gray-600 dark:text-gray-400" { "No transactions yet" }
            } @else {
                div class="flex flex-col gap-2" {
                    @for transaction in transactions {
                        (recent_transaction_row(transaction))
                    }
                }
            }
        }
    }
}

fn recent_transaction_row(transaction: &Transaction) -> Markup {
    let (sign, amount_style) = match transaction.kind {
        TransactionKind::Income => ("+", "text-green-600 dark:text-green-400"),
        TransactionKind::Expense => ("-", "text-red-600 dark:text-red-400"),
    };

    html! {
        div
            class="flex items-center justify-between bg-white dark:bg-gray-800
                   border border-gray-200 dark:border-gray-700 rounded-lg p-3"
        {
            span class=(format!("font-semibold {amount_style}")) {
                (sign) (format_currency(transaction.amount))
            }
            span class="flex-1 px-4 truncate" { (transaction.description) }
            span class="text-sm text-gray-600 dark:text-gray-400" { (transaction.date) }
        }
    }
}
