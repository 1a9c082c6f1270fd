//! Defines the route handler for the transaction history page.
//!
//! The page renders the mirrored list through the filter controls (kind,
//! category, classification). Criteria are conjunctive and an unset control
//! matches everything.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use serde::Deserialize;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::{
    AppState, Error,
    category::{self, display_name},
    dashboard::aggregation::{TransactionCriteria, filter_transactions},
    endpoints::{self, format_endpoint},
    html::{
        BADGE_STYLE, BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, base, format_currency,
    },
    navigation::NavBar,
    store::TransactionStore,
    transaction::{Classification, Transaction, TransactionKind},
};

/// The format dates are displayed in, e.g. "5 Jan 2024".
const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day padding:none] [month repr:short] [year]");

/// The filter controls submitted by the history page.
///
/// Each control submits an empty string for "all", which deserializes to
/// `None`.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// Only show this direction of money flow.
    #[serde(default)]
    pub kind: Option<TransactionKind>,
    /// Only show this category.
    #[serde(default)]
    pub category: Option<String>,
    /// Only show this classification.
    #[serde(default)]
    pub classification: Option<Classification>,
}

impl FilterQuery {
    fn into_criteria(self) -> TransactionCriteria {
        TransactionCriteria {
            kind: self.kind,
            category: self.category.filter(|category| !category.is_empty()),
            classification: self.classification,
        }
    }
}

/// The state needed for the history page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The transaction store the list is rendered from.
    pub store: Arc<TransactionStore>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Display the transaction history with the filter controls applied.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let transactions = state.store.snapshot()?;
    let criteria = query.into_criteria();
    let filtered = filter_transactions(&transactions, &criteria);

    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW);

    let content = html! {
        (nav_bar.into_html())

        div class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-3xl" {
                div class="flex items-baseline justify-between" {
                    h2 class="text-2xl font-bold" { "Transaction History" }

                    div class="flex gap-2" {
                        a href=(endpoints::EXPORT_API) class=(BUTTON_SECONDARY_STYLE) {
                            "Export CSV"
                        }

                        button
                            hx-delete=(endpoints::TRANSACTIONS_API)
                            hx-confirm="Are you sure you want to delete ALL transactions? This action cannot be undone!"
                            hx-target-error="#alert-container"
                            class=(BUTTON_SECONDARY_STYLE)
                        {
                            "Clear All"
                        }
                    }
                }

                (filter_controls_view(&criteria))

                @if filtered.is_empty() {
                    (empty_state_view(transactions.is_empty()))
                } @else {
                    div class="flex flex-col gap-3 mt-4" {
                        @for transaction in &filtered {
                            (transaction_row_view(transaction))
                        }
                    }
                }
            }
        }
    };

    Ok(base("Transaction History", &content).into_response())
}

fn filter_controls_view(criteria: &TransactionCriteria) -> Markup {
    let all_categories = category::EXPENSE_CATEGORIES
        .iter()
        .chain(category::INCOME_CATEGORIES);

    html! {
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="grid grid-cols-2 sm:grid-cols-4 gap-2 mt-4 items-end"
        {
            select name="kind" class=(FORM_TEXT_INPUT_STYLE) {
                option value="" { "All Types" }
                @for kind in [TransactionKind::Income, TransactionKind::Expense] {
                    option value=(kind) selected[criteria.kind == Some(kind)] {
                        (kind.label())
                    }
                }
            }

            select name="category" class=(FORM_TEXT_INPUT_STYLE) {
                option value="" { "All Categories" }
                @for (value, label) in all_categories {
                    option
                        value=(value)
                        selected[criteria.category.as_deref() == Some(*value)]
                    {
                        (label)
                    }
                }
            }

            select name="classification" class=(FORM_TEXT_INPUT_STYLE) {
                option value="" { "All Classifications" }
                @for classification in [Classification::Personal, Classification::Business] {
                    option
                        value=(classification)
                        selected[criteria.classification == Some(classification)]
                    {
                        @match classification {
                            Classification::Personal => { "Personal" }
                            Classification::Business => { "Business" }
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Apply Filters" }
        }
    }
}

fn transaction_row_view(transaction: &Transaction) -> Markup {
    let (sign, amount_style) = match transaction.kind {
        TransactionKind::Income => ("+", "text-green-600 dark:text-green-400"),
        TransactionKind::Expense => ("-", "text-red-600 dark:text-red-400"),
    };

    let formatted_date = transaction
        .date
        .format(DISPLAY_DATE_FORMAT)
        .unwrap_or_else(|_| transaction.date.to_string());

    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-sm"
        {
            div class="flex items-center justify-between" {
                span class=(format!("text-lg font-semibold {amount_style}")) {
                    (sign) (format_currency(transaction.amount))
                }
                span class="text-sm text-gray-600 dark:text-gray-400" { (formatted_date) }
            }

            p class="mt-1" { (transaction.description) }

            @if let Some(source) = &transaction.source {
                p class="text-sm text-gray-600 dark:text-gray-400" { "From: " (source) }
            }

            div class="flex items-center gap-2 mt-2" {
                span class=(BADGE_STYLE) { (display_name(&transaction.category)) }
                span class=(BADGE_STYLE) { (transaction.classification) }
                span class=(BADGE_STYLE) { (transaction.kind) }

                div class="ms-auto flex gap-3" {
                    a
                        href=(format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id))
                        class=(LINK_STYLE)
                    {
                        "Edit"
                    }

                    button
                        hx-delete=(format_endpoint(endpoints::TRANSACTION, transaction.id))
                        hx-confirm="Are you sure you want to delete this transaction?"
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

fn empty_state_view(no_transactions_at_all: bool) -> Markup {
    let message = if no_transactions_at_all {
        "Start by adding your first transaction!"
    } else {
        "No transactions match the current filters."
    };

    html! {
        div class="text-center py-12" {
            h3 class="text-xl font-semibold" { "No transactions found" }
            p class="text-gray-600 dark:text-gray-400 mt-2" { (message) }
        }
    }
}

#[cfg(test)]
mod transactions_page_tests {
    use std::sync::Arc;

    use axum::{body::Body, extract::State, http::Response};
    use axum_extra::extract::Query;
    use mockito::{Matcher, Server};
    use scraper::{Html, Selector};

    use crate::{
        store::{StoreClient, TransactionStore},
        transaction::TransactionKind,
    };

    use super::{FilterQuery, TransactionsViewState, get_transactions_page};

    const TWO_TRANSACTIONS_JSON: &str = r#"[
        {
            "id": 2,
            "type": "income",
            "amount": 5000.0,
            "description": "Client payment for website design",
            "category": "client",
            "transaction_type": "business",
            "date": "2024-01-06",
            "source": "ABC Company",
            "created_at": "2024-01-06T09:00:00Z"
        },
        {
            "id": 1,
            "type": "expense",
            "amount": 150.0,
            "description": "Grocery shopping",
            "category": "food",
            "transaction_type": "personal",
            "date": "2024-01-05",
            "source": null,
            "created_at": "2024-01-05T12:00:00Z"
        }
    ]"#;

    async fn loaded_state(server: &mut Server, body: &str) -> TransactionsViewState {
        server
            .mock("GET", "/transactions")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let store = TransactionStore::new(StoreClient::new(&server.url(), "key").unwrap());
        store.load_all().await.unwrap();

        TransactionsViewState {
            store: Arc::new(store),
        }
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        Html::parse_document(&String::from_utf8_lossy(&bytes))
    }

    fn page_text(html: &Html) -> String {
        html.root_element().text().collect()
    }

    #[tokio::test]
    async fn history_lists_all_transactions() {
        let mut server = Server::new_async().await;
        let state = loaded_state(&mut server, TWO_TRANSACTIONS_JSON).await;

        let response = get_transactions_page(State(state), Query(FilterQuery::default()))
            .await
            .unwrap();

        let html = parse_html(response).await;
        let text = page_text(&html);
        assert!(text.contains("Grocery shopping"));
        assert!(text.contains("Client payment for website design"));
        assert!(text.contains("From: ABC Company"));
        assert!(text.contains("5 Jan 2024"));
    }

    #[tokio::test]
    async fn kind_filter_hides_other_kinds() {
        let mut server = Server::new_async().await;
        let state = loaded_state(&mut server, TWO_TRANSACTIONS_JSON).await;

        let response = get_transactions_page(
            State(state),
            Query(FilterQuery {
                kind: Some(TransactionKind::Income),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        let text = page_text(&parse_html(response).await);
        assert!(text.contains("Client payment for website design"));
        assert!(!text.contains("Grocery shopping"));
    }

    #[tokio::test]
    async fn empty_mirror_prompts_for_first_transaction() {
        let mut server = Server::new_async().await;
        let state = loaded_state(&mut server, "[]").await;

        let response = get_transactions_page(State(state), Query(FilterQuery::default()))
            .await
            .unwrap();

        let text = page_text(&parse_html(response).await);
        assert!(text.contains("Start by adding your first transaction!"));
    }

    #[tokio::test]
    async fn unmatched_filters_explain_themselves() {
        let mut server = Server::new_async().await;
        let state = loaded_state(&mut server, TWO_TRANSACTIONS_JSON).await;

        let response = get_transactions_page(
            State(state),
            Query(FilterQuery {
                category: Some("utilities".to_owned()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        let text = page_text(&parse_html(response).await);
        assert!(text.contains("No transactions match the current filters."));
    }

    #[tokio::test]
    async fn delete_buttons_are_confirmation_gated() {
        let mut server = Server::new_async().await;
        let state = loaded_state(&mut server, TWO_TRANSACTIONS_JSON).await;

        let response = get_transactions_page(State(state), Query(FilterQuery::default()))
            .await
            .unwrap();

        let html = parse_html(response).await;
        let confirmed: Vec<_> = html
            .select(&Selector::parse("[hx-confirm]").unwrap())
            .collect();

        // One per transaction row plus the clear-all button.
        assert_eq!(confirmed.len(), 3);
    }
}
