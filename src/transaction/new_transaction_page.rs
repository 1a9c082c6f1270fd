//! Defines the route handler for the transaction entry form.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::html;
use serde::Deserialize;

use crate::{
    AppState, endpoints,
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    timezone::local_today,
    transaction::{
        TransactionKind,
        form::{FormAction, TransactionFormOptions, kind_toggle_view, transaction_form_view},
    },
};

/// The query parameters for the entry form page.
#[derive(Debug, Deserialize)]
pub struct NewTransactionQuery {
    /// Which side of the income/expense toggle is selected. Defaults to
    /// expense, like the original entry form.
    #[serde(default)]
    pub kind: Option<TransactionKind>,
}

/// The state needed for the entry form page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for recording a transaction.
///
/// The date input defaults to the local today.
pub async fn get_new_transaction_page(
    State(state): State<NewTransactionPageState>,
    Query(query): Query<NewTransactionQuery>,
) -> Response {
    let kind = query.kind.unwrap_or(TransactionKind::Expense);

    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW);
    let form = transaction_form_view(&TransactionFormOptions {
        kind,
        action: FormAction::Create(endpoints::TRANSACTIONS_API.to_owned()),
        values: None,
        default_date: today,
    });

    let content = html! {
        (nav_bar.into_html())

        div class=(FORM_CONTAINER_STYLE) {
            h2 class="text-2xl font-bold mb-4 w-full" {
                "Add New " (kind.label())
            }

            (kind_toggle_view(kind))
            (form)
        }
    };

    base("Add Transaction", &content).into_response()
}
