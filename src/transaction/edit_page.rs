//! Defines the route handler for the page that edits an existing transaction.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    store::TransactionStore,
    timezone::local_today,
    transaction::{
        TransactionId,
        form::{FormAction, TransactionFormOptions, transaction_form_view},
    },
};

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The transaction store the record is read from.
    pub store: Arc<TransactionStore>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for editing a transaction, prefilled from the mirrored
/// record.
///
/// Returns the 404 page when the ID is not in the mirror.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let transaction = match state.store.get(transaction_id) {
        Ok(transaction) => transaction,
        Err(error @ Error::NotFound) => return error.into_response(),
        Err(error) => {
            tracing::error!("could not read transaction {transaction_id} from the mirror: {error}");
            return error.into_response();
        }
    };

    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    let nav_bar = NavBar::new(endpoints::EDIT_TRANSACTION_VIEW);
    let form = transaction_form_view(&TransactionFormOptions {
        kind: transaction.kind,
        action: FormAction::Update(format_endpoint(endpoints::TRANSACTION, transaction_id)),
        values: Some(&transaction),
        default_date: today,
    });

    let content = html! {
        (nav_bar.into_html())

        div class=(FORM_CONTAINER_STYLE) {
            h2 class="text-2xl font-bold mb-4 w-full" {
                "Edit " (transaction.kind.label())
            }

            (form)

            a
                href=(endpoints::TRANSACTIONS_VIEW)
                class="mt-4 text-sm text-gray-600 dark:text-gray-400 underline"
            {
                "Cancel"
            }
        }
    };

    base("Edit Transaction", &content).into_response()
}
