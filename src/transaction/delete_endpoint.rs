//! Defines the endpoints for deleting one transaction and for clearing the
//! whole collection.
//!
//! Both actions are destructive, so the buttons that trigger them carry an
//! `hx-confirm` prompt; the handlers themselves run unconditionally.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{AppState, endpoints, store::TransactionStore, transaction::TransactionId};

/// The state needed to delete transactions.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The transaction store that performs the delete and reload.
    pub store: Arc<TransactionStore>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for deleting the transaction matching the path ID,
/// redirects to the history view on success.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.store.remove(transaction_id).await {
        Ok(()) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// A route handler for deleting every transaction. Used for a full reset.
pub async fn clear_all_transactions_endpoint(
    State(state): State<DeleteTransactionState>,
) -> Response {
    match state.store.remove_all().await {
        Ok(()) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not clear all transactions: {error}");
            error.into_alert_response()
        }
    }
}
