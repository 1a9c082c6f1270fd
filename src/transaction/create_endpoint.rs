//! Defines the endpoint for creating a new transaction.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{AppState, endpoints, store::TransactionStore, transaction::TransactionForm};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The transaction store that performs the insert and reload.
    pub store: Arc<TransactionStore>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for creating a new transaction, redirects to the history
/// view on success.
///
/// On failure the remote store's message is returned as an alert partial and
/// the mirrored state is left untouched.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    match state.store.add(form.into_draft()).await {
        Ok(()) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod create_transaction_endpoint_tests {
    use std::sync::Arc;

    use axum::{body::Body, extract::State, http::Response, response::IntoResponse};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use mockito::{Matcher, Server};
    use time::macros::date;

    use crate::{
        store::{StoreClient, TransactionStore},
        transaction::{Classification, TransactionForm, TransactionKind},
    };

    use super::{CreateTransactionState, create_transaction_endpoint};

    fn lunch_form() -> TransactionForm {
        TransactionForm {
            kind: TransactionKind::Expense,
            amount: 150.0,
            description: "Lunch".to_owned(),
            category: "food".to_owned(),
            classification: Classification::Personal,
            date: date!(2024 - 01 - 05),
            source: None,
        }
    }

    fn state_for(server: &Server) -> CreateTransactionState {
        CreateTransactionState {
            store: Arc::new(TransactionStore::new(
                StoreClient::new(&server.url(), "key").unwrap(),
            )),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let mut server = Server::new_async().await;
        let insert = server
            .mock("POST", "/transactions")
            .with_status(201)
            .create_async()
            .await;
        server
            .mock("GET", "/transactions")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let response = create_transaction_endpoint(State(state_for(&server)), Form(lunch_form()))
            .await
            .into_response();

        insert.assert_async().await;
        assert_redirects_to_transactions_view(response);
    }

    #[tokio::test]
    async fn remote_failure_returns_alert_with_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/transactions")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "amount must be non-negative"}"#)
            .create_async()
            .await;

        let response = create_transaction_endpoint(State(state_for(&server)), Form(lunch_form()))
            .await
            .into_response();

        assert!(response.status().is_client_error() || response.status().is_server_error());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8_lossy(&bytes).to_string();
        assert!(
            body.contains("amount must be non-negative"),
            "expected the alert to carry the remote message, got {body:?}"
        );
    }

    #[track_caller]
    fn assert_redirects_to_transactions_view(response: Response<Body>) {
        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(
            location, "/transactions",
            "got redirect to {location:?}, want redirect to /transactions"
        );
    }
}
