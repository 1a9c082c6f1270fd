//! Implements the HTTP client for the hosted table service.
//!
//! The service exposes the `transactions` collection through four logical
//! operations (list, insert, update-by-id, delete-by-id) plus a
//! collection-level delete. Every call either succeeds or fails with a
//! human-readable message which is surfaced to the user verbatim; no retries
//! are performed here.

use reqwest::Url;
use serde::Deserialize;

use crate::{
    Error,
    transaction::{Transaction, TransactionDraft, TransactionId},
};

/// The error body the hosted table service returns for failed calls.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// A client for the hosted table service holding the `transactions`
/// collection.
#[derive(Debug, Clone)]
pub struct StoreClient {
    base_url: Url,
    api_key: String,
    http: reqwest::Client,
}

impl StoreClient {
    /// Create a client for the service at `base_url`.
    ///
    /// `api_key` is sent as a bearer token with every request.
    ///
    /// # Errors
    /// Returns [Error::InvalidStoreUrl] if `base_url` is not a valid URL.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, Error> {
        let base_url =
            Url::parse(base_url).map_err(|_| Error::InvalidStoreUrl(base_url.to_owned()))?;

        Ok(Self {
            base_url,
            api_key: api_key.to_owned(),
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Fetch every transaction, ordered by `created_at` descending.
    pub async fn list(&self) -> Result<Vec<Transaction>, Error> {
        let response = self
            .http
            .get(self.endpoint("transactions"))
            .query(&[("order", "created_at.desc")])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(transport_error)?;

        check(response)
            .await?
            .json::<Vec<Transaction>>()
            .await
            .map_err(transport_error)
    }

    /// Insert a new record. The store assigns `id` and `created_at`.
    pub async fn insert(&self, draft: &TransactionDraft) -> Result<(), Error> {
        let response = self
            .http
            .post(self.endpoint("transactions"))
            .bearer_auth(&self.api_key)
            .json(draft)
            .send()
            .await
            .map_err(transport_error)?;

        check(response).await.map(|_| ())
    }

    /// Replace all fields of the record matching `id`.
    pub async fn update(&self, id: TransactionId, draft: &TransactionDraft) -> Result<(), Error> {
        let response = self
            .http
            .put(self.endpoint(&format!("transactions/{id}")))
            .bearer_auth(&self.api_key)
            .json(draft)
            .send()
            .await
            .map_err(transport_error)?;

        check(response).await.map(|_| ())
    }

    /// Delete the single record matching `id`.
    pub async fn delete(&self, id: TransactionId) -> Result<(), Error> {
        let response = self
            .http
            .delete(self.endpoint(&format!("transactions/{id}")))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(transport_error)?;

        check(response).await.map(|_| ())
    }

    /// Delete every record in the collection.
    pub async fn delete_all(&self) -> Result<(), Error> {
        let response = self
            .http
            .delete(self.endpoint("transactions"))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(transport_error)?;

        check(response).await.map(|_| ())
    }
}

fn transport_error(error: reqwest::Error) -> Error {
    Error::StoreUnreachable(error.to_string())
}

/// Map a non-success response to [Error::Remote] carrying the service's
/// message, falling back to the HTTP status when the body is not the expected
/// error shape.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.message)
        .unwrap_or_else(|_| format!("the store returned {status}"));

    Err(Error::Remote(message))
}

#[cfg(test)]
mod store_client_tests {
    use time::macros::date;

    use crate::{
        Error,
        transaction::{Classification, TransactionDraft, TransactionKind},
    };

    use super::StoreClient;

    fn lunch_draft() -> TransactionDraft {
        TransactionDraft {
            kind: TransactionKind::Expense,
            amount: 150.0,
            description: "Lunch".to_owned(),
            category: "food".to_owned(),
            classification: Classification::Personal,
            date: date!(2024 - 01 - 05),
            source: None,
        }
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = StoreClient::new("not a url", "key");

        assert_eq!(
            result.unwrap_err(),
            Error::InvalidStoreUrl("not a url".to_owned())
        );
    }

    #[tokio::test]
    async fn list_requests_newest_first_ordering() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/transactions")
            .match_query(mockito::Matcher::UrlEncoded(
                "order".into(),
                "created_at.desc".into(),
            ))
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "key").unwrap();
        let transactions = client.list().await.unwrap();

        mock.assert_async().await;
        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn remote_error_message_is_surfaced_verbatim() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/transactions")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "duplicate key value"}"#)
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "key").unwrap();
        let error = client.insert(&lunch_draft()).await.unwrap_err();

        assert_eq!(error, Error::Remote("duplicate key value".to_owned()));
    }

    #[tokio::test]
    async fn unparseable_error_body_falls_back_to_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/transactions/3")
            .with_status(503)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "key").unwrap();
        let error = client.delete(3).await.unwrap_err();

        match error {
            Error::Remote(message) => assert!(
                message.contains("503"),
                "expected the fallback message to carry the HTTP status, got {message:?}"
            ),
            other => panic!("expected Error::Remote, got {other:?}"),
        }
    }
}
