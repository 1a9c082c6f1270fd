//! The remote-backed transaction store.
//!
//! [TransactionStore] pairs the HTTP client for the hosted table service with
//! an in-memory mirror of the collection. Writes never touch the mirror
//! directly: every successful mutation is followed by a full reload, so the
//! rendered state always reflects a confirmed round trip. A failed call
//! propagates its error and leaves the mirror untouched.

mod client;
mod mirror;

use std::sync::{
    Mutex,
    atomic::{AtomicU64, Ordering},
};

pub use client::StoreClient;

use crate::{
    Error,
    transaction::{Transaction, TransactionDraft, TransactionId},
};

use self::mirror::Mirror;

/// Holds the authoritative-for-this-session list of transactions as a full
/// mirror of the remote collection.
#[derive(Debug)]
pub struct TransactionStore {
    client: StoreClient,
    mirror: Mutex<Mirror>,
    next_ticket: AtomicU64,
}

impl TransactionStore {
    /// Create a store backed by `client` with an empty mirror.
    ///
    /// Call [TransactionStore::load_all] to populate the mirror.
    pub fn new(client: StoreClient) -> Self {
        Self {
            client,
            mirror: Mutex::new(Mirror::default()),
            next_ticket: AtomicU64::new(0),
        }
    }

    /// Fetch the full remote collection (newest first) and replace the
    /// mirrored list.
    ///
    /// Reloads are sequenced by request order: when two reloads overlap, the
    /// one issued later wins no matter which network round trip finishes
    /// first.
    ///
    /// # Errors
    /// Propagates [Error::Remote] or [Error::StoreUnreachable] from the
    /// client without retrying; the mirror keeps its previous contents.
    pub async fn load_all(&self) -> Result<(), Error> {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;

        let transactions = self.client.list().await?;

        self.lock_mirror()?.apply(ticket, transactions);

        Ok(())
    }

    /// Submit a new record to the remote store and reload the mirror.
    pub async fn add(&self, draft: TransactionDraft) -> Result<(), Error> {
        self.client.insert(&draft).await?;
        self.load_all().await
    }

    /// Replace all fields of the record matching `id` and reload the mirror.
    pub async fn update(&self, id: TransactionId, draft: TransactionDraft) -> Result<(), Error> {
        self.client.update(id, &draft).await?;
        self.load_all().await
    }

    /// Delete the record matching `id` and reload the mirror.
    ///
    /// Callers are responsible for gating this behind user confirmation; the
    /// store performs the delete unconditionally.
    pub async fn remove(&self, id: TransactionId) -> Result<(), Error> {
        self.client.delete(id).await?;
        self.load_all().await
    }

    /// Delete every record and reload the mirror. Used for a full reset.
    ///
    /// Callers are responsible for gating this behind user confirmation.
    pub async fn remove_all(&self) -> Result<(), Error> {
        self.client.delete_all().await?;
        self.load_all().await
    }

    /// A clone of the mirrored list in newest-first order.
    pub fn snapshot(&self) -> Result<Vec<Transaction>, Error> {
        Ok(self.lock_mirror()?.snapshot())
    }

    /// The mirrored record with the given `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no mirrored record has that ID.
    pub fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        self.lock_mirror()?
            .snapshot()
            .into_iter()
            .find(|transaction| transaction.id == id)
            .ok_or(Error::NotFound)
    }

    fn lock_mirror(&self) -> Result<std::sync::MutexGuard<'_, Mirror>, Error> {
        self.mirror
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire the mirror lock: {error}"))
            .map_err(|_| Error::MirrorLock)
    }
}

#[cfg(test)]
mod transaction_store_tests {
    use mockito::{Matcher, Server};
    use time::macros::date;

    use crate::{
        Error,
        transaction::{Classification, TransactionDraft, TransactionKind},
    };

    use super::{StoreClient, TransactionStore};

    const LUNCH_JSON: &str = r#"{
        "id": 1,
        "type": "expense",
        "amount": 150.0,
        "description": "Lunch",
        "category": "food",
        "transaction_type": "personal",
        "date": "2024-01-05",
        "source": null,
        "created_at": "2024-01-05T12:00:00Z"
    }"#;

    fn store_for(server: &Server) -> TransactionStore {
        TransactionStore::new(StoreClient::new(&server.url(), "test-key").unwrap())
    }

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

    fn mock_list(server: &mut Server, body: String) -> mockito::Mock {
        server
            .mock("GET", "/transactions")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(body)
    }

    #[tokio::test]
    async fn load_all_mirrors_the_remote_list() {
        let mut server = Server::new_async().await;
        mock_list(&mut server, format!("[{LUNCH_JSON}]"))
            .create_async()
            .await;

        let store = store_for(&server);
        store.load_all().await.unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].description, "Lunch");
        assert_eq!(snapshot[0].date, date!(2024 - 01 - 05));
    }

    #[tokio::test]
    async fn add_reloads_and_record_appears_exactly_once() {
        let mut server = Server::new_async().await;
        let insert = server
            .mock("POST", "/transactions")
            .match_body(Matcher::PartialJsonString(
                r#"{"type": "expense", "description": "Lunch"}"#.to_owned(),
            ))
            .with_status(201)
            .create_async()
            .await;
        mock_list(&mut server, format!("[{LUNCH_JSON}]"))
            .create_async()
            .await;

        let store = store_for(&server);
        store.add(lunch_draft()).await.unwrap();

        insert.assert_async().await;
        let snapshot = store.snapshot().unwrap();
        assert_eq!(
            snapshot
                .iter()
                .filter(|transaction| transaction.id == 1)
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn remove_reloads_and_record_is_gone() {
        let mut server = Server::new_async().await;
        // Seed the mirror with the record, then delete it.
        let seed_list = mock_list(&mut server, format!("[{LUNCH_JSON}]"))
            .create_async()
            .await;

        let store = store_for(&server);
        store.load_all().await.unwrap();
        seed_list.remove_async().await;

        let delete = server
            .mock("DELETE", "/transactions/1")
            .with_status(204)
            .create_async()
            .await;
        mock_list(&mut server, "[]".to_owned()).create_async().await;

        store.remove(1).await.unwrap();

        delete.assert_async().await;
        assert!(
            store
                .snapshot()
                .unwrap()
                .iter()
                .all(|transaction| transaction.id != 1)
        );
    }

    #[tokio::test]
    async fn failed_mutation_leaves_mirror_untouched() {
        let mut server = Server::new_async().await;
        mock_list(&mut server, format!("[{LUNCH_JSON}]"))
            .create_async()
            .await;

        let store = store_for(&server);
        store.load_all().await.unwrap();

        server
            .mock("POST", "/transactions")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "insert failed"}"#)
            .create_async()
            .await;

        let error = store.add(lunch_draft()).await.unwrap_err();

        assert_eq!(error, Error::Remote("insert failed".to_owned()));
        assert_eq!(store.snapshot().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_returns_not_found_for_unknown_id() {
        let mut server = Server::new_async().await;
        mock_list(&mut server, "[]".to_owned()).create_async().await;

        let store = store_for(&server);
        store.load_all().await.unwrap();

        assert_eq!(store.get(99).unwrap_err(), Error::NotFound);
    }
}
