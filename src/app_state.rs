//! Implements a struct that holds the state of the web server.

use std::sync::Arc;

use crate::store::TransactionStore;

/// The state of the web server.
///
/// Route handlers do not take this struct directly. Each handler declares its
/// own state struct with a `FromRef<AppState>` impl so that it only sees the
/// parts it needs.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The remote-backed transaction store shared by all handlers.
    pub store: Arc<TransactionStore>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] for `store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland".
    pub fn new(store: TransactionStore, local_timezone: &str) -> Self {
        Self {
            store: Arc::new(store),
            local_timezone: local_timezone.to_owned(),
        }
    }
}
