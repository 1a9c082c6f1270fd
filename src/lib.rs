//! Finlog is a web app for tracking personal income and expenses.
//!
//! This library serves HTML pages directly and delegates all persistence to a
//! hosted table service reached over HTTP. The app keeps a full in-memory
//! mirror of the remote collection, reloads it after every mutation, and
//! renders summaries, filtered views, and CSV exports from the mirror.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod dashboard;
mod endpoints;
mod export;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod store;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use store::{StoreClient, TransactionStore};

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The remote store rejected a call.
    ///
    /// The message comes from the store's error response and is shown to the
    /// user verbatim.
    #[error("{0}")]
    Remote(String),

    /// The remote store could not be reached at the transport level.
    #[error("could not reach the transaction store: {0}")]
    StoreUnreachable(String),

    /// The configured base URL for the remote store is not a valid URL.
    #[error("invalid store URL \"{0}\"")]
    InvalidStoreUrl(String),

    /// An export was requested while the mirrored transaction list is empty.
    ///
    /// The export is a no-op in this case. A header-only file is never
    /// produced.
    #[error("No transactions to export!")]
    NothingToExport,

    /// The requested transaction is not in the mirrored list.
    ///
    /// The client should check that the ID is correct and that the record has
    /// not been deleted by an earlier request.
    #[error("the requested transaction could not be found")]
    NotFound,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// Could not acquire the lock on the transaction mirror.
    #[error("could not acquire the mirror lock")]
    MirrorLock,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::NothingToExport => InternalServerError {
                description: "No transactions to export!",
                fix: "Add a transaction first, then try the export again.",
            }
            .into_response(),
            Error::InvalidTimezone(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::Remote(ref message) | Error::StoreUnreachable(ref message) => {
                tracing::error!("remote store call failed: {message}");
                InternalServerError {
                    description: "The transaction store reported an error",
                    fix: message,
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::Remote(message) => Alert::error("Request failed", &message)
                .into_response_with_status(StatusCode::BAD_GATEWAY),
            Error::StoreUnreachable(message) => {
                Alert::error("Could not reach the transaction store", &message)
                    .into_response_with_status(StatusCode::BAD_GATEWAY)
            }
            Error::NotFound => Alert::error(
                "Could not find transaction",
                "The transaction could not be found. \
                Try refreshing the page to see if it has already been deleted.",
            )
            .into_response_with_status(StatusCode::NOT_FOUND),
            Error::NothingToExport => Alert::error_simple("No transactions to export!")
                .into_response_with_status(StatusCode::BAD_REQUEST),
            _ => Alert::error(
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.",
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
