//! Serializing the transaction list to CSV and handing it to the browser as a
//! download.
//!
//! The export always covers the full, unfiltered list. The description column
//! is always quoted (the documented file format); every other field is quoted
//! only when it contains a delimiter, quote, or line break. Embedded quotes
//! are doubled, so a description like `He said "hi"` survives a round trip
//! through a spreadsheet.

use std::{borrow::Cow, sync::Arc};

use axum::{
    extract::{FromRef, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, store::TransactionStore, timezone::local_today, transaction::Transaction,
};

/// The fixed header row of the export file.
const CSV_HEADER: &str = "Date,Type,Amount,Description,Category,Transaction Type,Source";

/// The state needed to export transactions.
#[derive(Debug, Clone)]
pub struct ExportState {
    /// The transaction store the export reads from.
    pub store: Arc<TransactionStore>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler that downloads the full transaction list as a CSV file.
///
/// The file name embeds the local date at export time, e.g.
/// `transactions_2024-01-05.csv`.
///
/// # Errors
/// Returns [Error::NothingToExport] when the mirrored list is empty: no file
/// is produced, not even a header-only one.
pub async fn export_transactions_endpoint(
    State(state): State<ExportState>,
) -> Result<Response, Error> {
    let transactions = state.store.snapshot()?;

    if transactions.is_empty() {
        return Err(Error::NothingToExport);
    }

    let today = local_today(&state.local_timezone)?;
    let csv = render_csv(&transactions);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"transactions_{today}.csv\""),
            ),
        ],
        csv,
    )
        .into_response())
}

/// Render `transactions` as CSV text: the fixed header row followed by one
/// row per transaction.
pub(crate) fn render_csv(transactions: &[Transaction]) -> String {
    let mut lines = Vec::with_capacity(transactions.len() + 1);
    lines.push(CSV_HEADER.to_owned());

    for transaction in transactions {
        lines.push(
            [
                csv_field(&transaction.date.to_string()).into_owned(),
                csv_field(transaction.kind.as_str()).into_owned(),
                csv_field(&format_amount(transaction.amount)).into_owned(),
                quoted(&transaction.description),
                csv_field(&transaction.category).into_owned(),
                csv_field(transaction.classification.as_str()).into_owned(),
                csv_field(transaction.source.as_deref().unwrap_or("")).into_owned(),
            ]
            .join(","),
        );
    }

    lines.join("\n")
}

/// Format an amount the way the browser did: shortest decimal representation,
/// so `150.0` renders as `150`.
fn format_amount(amount: f64) -> String {
    format!("{amount}")
}

/// Quote `field` unconditionally, doubling embedded quotes.
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Quote `field` only when it contains a delimiter, quote, or line break.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains(['"', ',', '\r', '\n']) {
        Cow::Owned(quoted(field))
    } else {
        Cow::Borrowed(field)
    }
}
