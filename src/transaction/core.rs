//! Defines the core data model for transactions.
//!
//! Field names on the wire match the column names of the hosted
//! `transactions` table, so the serde attributes here are the single source of
//! truth for the remote JSON format.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// The unique identifier the remote store assigns to a transaction on insert.
pub type TransactionId = i64;

/// The direction of money flow for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money flowing in.
    Income,
    /// Money flowing out.
    Expense,
}

impl TransactionKind {
    /// The wire/query-string value for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// The capitalized label shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a transaction belongs to personal or business finances.
///
/// This axis is orthogonal to [TransactionKind].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Personal finances.
    Personal,
    /// Business finances.
    Business,
}

impl Classification {
    /// The wire/query-string value for this classification.
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Personal => "personal",
            Classification::Business => "business",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An income or expense record, i.e. an event where money was either earned or
/// spent.
///
/// Instances only come from the remote store: the `id` and `created_at`
/// fields are assigned on insert and are immutable afterwards. To send a new
/// or updated record to the store, use [TransactionDraft].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether this transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The amount of money earned or spent, always non-negative.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category the transaction belongs to, e.g. "food" or "salary".
    ///
    /// The vocabulary differs by [TransactionKind] but is not enforced beyond
    /// the options the entry form offers.
    pub category: String,
    /// Whether the transaction is personal or business.
    #[serde(rename = "transaction_type")]
    pub classification: Classification,
    /// When the transaction happened.
    pub date: Date,
    /// Where the money came from. Only meaningful for income.
    #[serde(default)]
    pub source: Option<String>,
    /// When the record was inserted into the remote store.
    ///
    /// Only used for sort order (newest first); the store orders the list by
    /// this column on every fetch.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A transaction payload without the store-assigned fields.
///
/// Used both for inserting a new record and for the full-record replace that
/// an update performs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    /// Whether this transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The amount of money earned or spent.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category the transaction belongs to.
    pub category: String,
    /// Whether the transaction is personal or business.
    #[serde(rename = "transaction_type")]
    pub classification: Classification,
    /// When the transaction happened.
    pub date: Date,
    /// Where the money came from. Only meaningful for income.
    pub source: Option<String>,
}

/// The form data for creating or editing a transaction.
///
/// Field names match the input names on the entry and edit forms.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Whether the submitted record is income or an expense.
    pub kind: TransactionKind,
    /// The value of the transaction.
    pub amount: f64,
    /// Text detailing the transaction.
    pub description: String,
    /// The selected category.
    pub category: String,
    /// Whether the transaction is personal or business.
    pub classification: Classification,
    /// The date when the transaction occurred.
    pub date: Date,
    /// Where the money came from. The field is only rendered for income.
    #[serde(default)]
    pub source: Option<String>,
}

impl TransactionForm {
    /// Convert the submitted form into a draft for the remote store.
    ///
    /// An empty or whitespace-only source is normalized to `None`, and the
    /// source is discarded entirely for expenses since the field has no
    /// meaning there.
    pub fn into_draft(self) -> TransactionDraft {
        let source = match self.kind {
            TransactionKind::Income => self
                .source
                .filter(|source| !source.trim().is_empty()),
            TransactionKind::Expense => None,
        };

        TransactionDraft {
            kind: self.kind,
            amount: self.amount,
            description: self.description,
            category: self.category,
            classification: self.classification,
            date: self.date,
            source,
        }
    }
}

#[cfg(test)]
mod transaction_model_tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn transaction_round_trips_through_remote_json() {
        let json = r#"{
            "id": 7,
            "type": "income",
            "amount": 5000.0,
            "description": "Client payment for website design",
            "category": "client",
            "transaction_type": "business",
            "date": "2024-01-05",
            "source": "ABC Company",
            "created_at": "2024-01-05T10:30:00Z"
        }"#;

        let transaction: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(transaction.id, 7);
        assert_eq!(transaction.kind, TransactionKind::Income);
        assert_eq!(transaction.classification, Classification::Business);
        assert_eq!(transaction.date, date!(2024 - 01 - 05));
        assert_eq!(transaction.source.as_deref(), Some("ABC Company"));
    }

    #[test]
    fn missing_source_deserializes_as_none() {
        let json = r#"{
            "id": 1,
            "type": "expense",
            "amount": 150.0,
            "description": "Lunch",
            "category": "food",
            "transaction_type": "personal",
            "date": "2024-01-05",
            "created_at": "2024-01-05T12:00:00Z"
        }"#;

        let transaction: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(transaction.source, None);
    }

    #[test]
    fn draft_serializes_with_wire_field_names() {
        let draft = TransactionDraft {
            kind: TransactionKind::Expense,
            amount: 150.0,
            description: "Lunch".to_owned(),
            category: "food".to_owned(),
            classification: Classification::Personal,
            date: date!(2024 - 01 - 05),
            source: None,
        };

        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value["type"], "expense");
        assert_eq!(value["transaction_type"], "personal");
        assert_eq!(value["date"], "2024-01-05");
        assert!(value.get("id").is_none());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn form_discards_source_for_expenses() {
        let form = TransactionForm {
            kind: TransactionKind::Expense,
            amount: 12.5,
            description: "Bus fare".to_owned(),
            category: "transport".to_owned(),
            classification: Classification::Personal,
            date: date!(2024 - 02 - 01),
            source: Some("should not survive".to_owned()),
        };

        assert_eq!(form.into_draft().source, None);
    }

    #[test]
    fn form_normalizes_blank_source_to_none() {
        let form = TransactionForm {
            kind: TransactionKind::Income,
            amount: 100.0,
            description: "Tutoring".to_owned(),
            category: "other-income".to_owned(),
            classification: Classification::Personal,
            date: date!(2024 - 02 - 01),
            source: Some("   ".to_owned()),
        };

        assert_eq!(form.into_draft().source, None);
    }
}
