//! Transaction management.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, its draft/form payloads, and the kind and
//!   classification enums
//! - View handlers for the entry form, the edit page, and the history page
//! - Endpoints for creating, replacing, and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
mod new_transaction_page;
mod transactions_page;

pub use core::{
    Classification, Transaction, TransactionDraft, TransactionForm, TransactionId, TransactionKind,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::{clear_all_transactions_endpoint, delete_transaction_endpoint};
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use new_transaction_page::get_new_transaction_page;
pub use transactions_page::get_transactions_page;
