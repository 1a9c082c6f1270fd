//! The in-memory mirror of the remote transaction list.
//!
//! Every successful reload replaces the whole list; nothing is patched in
//! place. Reloads race when mutations fire in quick succession, so each
//! reload takes a ticket at request time and the mirror only accepts a result
//! whose ticket is newer than the last one applied. The displayed state
//! therefore follows request order, not completion order.

use crate::transaction::Transaction;

/// The mirrored transaction list together with the ticket of the reload that
/// produced it.
#[derive(Debug, Default)]
pub(crate) struct Mirror {
    transactions: Vec<Transaction>,
    applied_ticket: u64,
}

impl Mirror {
    /// Replace the mirrored list with the result of the reload identified by
    /// `ticket`.
    ///
    /// Returns `false` without touching the list when a reload issued later
    /// has already been applied.
    pub(crate) fn apply(&mut self, ticket: u64, transactions: Vec<Transaction>) -> bool {
        if ticket <= self.applied_ticket {
            tracing::debug!(
                "discarding stale reload {ticket} (already applied {})",
                self.applied_ticket
            );
            return false;
        }

        self.applied_ticket = ticket;
        self.transactions = transactions;
        true
    }

    /// A clone of the mirrored list in its stored (newest-first) order.
    pub(crate) fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }
}
