//! Dashboard module
//!
//! Provides the overview page showing today's and this month's summary
//! figures and the most recent transactions, plus the pure aggregation
//! functions the page and the history view are built on.

pub(crate) mod aggregation;
mod cards;
mod handlers;

pub use handlers::get_dashboard_page;
