//! Dashboard HTTP handler and view rendering.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{daily_summary, monthly_summary, recent},
        cards::{recent_transactions_view, summary_cards_view},
    },
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    store::TransactionStore,
    timezone::local_today,
};

/// How many transactions the recent-transactions list shows.
const RECENT_TRANSACTION_COUNT: usize = 5;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The transaction store backing the summary figures.
    pub store: Arc<TransactionStore>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display today's and this month's summary figures plus the most recent
/// transactions.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let transactions = state.store.snapshot()?;
    let today = local_today(&state.local_timezone)?;

    let daily = daily_summary(&transactions, today);
    let monthly = monthly_summary(&transactions, today.year(), today.month());
    let recent_transactions = recent(&transactions, RECENT_TRANSACTION_COUNT);

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    let content = html! {
        (nav_bar.into_html())

        div class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-3xl" {
                h2 class="text-2xl font-bold" { "Financial Dashboard" }

                (summary_cards_view("Today", &daily))
                (summary_cards_view("This Month", &monthly))
                (recent_transactions_view(recent_transactions))
            }
        }
    };

    Ok(dashboard_page(&content).into_response())
}

fn dashboard_page(content: &Markup) -> Markup {
    base("Dashboard", content)
}
