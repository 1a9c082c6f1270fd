//! Application router configuration.

use axum::{
    Router,
    middleware,
    response::Redirect,
    routing::{get, post, put},
};

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    export::export_transactions_endpoint,
    internal_server_error::get_internal_server_error_page,
    logging::logging_middleware,
    not_found::get_404_not_found,
    transaction::{
        clear_all_transactions_endpoint, create_transaction_endpoint,
        delete_transaction_endpoint, edit_transaction_endpoint, get_edit_transaction_page,
        get_new_transaction_page, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::NEW_TRANSACTION_VIEW, get(get_new_transaction_page))
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint).delete(clear_all_transactions_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::EXPORT_API, get(export_transactions_endpoint))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The entry form is the app's landing page, like the original's default view.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::NEW_TRANSACTION_VIEW)
}
