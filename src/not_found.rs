//! Defines the route handler for the 404 not found page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// Render the 404 page. Used as the router's fallback handler.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Build the 404 response for handlers that discover a missing resource
/// themselves.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "Sorry, this page does not exist.",
            "Check the address for typos, or head back to the start.",
        ),
    )
        .into_response()
}
