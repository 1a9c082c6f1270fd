//! Alert partials for surfacing errors to users.
//!
//! Alerts are rendered as htmx partials: forms and buttons declare
//! `hx-target-error="#alert-container"` and a failed request swaps the alert
//! into the fixed container that [crate::html::base] puts on every page.
//! Successful mutations redirect instead, so the refreshed page itself is the
//! success feedback.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// An error alert with an optional detail line.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    message: &'a str,
    details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    /// Create a new error alert without details
    pub fn error_simple(message: &'a str) -> Self {
        Self::error(message, "")
    }

    /// Render the alert as a markup fragment.
    pub fn into_markup(self) -> Markup {
        html! {
            div
                class="flex items-start gap-3 p-4 mb-4 rounded-lg border \
                    text-red-800 border-red-300 bg-red-50 dark:bg-gray-800 \
                    dark:text-red-400 dark:border-red-800"
                role="alert"
            {
                span class="font-bold" { "!" }

                div
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="text-sm" { (self.details) }
                    }
                }

                button
                    type="button"
                    class="ms-auto font-bold"
                    aria-label="Dismiss"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }

    /// Render the alert as a response with the given status code.
    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, self.into_markup()).into_response()
    }
}
