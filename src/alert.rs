//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the
//! `#alert-container` element defined in [crate::html::base].

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// An alert message to show at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action worked.
    Success {
        /// The headline of the alert.
        message: String,
        /// A longer explanation shown under the headline.
        details: String,
    },
    /// The action failed.
    Error {
        /// The headline of the alert.
        message: String,
        /// What went wrong and how to fix it.
        details: String,
    },
    /// The action failed and there is nothing more to explain.
    ErrorSimple {
        /// The headline of the alert.
        message: String,
    },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message, details } => (
                "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
                dark:bg-gray-800 dark:text-green-400",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                dark:bg-gray-800 dark:text-red-400",
                message,
                details,
            ),
            Alert::ErrorSimple { message } => (
                "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                dark:bg-gray-800 dark:text-red-400",
                message,
                String::new(),
            ),
        };

        // Template adapted from https://flowbite.com/docs/components/alerts/
        html!(
            div
                role="alert"
                class=(container_style)
                onclick="this.remove()"
            {
                span class="font-medium" { (message) }

                @if !details.is_empty() {
                    p { (details) }
                }
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
