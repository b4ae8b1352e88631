//! The page shown for routes that do not exist.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// Route handler for any path without a route.
pub async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(
            error_view(
                "Not Found",
                "404",
                "Page not found.",
                "Check the address or go back to the homepage.",
            )
            .into_string(),
        ),
    )
        .into_response()
}
