//! Defines the endpoint for downloading the expenses as CSV.

use axum::{
    extract::State,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;

use crate::{
    Error,
    ledger::{export_file_name, expenses_to_csv},
    workflow::SessionStore,
};

/// Route handler that sends every expense in the active store as a CSV file.
///
/// The business name and tax year must have been entered, since they name the
/// downloaded file.
pub async fn export_expenses_endpoint(
    State(sessions): State<SessionStore>,
    jar: PrivateCookieJar,
) -> Response {
    let (jar, _, session) = match sessions.load(jar) {
        Ok(loaded) => loaded,
        Err(error) => return error.into_alert_response(),
    };

    let Some(details) = session.business_details() else {
        tracing::debug!("refused CSV export without business details");
        return Error::MissingBusinessDetails.into_alert_response();
    };

    let csv = match session.store.read_all().and_then(|expenses| {
        tracing::info!("exporting {} expenses as CSV", expenses.len());
        expenses_to_csv(&expenses)
    }) {
        Ok(csv) => csv,
        Err(error) => {
            tracing::error!("could not export expenses: {error}");
            return error.into_alert_response();
        }
    };

    let file_name = export_file_name(details.name, details.tax_year);

    (
        jar,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, content_disposition(&file_name)),
        ],
        csv,
    )
        .into_response()
}

/// The `Content-Disposition` header for downloading `file_name`.
///
/// Characters that cannot appear in a quoted header value are replaced with
/// underscores.
fn content_disposition(file_name: &str) -> HeaderValue {
    let safe_name = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>();

    HeaderValue::from_str(&format!("attachment; filename=\"{safe_name}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
