//! Bizledger is a web app for recording the expenses of a small business over
//! a tax year.
//!
//! The user works through three steps: enter the business details, add
//! expenses to a SQLite ledger, then view a dashboard that totals the expenses
//! by category and offers a CSV export.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod details;
mod endpoints;
mod expenses;
mod html;
mod internal_server_error;
mod ledger;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod workflow;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use ledger::{Expense, ExpenseCategory, LedgerStore, NewExpense};
pub use logging::logging_middleware;
pub use routing::build_router;

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The file at the given path is not a ledger store this app can use.
    ///
    /// Either the file is not a SQLite database, or it has an `expenses`
    /// table that is missing one of the expected columns.
    #[error("incompatible expense store: {0}")]
    IncompatibleStore(String),

    /// The store file could not be read, written or moved into place.
    ///
    /// The string holds the underlying I/O error message.
    #[error("could not access the expense store file: {0}")]
    StoreIo(String),

    /// The uploaded file name was empty or had no usable final component.
    #[error("invalid file name \"{0}\"")]
    InvalidFileName(String),

    /// The multipart form could not be parsed.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The multipart form did not contain a store file.
    #[error("no store file was uploaded")]
    MissingStoreFile,

    /// The tax year fell outside of the supported range.
    #[error("{0} is not a valid tax year, it must be between 2000 and 2100")]
    InvalidTaxYear(i32),

    /// The business name was empty or only whitespace.
    #[error("the business name must not be empty")]
    EmptyBusinessName,

    /// An expense amount was negative or not a finite number.
    #[error("{0} is not a valid expense amount")]
    InvalidAmount(f64),

    /// A date string could not be parsed as `YYYY-MM-DD`.
    #[error("could not parse the date \"{0}\"")]
    InvalidDate(String),

    /// The business name or tax year has not been entered yet.
    #[error("the business name and tax year must be entered first")]
    MissingBusinessDetails,

    /// The expenses could not be written as CSV.
    #[error("could not write CSV: {0}")]
    CsvError(String),

    /// Could not acquire the session store lock
    #[error("could not acquire the session lock")]
    SessionLockError,

    /// The configured timezone is not a known canonical timezone name.
    #[error("{0} is not a valid canonical timezone name")]
    InvalidTimezoneError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(sql_error, _)
                if sql_error.code == rusqlite::ErrorCode::NotADatabase =>
            {
                Error::IncompatibleStore("the file is not a SQLite database".to_owned())
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.code == rusqlite::ErrorCode::CannotOpen =>
            {
                tracing::error!("could not open the expense store: {desc}");
                Error::StoreIo(desc.to_owned())
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        tracing::error!("an I/O error occurred: {value}");
        Error::StoreIo(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::IncompatibleStore(reason) => InternalServerError {
                description: "Incompatible Expense Store",
                fix: &format!(
                    "The active expense store cannot be used: {reason}. \
                    Upload a different store or restart with a new working directory."
                ),
            }
            .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string."
                ),
            }
            .into_response(),
            Error::SessionLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::IncompatibleStore(reason) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Incompatible expense store".to_owned(),
                    details: format!(
                        "{reason}. Choose a SQLite database that was created by this app."
                    ),
                },
            )
                .into_response(),
            Error::InvalidFileName(name) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid file name".to_owned(),
                    details: format!("Could not save an uploaded file named \"{name}\"."),
                },
            )
                .into_response(),
            Error::MissingStoreFile => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Choose a database file to upload.".to_owned(),
                },
            )
                .into_response(),
            Error::MultipartError(_) => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Could not read the uploaded file.".to_owned(),
                },
            )
                .into_response(),
            Error::InvalidTaxYear(year) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid tax year".to_owned(),
                    details: format!("{year} is not between 2000 and 2100."),
                },
            )
                .into_response(),
            Error::EmptyBusinessName => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Business name missing".to_owned(),
                    details: "Enter the name of your business.".to_owned(),
                },
            )
                .into_response(),
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: format!("{amount} is not a valid amount, it must be zero or more."),
                },
            )
                .into_response(),
            Error::InvalidDate(date) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid expense date".to_owned(),
                    details: format!("Could not read \"{date}\" as a date."),
                },
            )
                .into_response(),
            Error::MissingBusinessDetails => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Business details missing".to_owned(),
                    details: "Please enter your business details first.".to_owned(),
                },
            )
                .into_response(),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details: "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                },
            )
                .into_response(),
        }
    }
}
