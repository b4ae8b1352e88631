//! Defines the endpoint for adding an expense to the active store.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar};
use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    Error,
    alert::Alert,
    html::format_currency,
    ledger::{ExpenseCategory, NewExpense},
    workflow::SessionStore,
};

/// The form data for adding an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// When the expense happened, as `YYYY-MM-DD`.
    pub date: String,
    /// What kind of expense this is.
    pub category: ExpenseCategory,
    /// A short description of what the money was spent on.
    #[serde(default)]
    pub description: String,
    /// How much was spent, in dollars.
    pub amount: f64,
    /// Any extra notes about the expense.
    #[serde(default)]
    pub notes: String,
}

/// A route handler for adding an expense to the visitor's active store.
pub async fn create_expense_endpoint(
    State(sessions): State<SessionStore>,
    jar: PrivateCookieJar,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let date = match parse_date(&form.date) {
        Ok(date) => date,
        Err(error) => return error.into_alert_response(),
    };

    if !form.amount.is_finite() || form.amount < 0.0 {
        return Error::InvalidAmount(form.amount).into_alert_response();
    }

    let (jar, _, session) = match sessions.load(jar) {
        Ok(loaded) => loaded,
        Err(error) => return error.into_alert_response(),
    };

    let expense = NewExpense::build(date, form.category, form.amount)
        .description(form.description.trim())
        .notes(form.notes.trim());

    match session.store.append(expense) {
        Ok(expense) => {
            tracing::info!(
                "added expense {} to {}",
                expense.id,
                session.store.path().display()
            );

            (
                jar,
                Alert::Success {
                    message: "Expense added successfully!".to_owned(),
                    details: format!(
                        "{} {} on {}.",
                        expense.category,
                        format_currency(expense.amount),
                        expense.date
                    ),
                },
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not add expense: {error}");
            error.into_alert_response()
        }
    }
}

fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]")).map_err(|error| {
        tracing::debug!("could not parse date {text:?}: {error}");
        Error::InvalidDate(text.to_owned())
    })
}
