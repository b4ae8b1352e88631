//! Defines the endpoint for saving the business details.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar};
use serde::Deserialize;

use crate::{
    Error,
    alert::Alert,
    workflow::{Jurisdiction, SessionStore, TaxYear},
};

/// The form data for the business details.
#[derive(Debug, Deserialize)]
pub struct DetailsForm {
    /// The name of the business.
    pub business_name: String,
    /// The tax year the expenses are recorded for.
    pub tax_year: i32,
    /// Where the business is registered.
    #[serde(default)]
    pub jurisdiction: Jurisdiction,
}

/// A route handler for saving the business details to the visitor's session.
pub async fn update_details_endpoint(
    State(sessions): State<SessionStore>,
    jar: PrivateCookieJar,
    Form(form): Form<DetailsForm>,
) -> Response {
    let business_name = form.business_name.trim().to_owned();

    if business_name.is_empty() {
        return Error::EmptyBusinessName.into_alert_response();
    }

    let tax_year = match TaxYear::new(form.tax_year) {
        Ok(tax_year) => tax_year,
        Err(error) => {
            tracing::debug!("rejected business details: {error}");
            return error.into_alert_response();
        }
    };

    let (jar, id, _) = match sessions.load(jar) {
        Ok(loaded) => loaded,
        Err(error) => return error.into_alert_response(),
    };

    let result = sessions.update(id, |session| {
        session.business_name = business_name;
        session.tax_year = Some(tax_year);
        session.jurisdiction = form.jurisdiction;
    });

    match result {
        Ok(session) => {
            tracing::info!(
                "session {id} saved business details for {:?} ({})",
                session.business_name,
                tax_year
            );

            (
                jar,
                Alert::Success {
                    message: "Business details saved".to_owned(),
                    details: format!(
                        "{}, {} tax year, {}.",
                        session.business_name,
                        tax_year,
                        session.jurisdiction.as_str()
                    ),
                },
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}
