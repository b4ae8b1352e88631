//! The workflow page and the endpoints that move between steps.
//!
//! Loading the page happens in two parts: [prepare_step] runs the store
//! operations the current step needs, then [render_step] turns the session and
//! the prepared data into HTML without touching the store.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, FormRejection, PrivateCookieJar};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    dashboard::{dashboard_blocked_view, dashboard_view},
    details::details_view,
    endpoints,
    expenses::expense_form_view,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    ledger::Expense,
    navigation::StepNav,
    timezone::local_today,
    workflow::{Jurisdiction, Session, SessionStore, Step, StepEvent, TaxYear},
};

/// The state needed to display the workflow page.
#[derive(Debug, Clone)]
pub struct WorkflowState {
    /// The workflow state of every visitor.
    pub sessions: SessionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for WorkflowState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sessions: state.sessions.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The data a step needs before it can be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum StepView {
    /// The details step, with the year to suggest when no tax year is set.
    Details {
        /// The current year in the server's timezone.
        current_year: i32,
    },
    /// The expense entry step.
    Expenses {
        /// The date the expense form starts with.
        today: Date,
    },
    /// The dashboard, with every expense in the active store.
    Dashboard {
        /// The expenses read from the active store.
        expenses: Vec<Expense>,
    },
    /// The dashboard cannot be shown until the business details are entered.
    DashboardBlocked,
}

/// The extra head elements and body for one step.
pub struct StepContent {
    /// Scripts and styles the step needs.
    pub head: Vec<HeadElement>,
    /// The step's content, shown under the step heading.
    pub body: Markup,
}

/// Run the store operations for the current step of `session`.
///
/// The details step initializes the active store. The dashboard reads every
/// expense, but only once the business name and tax year have been entered.
///
/// # Errors
/// Returns any error from initializing or reading the active store.
pub fn prepare_step(session: &Session, today: Date) -> Result<StepView, Error> {
    match session.step {
        Step::Details => {
            session.store.initialize()?;

            Ok(StepView::Details {
                current_year: today.year(),
            })
        }
        Step::Expenses => Ok(StepView::Expenses { today }),
        Step::Dashboard => {
            if session.business_details().is_none() {
                return Ok(StepView::DashboardBlocked);
            }

            let expenses = session.store.read_all()?;

            Ok(StepView::Dashboard { expenses })
        }
    }
}

/// Render the workflow page for `session` from data prepared by [prepare_step].
pub fn render_step(session: &Session, view: &StepView) -> Markup {
    let content = match (view, session.business_details()) {
        (StepView::Details { current_year }, _) => details_view(session, *current_year),
        (StepView::Expenses { today }, _) => expense_form_view(*today),
        (StepView::Dashboard { expenses }, Some(details)) => dashboard_view(details, expenses),
        (StepView::Dashboard { .. }, None) | (StepView::DashboardBlocked, _) => {
            dashboard_blocked_view()
        }
    };

    let nav = StepNav::new(session.step);
    let title = session.step.title();

    let body = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            (nav.progress_html())

            h1 class="text-2xl font-bold mb-6" { (title) }

            (content.body)

            (nav.buttons_html())
        }
    );

    base(title, &content.head, &body)
}

/// Display the current step of the visitor's workflow.
///
/// Starts a new session if the request does not carry a known session cookie.
pub async fn get_workflow_page(
    State(state): State<WorkflowState>,
    jar: PrivateCookieJar,
) -> Result<Response, Error> {
    let (jar, _, session) = state.sessions.load(jar)?;
    let today = local_today(&state.local_timezone)?;

    let view = prepare_step(&session, today)
        .inspect_err(|error| tracing::error!("could not prepare {:?}: {error}", session.step))?;

    Ok((jar, render_step(&session, &view)).into_response())
}

/// Business details sent along with Next from the details step.
///
/// The other steps send no form, so every field may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct PendingDetails {
    /// The name of the business, ignored when blank.
    #[serde(default)]
    pub business_name: String,
    /// The tax year, if one was entered.
    pub tax_year: Option<i32>,
    /// Where the business is registered.
    pub jurisdiction: Option<Jurisdiction>,
}

/// Move the visitor's workflow to the next step and reload the page.
///
/// Any business details sent with the request are saved first, so details
/// typed on the first step are kept even if they were not saved separately.
/// An invalid tax year keeps the visitor on the current step.
pub async fn advance_step(
    State(sessions): State<SessionStore>,
    jar: PrivateCookieJar,
    form: Result<Form<PendingDetails>, FormRejection>,
) -> Response {
    let pending = match form {
        Ok(Form(pending)) => pending,
        Err(rejection) => {
            tracing::debug!("advancing without business details: {rejection}");
            PendingDetails::default()
        }
    };

    let tax_year = match pending.tax_year.map(TaxYear::new).transpose() {
        Ok(tax_year) => tax_year,
        Err(error) => {
            tracing::debug!("refused to advance: {error}");
            return error.into_alert_response();
        }
    };

    let business_name = pending.business_name.trim().to_owned();
    let jurisdiction = pending.jurisdiction;

    move_step(&sessions, jar, StepEvent::Advance, move |session| {
        if !business_name.is_empty() {
            session.business_name = business_name;
        }

        if let Some(tax_year) = tax_year {
            session.tax_year = Some(tax_year);
        }

        if let Some(jurisdiction) = jurisdiction {
            session.jurisdiction = jurisdiction;
        }
    })
}

/// Move the visitor's workflow to the previous step and reload the page.
pub async fn retreat_step(State(sessions): State<SessionStore>, jar: PrivateCookieJar) -> Response {
    move_step(&sessions, jar, StepEvent::Retreat, |_| {})
}

fn move_step<F>(
    sessions: &SessionStore,
    jar: PrivateCookieJar,
    event: StepEvent,
    update: F,
) -> Response
where
    F: FnOnce(&mut Session),
{
    let (jar, id, _) = match sessions.load(jar) {
        Ok(loaded) => loaded,
        Err(error) => return error.into_alert_response(),
    };

    let result = sessions.update(id, |session| {
        update(session);
        session.step = session.step.apply(event);
    });

    match result {
        Ok(session) => {
            tracing::debug!("session {id} moved to {:?} after {event:?}", session.step);

            (
                StatusCode::OK,
                HxRedirect(endpoints::ROOT.to_owned()),
                jar,
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        endpoints,
        ledger::{ExpenseCategory, LedgerStore, NewExpense},
        test_utils::{assert_valid_html, get_test_app},
        workflow::{COOKIE_SESSION_ID, Jurisdiction, Session, Step, TaxYear},
    };

    use super::{StepView, prepare_step, render_step};

    fn session_with_missing_store(step: Step) -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("missing").join("ledger.db"));
        let mut session = Session::new(store);
        session.step = step;

        (dir, session)
    }

    fn get_text(html: &Html, selector: &str) -> Vec<String> {
        html.select(&Selector::parse(selector).unwrap())
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[test]
    fn dashboard_without_details_never_reads_store() {
        // Reading this store would fail, so a successful result shows it was not read.
        let (_dir, session) = session_with_missing_store(Step::Dashboard);

        let view = prepare_step(&session, date!(2024 - 03 - 01));

        assert_eq!(view, Ok(StepView::DashboardBlocked));
    }

    #[test]
    fn dashboard_with_details_reads_store() {
        let (_dir, mut session) = session_with_missing_store(Step::Dashboard);
        session.business_name = "Acme".to_owned();
        session.tax_year = Some(TaxYear::new(2024).unwrap());

        let view = prepare_step(&session, date!(2024 - 03 - 01));

        assert!(view.is_err(), "want store error, got {view:?}");
    }

    #[test]
    fn details_step_initializes_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acme.db");
        let session = Session::new(LedgerStore::new(&path));

        let view = prepare_step(&session, date!(2024 - 03 - 01)).unwrap();

        assert_eq!(view, StepView::Details { current_year: 2024 });
        assert!(path.is_file());
    }

    #[test]
    fn dashboard_reads_every_expense() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("acme.db"));
        store.initialize().unwrap();
        let flight = store
            .append(
                NewExpense::build(date!(2024 - 01 - 15), ExpenseCategory::Travel, 450.0)
                    .description("Flight"),
            )
            .unwrap();
        let mut session = Session::new(store);
        session.step = Step::Dashboard;
        session.business_name = "Acme".to_owned();
        session.tax_year = Some(TaxYear::new(2024).unwrap());

        let view = prepare_step(&session, date!(2024 - 03 - 01)).unwrap();

        assert_eq!(
            view,
            StepView::Dashboard {
                expenses: vec![flight]
            }
        );
    }

    #[test]
    fn blocked_dashboard_only_offers_back() {
        let (_dir, session) = session_with_missing_store(Step::Dashboard);

        let html = render_step(&session, &StepView::DashboardBlocked).into_string();
        let html = Html::parse_document(&html);

        assert_valid_html(&html);
        assert_eq!(get_text(&html, "h1"), vec!["View Dashboard"]);
        assert_eq!(get_text(&html, "button"), vec!["Back"]);
        let warning = get_text(&html, "[role='alert']").join(" ");
        assert!(
            warning.contains("business details"),
            "want warning about business details, got {warning:?}"
        );
    }

    #[tokio::test]
    async fn first_visit_sets_cookie_and_shows_details_step() {
        let app = get_test_app();

        let response = app.server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        let cookie = response.cookie(COOKIE_SESSION_ID);
        assert!(!cookie.value().is_empty());
        let html = Html::parse_document(&response.text());
        assert_eq!(get_text(&html, "h1"), vec!["Enter Business Details"]);
    }

    #[tokio::test]
    async fn next_and_back_move_between_steps() {
        let app = get_test_app();
        let cookie = app.server.get(endpoints::ROOT).await.cookie(COOKIE_SESSION_ID);

        let response = app
            .server
            .post(endpoints::NEXT_STEP)
            .add_cookie(cookie.clone())
            .await;
        response.assert_status(StatusCode::OK);
        assert_eq!(response.header("hx-redirect"), endpoints::ROOT);

        let page = app
            .server
            .get(endpoints::ROOT)
            .add_cookie(cookie.clone())
            .await
            .text();
        assert_eq!(get_text(&Html::parse_document(&page), "h1"), vec!["Add Expenses"]);

        app.server
            .post(endpoints::PREVIOUS_STEP)
            .add_cookie(cookie.clone())
            .await
            .assert_status(StatusCode::OK);
        app.server
            .post(endpoints::PREVIOUS_STEP)
            .add_cookie(cookie.clone())
            .await
            .assert_status(StatusCode::OK);

        let page = app.server.get(endpoints::ROOT).add_cookie(cookie).await.text();
        assert_eq!(
            get_text(&Html::parse_document(&page), "h1"),
            vec!["Enter Business Details"]
        );
    }

    #[tokio::test]
    async fn next_from_details_keeps_unsaved_details() {
        let app = get_test_app();
        let (cookie, id) = app.start_session().await;

        let response = app
            .server
            .post(endpoints::NEXT_STEP)
            .add_cookie(cookie)
            .form(&[
                ("business_name", " Acme "),
                ("tax_year", "2024"),
                ("jurisdiction", "Other"),
            ])
            .await;

        response.assert_status(StatusCode::OK);
        let session = app.state.sessions.update(id, |_| {}).unwrap();
        assert_eq!(session.step, Step::Expenses);
        assert_eq!(session.business_name, "Acme");
        assert_eq!(session.tax_year, Some(TaxYear::new(2024).unwrap()));
        assert_eq!(session.jurisdiction, Jurisdiction::Other);
    }

    #[tokio::test]
    async fn next_with_blank_details_keeps_saved_details() {
        let app = get_test_app();
        let (cookie, id) = app.start_session().await;
        app.state
            .sessions
            .update(id, |session| {
                session.business_name = "Acme".to_owned();
                session.tax_year = Some(TaxYear::new(2024).unwrap());
            })
            .unwrap();

        app.server
            .post(endpoints::NEXT_STEP)
            .add_cookie(cookie)
            .form(&[("business_name", ""), ("tax_year", "")])
            .await
            .assert_status(StatusCode::OK);

        let session = app.state.sessions.update(id, |_| {}).unwrap();
        assert_eq!(session.step, Step::Expenses);
        assert_eq!(session.business_name, "Acme");
        assert_eq!(session.tax_year, Some(TaxYear::new(2024).unwrap()));
    }

    #[tokio::test]
    async fn next_with_invalid_tax_year_stays_on_details() {
        let app = get_test_app();
        let (cookie, id) = app.start_session().await;

        let response = app
            .server
            .post(endpoints::NEXT_STEP)
            .add_cookie(cookie)
            .form(&[("business_name", "Acme"), ("tax_year", "1999")])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Invalid tax year"));
        let session = app.state.sessions.update(id, |_| {}).unwrap();
        assert_eq!(session.step, Step::Details);
        assert_eq!(session.tax_year, None);
    }
}
