//! Application router configuration.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{
    AppState,
    dashboard::export_expenses_endpoint,
    details::{MAX_STORE_UPLOAD_BYTES, import_store_endpoint, update_details_endpoint},
    endpoints,
    expenses::create_expense_endpoint,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    workflow::{advance_step, get_workflow_page, retreat_step},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_workflow_page))
        .route(endpoints::NEXT_STEP, post(advance_step))
        .route(endpoints::PREVIOUS_STEP, post(retreat_step))
        .route(endpoints::BUSINESS_DETAILS, post(update_details_endpoint))
        .route(
            endpoints::STORE_UPLOAD,
            post(import_store_endpoint).layer(DefaultBodyLimit::max(MAX_STORE_UPLOAD_BYTES)),
        )
        .route(endpoints::EXPENSES_API, post(create_expense_endpoint))
        .route(endpoints::EXPENSES_EXPORT, get(export_expenses_endpoint))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use scraper::{Html, Selector};

    use crate::{endpoints, test_utils::get_test_app};

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let app = get_test_app();

        let response = app.server.get("/transactions").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let html = Html::parse_document(&response.text());
        let header = html
            .select(&Selector::parse("h1").unwrap())
            .next()
            .expect("no h1 found");
        assert_eq!(header.text().collect::<String>(), "404");
    }

    #[tokio::test]
    async fn error_page_is_internal_server_error() {
        let app = get_test_app();

        let response = app.server.get(endpoints::INTERNAL_ERROR_VIEW).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.text().contains("Sorry, something went wrong."));
    }

    #[tokio::test]
    async fn step_routes_only_accept_post() {
        let app = get_test_app();

        let response = app.server.get(endpoints::NEXT_STEP).await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}
