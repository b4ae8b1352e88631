//! The API endpoints URIs.

/// The workflow page for the current session.
pub const ROOT: &str = "/";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route for moving the workflow to the next step.
pub const NEXT_STEP: &str = "/api/step/next";
/// The route for moving the workflow to the previous step.
pub const PREVIOUS_STEP: &str = "/api/step/back";
/// The route for saving the business details.
pub const BUSINESS_DETAILS: &str = "/api/details";
/// The route for uploading an existing expense store.
pub const STORE_UPLOAD: &str = "/api/store";
/// The route for adding an expense.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route for downloading the expenses as CSV.
pub const EXPENSES_EXPORT: &str = "/api/expenses/export";
