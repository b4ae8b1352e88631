//! The second step of the workflow: adding expenses to the active store.

mod create_endpoint;
mod view;

pub use create_endpoint::create_expense_endpoint;
pub use view::expense_form_view;
