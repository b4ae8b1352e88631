//! Dashboard module
//!
//! The last step of the workflow: totals the expenses in the active store by
//! category, draws them as a pie chart, lists every record and offers a CSV
//! download.

mod aggregation;
mod charts;
mod export_endpoint;
mod tables;
mod view;

pub use export_endpoint::export_expenses_endpoint;
pub use view::{dashboard_blocked_view, dashboard_view};
