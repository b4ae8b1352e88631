//! The first step of the workflow: choosing the expense store and entering the
//! business details.

mod details_endpoint;
mod store_endpoint;
mod view;

pub use details_endpoint::update_details_endpoint;
pub use store_endpoint::{MAX_STORE_UPLOAD_BYTES, import_store_endpoint};
pub use view::{DETAILS_FORM_ID, details_view};
