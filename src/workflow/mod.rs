//! The three step workflow: the step state machine, the per-visitor session and
//! the page that renders the current step.

mod page;
mod session;
mod session_store;
mod step;

pub use page::{StepContent, advance_step, get_workflow_page, retreat_step};
pub use session::{BusinessDetails, Jurisdiction, Session, TaxYear};
pub use session_store::SessionStore;
pub use step::{Step, StepEvent};

#[cfg(test)]
pub(crate) use session_store::COOKIE_SESSION_ID;
