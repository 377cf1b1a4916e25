mod controller;
mod record;
mod state;

pub use controller::Session;
pub use record::{SubmissionOutcome, SubmissionRecord};
pub use state::{ApiHealth, Transition, ViewState};
