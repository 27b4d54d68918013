pub mod partnership;
pub mod startup;

pub use partnership::Partnership;
pub use startup::{ApprovalStatus, RegistrationDetails, RegistrationType, Startup};
