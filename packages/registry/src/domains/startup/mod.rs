//! Startup domain - organizations, incubation, legal registration

pub mod actions;
pub mod models;

// Re-export commonly used types
pub use actions::{create_startup, incubate, register, PartnerEntry};
pub use models::{
    ApprovalStatus, Partnership, RegistrationDetails, RegistrationType, Startup,
};
