//! Founder domain - membership ledger, invitations, direct-link joins
//!
//! A founder's relation to a startup moves unaffiliated -> pending ->
//! member; removal destroys the pending placeholder, and direct-link
//! confirmation jumps straight to member.

pub mod actions;
pub mod models;

// Re-export commonly used types
pub use actions::{confirm_link, invite, list_statuses, remove, FounderStatus, InviteOutcome};
pub use models::{CofounderStatus, User};
