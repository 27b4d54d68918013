//! Typed ID definitions for all domain entities.
//!
//! Each alias is a distinct type; the compiler prevents mixing them up.

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (founders and partners of record).
pub struct User;

/// Marker type for Startup entities (organizations).
pub struct Startup;

/// Marker type for Partnership entities (legal partner records).
pub struct Partnership;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for Startup entities.
pub type StartupId = Id<Startup>;

/// Typed ID for Partnership entities.
pub type PartnershipId = Id<Partnership>;
