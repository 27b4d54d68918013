// Venture Registry - membership core
//
// This crate implements the membership and invitation state machine for a
// multi-tenant venture registry: how a person's association with a startup
// is created, verified, authorized, transitioned, and reconciled into
// durable partnership records.
//
// Architecture follows domain-driven design; persistence and notification
// delivery are injected through the traits in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
