// Domain modules - membership state machine and registration reconciler

pub mod founder;
pub mod startup;
