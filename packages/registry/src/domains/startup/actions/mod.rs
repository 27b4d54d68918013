pub mod create_startup;
pub mod incubate;
pub mod register;

pub use create_startup::create_startup;
pub use incubate::incubate;
pub use register::{register, PartnerEntry};
