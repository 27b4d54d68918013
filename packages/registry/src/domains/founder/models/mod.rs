pub mod user;

pub use user::{generate_token, CofounderStatus, User};
