//! Business layer of the user registration screen: config, HTTP, and the
//! user-management states, computes and commands.

pub mod config;
pub mod http;
pub mod users;

pub use config::{ApiConfig, ConfigError};
pub use users::register;
