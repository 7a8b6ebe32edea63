//! Command implementations.

pub mod analyze;
pub mod config;

pub use self::analyze::{effective_config, execute_analyze};
pub use self::config::execute_config;
