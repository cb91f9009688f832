//! Configuration loading and schema

pub mod file_config;
pub mod loader;

pub use file_config::{FileConfig, GatewayConfig, LoggingConfig};
pub use loader::ConfigLoader;
