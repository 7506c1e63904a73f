//! Process-level plumbing shared by service binaries: layered configuration
//! and logging bootstrap.

pub mod config;
pub mod logging;

pub use config::{AppConfig, CliArgs, HttpConfig, LoggingConfig, Section, ServerConfig};
