//! Shared errors and configuration for the C4 report suite.
//!
//! This crate provides the pieces used by both the report library and the
//! command-line host:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, LoggingConfig, ReportsConfig};
pub use error::AppError;
