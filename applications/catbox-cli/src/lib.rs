//! Catbox CLI Library
//!
//! Command-line front end for the Catbox client.
//!
//! This library exposes the configuration layer for testing purposes.

pub mod config;

pub use config::{CliConfig, ConfigError};
