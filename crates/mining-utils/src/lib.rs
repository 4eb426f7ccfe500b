//! Shared utilities for the mining industry agent
//!
//! Logging setup and the configuration that drives it.

pub mod config;
pub mod logging;

pub use config::{LogConfig, LogFormat};
pub use logging::{init_tracing, init_tracing_with};
