//! Telemetry and logging infrastructure

pub mod logging;

pub use logging::{default_log_path, init_logging, LogConfig};
