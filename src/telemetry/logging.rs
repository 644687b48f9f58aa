//! Logging configuration and initialization
//!
//! Console output through tracing-subscriber, optional JSON formatting and
//! optional file logging. Records emitted through the `log` facade are
//! bridged into tracing by the subscriber.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Enable console output (default: true)
    pub console_enabled: bool,
    /// Enable file logging (default: false)
    pub file_enabled: bool,
    /// Path for the log file (default: None, uses the platform data directory)
    pub file_path: Option<PathBuf>,
    /// Use JSON format for console logs (default: false)
    pub json_format: bool,
    /// Default log level filter (default: "info")
    pub default_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_enabled: true,
            file_enabled: false,
            file_path: None,
            json_format: false,
            default_level: "info".to_string(),
        }
    }
}

/// Default log file location: `<data dir>/projmap-previs/previs.log`
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("projmap-previs")
        .join("previs.log")
}

/// Whether console output should be JSON. `PROJMAP_LOG_FORMAT` wins over
/// the configured flag when set.
fn json_requested(env_format: Option<&str>, configured: bool) -> bool {
    env_format.map_or(configured, |format| format.eq_ignore_ascii_case("json"))
}

/// Install the global subscriber.
///
/// Filter precedence: `PROJMAP_LOG`, then `RUST_LOG`, then
/// `config.default_level`. The returned guard flushes the log file on drop
/// and must outlive all logging.
pub fn init_logging(
    config: &LogConfig,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_env("PROJMAP_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(&config.default_level));

    let use_json = json_requested(
        std::env::var("PROJMAP_LOG_FORMAT").ok().as_deref(),
        config.json_format,
    );

    let mut log_path = None;
    let mut file_guard = None;
    let file_layer = if config.file_enabled {
        let path = config.file_path.clone().unwrap_or_else(default_log_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let (writer, guard) = tracing_appender::non_blocking(std::fs::File::create(&path)?);
        file_guard = Some(guard);
        log_path = Some(path);
        Some(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
    } else {
        None
    };

    let json_console = (config.console_enabled && use_json).then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
    });
    let text_console = (config.console_enabled && !use_json)
        .then(|| fmt::layer().with_writer(std::io::stderr).compact());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(json_console)
        .with(text_console)
        .try_init()?;

    tracing::info!(
        target: "projmap_previs",
        version = env!("CARGO_PKG_VERSION"),
        json_format = use_json,
        log_file = ?log_path,
        "Logging initialized"
    );

    Ok(file_guard)
}
