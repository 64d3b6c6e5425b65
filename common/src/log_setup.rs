use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Clone, Debug)]
pub struct LogOptions {
    pub base_level: String,
    /// Directory for daily-rotated log files. `None` logs to stderr only.
    pub log_dir: Option<String>,
    pub file_prefix: String,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            base_level: "info".to_string(),
            log_dir: Some("logs".to_string()),
            file_prefix: "stars".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogSetupError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("Failed to create log directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to create log file appender: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),
    #[error("Logger initialization failed: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Installs the global subscriber. Console output goes to stderr so stdout
/// stays reserved for command results.
pub fn setup_logging(options: &LogOptions) -> Result<(), LogSetupError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&options.base_level)?,
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true)
        .with_writer(std::io::stderr);

    let file_layer = match options.log_dir.as_deref() {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;

            let file_appender = tracing_appender::rolling::Builder::new()
                .rotation(tracing_appender::rolling::Rotation::DAILY)
                .filename_prefix(&options.file_prefix)
                .filename_suffix("log")
                .max_log_files(5)
                .build(dir)?;

            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            // A second call keeps the first guard alive; its subscriber init fails below anyway.
            let _ = LOG_GUARD.set(guard);

            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_ansi(false)
                    .with_writer(file_writer),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

/// Best-effort logging for tests: console only, ignores double initialization.
pub fn setup_test_logging(base_level: &str) {
    let options = LogOptions {
        base_level: base_level.to_string(),
        log_dir: None,
        ..LogOptions::default()
    };
    let _ = setup_logging(&options);
}
