//! Logging initialization.

use tracing::info;
use tracing_subscriber::{fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Stdout logging configuration for a binary.
#[derive(Clone, Debug)]
pub struct LoggerConfig {
    /// Name reported in the startup log line.
    pub service_name: String,

    /// Emit JSON lines instead of the compact human format.
    pub json_format: bool,
}

impl LoggerConfig {
    pub fn new(service_name: String) -> Self {
        Self {
            service_name,
            json_format: false,
        }
    }

    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }
}

/// Initializes the logging subsystem with the provided config.
///
/// Defaults to INFO, overridable via `RUST_LOG`.
pub fn init(config: LoggerConfig) {
    let filt = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let stdout_sub = if config.json_format {
        layer().json().with_filter(filt).boxed()
    } else {
        layer().compact().with_filter(filt).boxed()
    };

    tracing_subscriber::registry().with(stdout_sub).init();

    info!(service_name = %config.service_name, "logging initialized");
}
