//! Shared configuration for the Quill script analysis bridge.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then an
//! optional configuration file, then `QUILL_*` environment variables and
//! finally command-line flags. Only ambient concerns live here. Compilation
//! settings handed to the analysis engine are fixed by the bridge and are
//! deliberately absent.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, default_engine_trace, default_log_filter, default_log_filter_string,
    default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "QUILL")]
pub struct Config {
    /// `tracing` filter directive applied to the subscriber.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log records.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Forward the engine's high-frequency trace hook to the logger.
    #[ortho_config(default = default_engine_trace())]
    pub engine_trace: bool,
}

impl Config {
    /// Filter directive for the tracing subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Configured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Whether engine trace output is forwarded.
    #[must_use]
    pub const fn engine_trace(&self) -> bool {
        self.engine_trace
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            engine_trace: default_engine_trace(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_uses_builtin_values() {
        let config = Config::default();

        assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(!config.engine_trace());
    }
}
