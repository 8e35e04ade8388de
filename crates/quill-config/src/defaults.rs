//! Built-in defaults shared by the configuration loader and embedders.

use crate::logging::LogFormat;

/// Default log filter expression used when nothing else is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required.
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Engine trace forwarding is off unless explicitly requested, since the
/// engine calls its trace hook for every file it touches.
#[must_use]
pub const fn default_engine_trace() -> bool {
    false
}
