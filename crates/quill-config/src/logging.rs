use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON suitable for ingestion by the host application's log sink.
    #[default]
    Json,
    /// Human-readable single line output for interactive debugging.
    Compact,
}

/// Errors encountered while parsing a [`LogFormat`] from text.
pub type LogFormatParseError = strum::ParseError;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("COMPACT", LogFormat::Compact)]
    #[case(" compact", LogFormat::Compact)]
    fn parses_log_formats_case_insensitively(#[case] input: &str, #[case] expected: LogFormat) {
        let parsed = LogFormat::from_str(input.trim()).expect("format should parse");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn rejects_unknown_formats() {
        assert!(LogFormat::from_str("pretty").is_err());
    }
}
