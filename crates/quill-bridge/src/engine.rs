//! Abstractions over the external analysis engine.
//!
//! The engine runs in a foreign runtime and hands its results back as
//! dynamically shaped JSON values. The bridge never interprets those values
//! here; decoding happens in the marshaller so that one malformed item can be
//! skipped without losing the rest of a batch.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::errors::HostContractError;
use crate::host::LanguageServiceHost;
use crate::settings::CompilationSettings;

/// Zero-based line and character resolved by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAndCharacter {
    /// Zero-based line.
    pub line: u32,
    /// Zero-based character within the line.
    pub character: u32,
}

impl LineAndCharacter {
    /// Builds a position.
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Errors reported by engine implementations.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl EngineError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human-friendly description without the optional source.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl From<HostContractError> for EngineError {
    fn from(error: HostContractError) -> Self {
        Self::with_source("host contract violated", error)
    }
}

/// Process-wide entry point into the analysis engine.
pub trait AnalysisEngine: Send + Sync {
    /// Engine version string.
    fn version(&self) -> String;

    /// Single-file transpilation without type information.
    fn transpile(
        &self,
        file_name: &str,
        text: &str,
        settings: &CompilationSettings,
    ) -> Result<Value, EngineError>;

    /// Creates a language service bound to `host`.
    fn create_language_service(
        &self,
        host: Arc<dyn LanguageServiceHost>,
    ) -> Result<Arc<dyn LanguageService>, EngineError>;
}

/// Incremental language service answering queries about one host's files.
///
/// Offsets are zero-based UTF-16 positions as understood by the engine; the
/// bridge passes them through untouched.
pub trait LanguageService: Send + Sync {
    /// Raw syntactic diagnostics for `file_name` (an array).
    fn syntactic_diagnostics(&self, file_name: &str) -> Result<Value, EngineError>;

    /// Raw semantic diagnostics for `file_name` (an array).
    fn semantic_diagnostics(&self, file_name: &str) -> Result<Value, EngineError>;

    /// Raw completion info at `position`, `null` when nothing applies.
    fn completions_at_position(&self, file_name: &str, position: u32)
    -> Result<Value, EngineError>;

    /// Raw details for the completion entry called `entry_name`.
    fn completion_entry_details(
        &self,
        file_name: &str,
        position: u32,
        entry_name: &str,
        source: Option<&str>,
    ) -> Result<Value, EngineError>;

    /// Raw navigation tree for `file_name`.
    fn navigation_tree(&self, file_name: &str) -> Result<Value, EngineError>;

    /// Raw quick info at `position`, `null` when nothing applies.
    fn quick_info_at_position(&self, file_name: &str, position: u32)
    -> Result<Value, EngineError>;

    /// Raw emit output for `file_name`.
    fn emit_output(&self, file_name: &str) -> Result<Value, EngineError>;

    /// Maps an offset in `file_name` to a line and character.
    fn line_and_character_of_position(
        &self,
        file_name: &str,
        position: u32,
    ) -> Result<LineAndCharacter, EngineError>;

    /// Applies a code action previously returned by this service.
    fn apply_code_action(&self, action: &Value) -> Result<Value, EngineError>;
}

impl fmt::Debug for dyn AnalysisEngine {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("AnalysisEngine")
    }
}

impl fmt::Debug for dyn LanguageService {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("LanguageService")
    }
}
