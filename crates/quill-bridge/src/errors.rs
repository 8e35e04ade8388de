//! Error types surfaced by the bridge.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::engine::EngineError;

/// Operation being executed when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeOperation {
    /// Fast-path transpilation.
    Transpile,
    /// Language service creation.
    CreateService,
    /// Emit through a language service.
    Compile,
    /// Diagnostic retrieval.
    Diagnostics,
    /// Completion list retrieval.
    Completions,
    /// Completion entry detail retrieval.
    CompletionDetails,
    /// Navigation tree retrieval.
    NavigationTree,
    /// Quick info retrieval.
    Overview,
    /// Re-application of a code action.
    ApplyCodeAction,
}

impl fmt::Display for BridgeOperation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Transpile => "transpile",
            Self::CreateService => "service creation",
            Self::Compile => "compile",
            Self::Diagnostics => "diagnostics",
            Self::Completions => "completions",
            Self::CompletionDetails => "completion details",
            Self::NavigationTree => "navigation tree",
            Self::Overview => "overview",
            Self::ApplyCodeAction => "code action",
        };
        formatter.write_str(label)
    }
}

/// A bundled ambient declaration file could not be loaded.
///
/// The bundled file set is part of the application build, so these errors are
/// fatal: initialisation stops instead of running without ambient types.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// The resource is absent from the bundle.
    #[error("bundled resource '{path}' is missing")]
    MissingResource {
        /// Resource path that was requested.
        path: String,
    },

    /// The resource exists but reading it failed.
    #[error("bundled resource '{path}' could not be read: {source}")]
    Unreadable {
        /// Resource path that was requested.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// No file name can be derived from the resource path.
    #[error("resource path '{path}' does not name a file")]
    InvalidPath {
        /// Offending resource path.
        path: String,
    },

    /// Two different resources derive the same file name.
    #[error("resource '{path}' clashes with '{existing}' as '{file_name}'")]
    DuplicateFileName {
        /// File name both resources map to.
        file_name: String,
        /// Path registered first.
        existing: String,
        /// Path rejected now.
        path: String,
    },
}

/// The compilation root answered inconsistently for a listed file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostContractError {
    /// No version was reported.
    #[error("compilation root reported no version for '{file_name}'")]
    MissingVersion {
        /// File being queried.
        file_name: String,
    },

    /// No snapshot was reported.
    #[error("compilation root reported no snapshot for '{file_name}'")]
    MissingSnapshot {
        /// File being queried.
        file_name: String,
    },
}

/// A raw engine value did not have the expected shape.
#[derive(Debug, Error)]
pub enum MarshalError {
    /// Decoding into the expected shape failed.
    #[error("malformed {item}: {source}")]
    Shape {
        /// Kind of item being decoded.
        item: &'static str,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// A value that must be present was `null`.
    #[error("engine returned no {item}")]
    Missing {
        /// Kind of item that was absent.
        item: &'static str,
    },

    /// A completion entry carried a sort text without a numeric rank.
    #[error("completion entry '{name}' has non-numeric sort text '{sort_text}'")]
    SortText {
        /// Entry name.
        name: String,
        /// Offending sort text.
        sort_text: String,
    },

    /// Resolving a position through the engine failed.
    #[error("could not resolve position {offset} in '{file_name}': {source}")]
    Position {
        /// File the offset belongs to.
        file_name: String,
        /// Offset that failed to resolve.
        offset: u32,
        /// Engine error.
        #[source]
        source: EngineError,
    },
}

impl MarshalError {
    pub(crate) fn shape(item: &'static str, source: serde_json::Error) -> Self {
        Self::Shape { item, source }
    }
}

/// Errors returned by [`crate::ScriptBridge`].
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Ambient libraries could not be registered.
    #[error("failed to register shared libraries: {0}")]
    Packaging(#[from] PackagingError),

    /// The engine failed while serving a request.
    #[error("analysis engine failed during {operation}: {source}")]
    Engine {
        /// Operation that failed.
        operation: BridgeOperation,
        /// Underlying engine error.
        #[source]
        source: EngineError,
    },

    /// The engine returned a result the bridge cannot interpret.
    #[error("engine returned a malformed result during {operation}: {source}")]
    Malformed {
        /// Operation that failed.
        operation: BridgeOperation,
        /// Decoding error.
        #[source]
        source: MarshalError,
    },

    /// The engine declined to emit output for the file.
    #[error("emit was skipped for '{file_name}'")]
    EmitSkipped {
        /// File that produced no output.
        file_name: String,
    },
}

impl BridgeError {
    /// Wraps an engine failure.
    pub(crate) fn engine(operation: BridgeOperation, source: EngineError) -> Self {
        Self::Engine { operation, source }
    }

    /// Wraps a top-level decoding failure.
    pub(crate) fn malformed(operation: BridgeOperation, source: MarshalError) -> Self {
        Self::Malformed { operation, source }
    }
}
