//! Bridge between a script editor and an external analysis engine.
//!
//! The crate adapts a host-side [`CompilationRoot`] to the host contract the
//! engine expects, serves shared ambient libraries from a process-wide
//! registry, and converts the engine's untyped results into the records in
//! [`records`]. Engines plug in through the [`AnalysisEngine`] and
//! [`LanguageService`] traits so tests and embedders can supply their own.

mod bridge;
mod capability;
mod engine;
mod errors;
mod handle;
mod host;
pub mod lsp;
mod marshal;
mod raw;
pub mod records;
mod registry;
mod resources;
mod root;
mod settings;
mod snapshot;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use bridge::ScriptBridge;
pub use capability::{HostCapabilities, HostCapability};
pub use engine::{AnalysisEngine, EngineError, LanguageService, LineAndCharacter};
pub use errors::{
    BridgeError, BridgeOperation, HostContractError, MarshalError, PackagingError,
};
pub use handle::{CodeActionHandle, ServiceHandle};
pub use host::{CompilationHost, LanguageServiceHost, host_supports};
pub use marshal::text::{DisplayPart, merge_doc_parts, split_tag_tokens};
pub use records::{
    CodeAction, CompileOutput, CompletionEntry, CompletionEntryDetails, CompletionEntryFlags,
    CompletionList, Diagnostic, DiagnosticCategory, DiagnosticLocation, DocTag,
    FileTextChanges, NavigationTree, Overview, TextChange, TextSpan,
};
pub use registry::{SHARED_DOCUMENT_VERSION, SharedDocument, SharedLibraryRegistry};
pub use resources::{DirectoryResources, LibraryBundle, ResourceSource, StaticResources};
pub use root::{CompilationRoot, MemoryCompilationRoot, ScriptVersion};
pub use settings::{
    CURRENT_DIRECTORY, CompilationSettings, DEFAULT_LIB_FILE_NAME, ModuleKind, NEW_LINE,
    ScriptTarget,
};
pub use snapshot::ScriptSnapshot;
