//! Host-native records produced by the marshaller.
//!
//! Records serialise with camel-cased field names so the embedding
//! application can hand them straight to the script editor.

use serde::Serialize;

use crate::handle::CodeActionHandle;

/// Half-open range of text offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextSpan {
    /// First offset covered.
    pub start: u32,
    /// Number of offsets covered.
    pub length: u32,
}

impl TextSpan {
    /// Builds a span.
    #[must_use]
    pub const fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    /// First offset past the span.
    #[must_use]
    pub const fn end(self) -> u32 {
        self.start.saturating_add(self.length)
    }
}

/// Severity class of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    /// Likely problem that does not block emit.
    Warning,
    /// Compilation error.
    Error,
    /// Stylistic or refactoring hint.
    Suggestion,
    /// Informational message.
    Message,
}

impl DiagnosticCategory {
    /// Maps the engine's numeric category; unknown values count as errors.
    #[must_use]
    pub const fn from_engine(value: u8) -> Self {
        match value {
            0 => Self::Warning,
            2 => Self::Suggestion,
            3 => Self::Message,
            _ => Self::Error,
        }
    }
}

/// Where a diagnostic applies, resolved by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticLocation {
    /// File the diagnostic belongs to.
    pub file_name: String,
    /// Zero-based start line.
    pub line: u32,
    /// Zero-based start column.
    pub column: u32,
    /// Zero-based end line.
    pub end_line: u32,
    /// Zero-based end column.
    pub end_column: u32,
    /// Start offset.
    pub offset: u32,
    /// Length in offsets.
    pub length: u32,
}

/// Compiler diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Engine diagnostic code.
    pub code: i64,
    /// Severity class.
    pub category: DiagnosticCategory,
    /// Message with nested chains joined by newlines.
    pub message: String,
    /// Position, present only when the engine reported a start offset.
    pub location: Option<DiagnosticLocation>,
}

/// Boolean markers the engine attaches to a completion entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag is an independent engine marker"
)]
pub struct CompletionEntryFlags {
    /// Accepting the entry runs extra edits, such as adding an import.
    pub has_action: bool,
    /// The engine recommends this entry.
    pub is_recommended: bool,
    /// The entry comes from a file that is not type-checked.
    pub is_from_unchecked_file: bool,
    /// `insert_text` is a snippet.
    pub is_snippet: bool,
    /// The entry imports from a package manifest dependency.
    pub is_package_json_import: bool,
}

/// One completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEntry {
    /// Suggested identifier.
    pub name: String,
    /// Engine element kind, e.g. `function`.
    pub kind: String,
    /// Comma-separated engine modifiers.
    pub kind_modifiers: String,
    /// Engine markers.
    pub flags: CompletionEntryFlags,
    /// Text to insert. `None` means insert `name` verbatim.
    pub insert_text: Option<String>,
    /// Text replaced on insertion.
    pub replacement_span: Option<TextSpan>,
    /// Sort rank, lower first.
    pub rank: u32,
    /// Module the entry would be imported from.
    pub source: Option<String>,
}

/// Completion suggestions at one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionList {
    /// Completing a member after `.`.
    pub is_member_completion: bool,
    /// The user may be typing a new identifier.
    pub is_new_identifier_location: bool,
    /// More entries exist than were returned.
    pub is_incomplete: bool,
    /// Entries in engine order.
    pub entries: Vec<CompletionEntry>,
}

/// One replacement inside a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChange {
    /// Start offset.
    pub offset: u32,
    /// Number of offsets replaced.
    pub length: u32,
    /// Replacement text.
    pub replacement: String,
}

/// Ordered replacements for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTextChanges {
    /// File being edited.
    pub file_name: String,
    /// Replacements in engine order.
    pub text_changes: Vec<TextChange>,
}

/// Edit the engine offers, applicable later through its handle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAction {
    /// Human-readable description.
    pub description: String,
    /// Edits grouped per file.
    pub changes: Vec<FileTextChanges>,
    /// Opaque re-application handle.
    #[serde(skip)]
    pub handle: CodeActionHandle,
}

/// JSDoc-style tag split into label and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocTag {
    /// Tag name without `@`.
    pub name: String,
    /// Leading text run.
    pub label: String,
    /// Remainder starting at the first structured token.
    pub value: String,
}

/// Extended information about one completion entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEntryDetails {
    /// Entry name.
    pub name: String,
    /// Engine element kind.
    pub kind: String,
    /// Engine modifiers.
    pub kind_modifiers: String,
    /// Signature text.
    pub display: String,
    /// Documentation text.
    pub documentation: String,
    /// Documentation tags.
    pub tags: Vec<DocTag>,
    /// Edits applied when the entry is accepted.
    pub code_actions: Vec<CodeAction>,
}

/// Outline node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTree {
    /// Display text.
    pub text: String,
    /// Engine element kind.
    pub kind: String,
    /// Engine modifiers.
    pub kind_modifiers: String,
    /// Name span, else the first declaration span.
    pub span: Option<TextSpan>,
    /// Child nodes in engine order.
    pub children: Vec<NavigationTree>,
}

/// Quick information about the symbol at a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    /// Engine element kind.
    pub kind: String,
    /// Engine modifiers.
    pub kind_modifiers: String,
    /// Signature text.
    pub display: String,
    /// Documentation text.
    pub documentation: String,
    /// Documentation tags.
    pub tags: Vec<DocTag>,
}

/// Emitted JavaScript for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileOutput {
    /// Source file name.
    pub source_file: String,
    /// Output name, always the source name plus `.js`.
    pub js_file: String,
    /// Output text.
    pub js: String,
    /// Source map name, always the source name plus `.js.map`.
    pub map_file: String,
    /// Source map text, when the engine produced one.
    pub map: Option<String>,
}
