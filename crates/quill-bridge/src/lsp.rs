//! Projection of bridge records onto Language Server Protocol types.
//!
//! Editors that already speak LSP can forward these without knowing the
//! engine's vocabulary.

use lsp_types::{
    CompletionItem, CompletionItemKind, Diagnostic as LspDiagnostic, DiagnosticSeverity,
    NumberOrString, Position, Range,
};

use crate::records::{CompletionEntry, CompletionList, Diagnostic, DiagnosticCategory};

/// Value of the `source` field on every projected diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "quill";

/// Converts a diagnostic. Diagnostics without a location span the start of
/// the file.
#[must_use]
pub fn to_lsp_diagnostic(diagnostic: &Diagnostic) -> LspDiagnostic {
    let range = diagnostic.location.as_ref().map_or_else(Range::default, |location| {
        Range::new(
            Position::new(location.line, location.column),
            Position::new(location.end_line, location.end_column),
        )
    });
    let code = i32::try_from(diagnostic.code).map_or_else(
        |_| NumberOrString::String(diagnostic.code.to_string()),
        NumberOrString::Number,
    );

    LspDiagnostic {
        range,
        severity: Some(severity(diagnostic.category)),
        code: Some(code),
        source: Some(DIAGNOSTIC_SOURCE.to_owned()),
        message: diagnostic.message.clone(),
        ..LspDiagnostic::default()
    }
}

/// Converts a completion list, preserving entry order through `sort_text`.
#[must_use]
pub fn to_lsp_completion_list(list: &CompletionList) -> lsp_types::CompletionList {
    lsp_types::CompletionList {
        is_incomplete: list.is_incomplete,
        items: list.entries.iter().map(to_lsp_completion_item).collect(),
    }
}

/// Converts one completion entry.
#[must_use]
pub fn to_lsp_completion_item(entry: &CompletionEntry) -> CompletionItem {
    CompletionItem {
        label: entry.name.clone(),
        kind: completion_kind(&entry.kind),
        detail: entry.source.clone(),
        sort_text: Some(format!("{:010}", entry.rank)),
        insert_text: entry.insert_text.clone(),
        preselect: entry.flags.is_recommended.then_some(true),
        ..CompletionItem::default()
    }
}

const fn severity(category: DiagnosticCategory) -> DiagnosticSeverity {
    match category {
        DiagnosticCategory::Error => DiagnosticSeverity::ERROR,
        DiagnosticCategory::Warning => DiagnosticSeverity::WARNING,
        DiagnosticCategory::Suggestion => DiagnosticSeverity::HINT,
        DiagnosticCategory::Message => DiagnosticSeverity::INFORMATION,
    }
}

/// Maps an engine element kind onto the closest LSP completion kind.
#[must_use]
pub fn completion_kind(kind: &str) -> Option<CompletionItemKind> {
    let mapped = match kind {
        "keyword" | "primitive type" => CompletionItemKind::KEYWORD,
        "var" | "let" | "const" | "local var" | "alias" | "parameter" => {
            CompletionItemKind::VARIABLE
        }
        "property" | "getter" | "setter" => CompletionItemKind::FIELD,
        "function" | "local function" => CompletionItemKind::FUNCTION,
        "method" | "construct" | "call" | "index" => CompletionItemKind::METHOD,
        "enum" => CompletionItemKind::ENUM,
        "enum member" => CompletionItemKind::ENUM_MEMBER,
        "module" | "external module name" => CompletionItemKind::MODULE,
        "class" | "type" => CompletionItemKind::CLASS,
        "interface" => CompletionItemKind::INTERFACE,
        "script" => CompletionItemKind::FILE,
        "directory" => CompletionItemKind::FOLDER,
        "string" => CompletionItemKind::CONSTANT,
        "warning" => CompletionItemKind::TEXT,
        _ => return None,
    };
    Some(mapped)
}
