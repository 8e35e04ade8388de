//! Shapes of the values the engine returns, decoded with `serde`.
//!
//! Nested collections whose items may be skipped individually stay as raw
//! [`Value`]s here and are decoded one by one by the marshaller.

use serde::Deserialize;
use serde_json::Value;

use crate::marshal::text::DisplayPart;
use crate::records::TextSpan;

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct RawTextSpan {
    pub(crate) start: u32,
    pub(crate) length: u32,
}

impl From<RawTextSpan> for TextSpan {
    fn from(span: RawTextSpan) -> Self {
        Self::new(span.start, span.length)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawMessageText {
    Text(String),
    Chain(RawMessageChain),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawMessageChain {
    pub(crate) message_text: String,
    #[serde(default)]
    pub(crate) next: Vec<RawMessageChain>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSourceFile {
    pub(crate) file_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDiagnostic {
    pub(crate) code: i64,
    #[serde(default = "default_category")]
    pub(crate) category: u8,
    pub(crate) message_text: RawMessageText,
    pub(crate) start: Option<u32>,
    pub(crate) length: Option<u32>,
    pub(crate) file: Option<RawSourceFile>,
}

const fn default_category() -> u8 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCompletionInfo {
    pub(crate) is_member_completion: bool,
    pub(crate) is_new_identifier_location: bool,
    #[serde(default)]
    pub(crate) is_incomplete: bool,
    pub(crate) optional_replacement_span: Option<RawTextSpan>,
    pub(crate) entries: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawSortText {
    Number(u32),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[expect(
    clippy::struct_excessive_bools,
    reason = "mirrors the engine's completion entry record"
)]
pub(crate) struct RawCompletionEntry {
    pub(crate) name: String,
    pub(crate) kind: String,
    #[serde(default)]
    pub(crate) kind_modifiers: String,
    pub(crate) sort_text: RawSortText,
    pub(crate) insert_text: Option<String>,
    pub(crate) replacement_span: Option<RawTextSpan>,
    pub(crate) source: Option<String>,
    #[serde(default)]
    pub(crate) has_action: bool,
    #[serde(default)]
    pub(crate) is_recommended: bool,
    #[serde(default)]
    pub(crate) is_from_unchecked_file: bool,
    #[serde(default)]
    pub(crate) is_snippet: bool,
    #[serde(default)]
    pub(crate) is_package_json_import: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCompletionEntryDetails {
    pub(crate) name: String,
    pub(crate) kind: String,
    #[serde(default)]
    pub(crate) kind_modifiers: String,
    pub(crate) display_parts: Option<Vec<DisplayPart>>,
    pub(crate) documentation: Option<Vec<DisplayPart>>,
    pub(crate) tags: Option<Vec<Value>>,
    pub(crate) code_actions: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTextChange {
    pub(crate) span: RawTextSpan,
    pub(crate) new_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawFileTextChanges {
    pub(crate) file_name: String,
    pub(crate) text_changes: Vec<RawTextChange>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCodeAction {
    pub(crate) description: String,
    pub(crate) changes: Vec<RawFileTextChanges>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawJsDocTag {
    pub(crate) name: String,
    pub(crate) text: Option<Vec<DisplayPart>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawNavigationTree {
    pub(crate) text: String,
    pub(crate) kind: String,
    #[serde(default)]
    pub(crate) kind_modifiers: String,
    #[serde(default)]
    pub(crate) spans: Vec<RawTextSpan>,
    pub(crate) name_span: Option<RawTextSpan>,
    #[serde(default)]
    pub(crate) child_items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawQuickInfo {
    pub(crate) kind: String,
    #[serde(default)]
    pub(crate) kind_modifiers: String,
    pub(crate) display_parts: Option<Vec<DisplayPart>>,
    pub(crate) documentation: Option<Vec<DisplayPart>>,
    pub(crate) tags: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawOutputFile {
    pub(crate) name: String,
    pub(crate) text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEmitOutput {
    pub(crate) output_files: Vec<RawOutputFile>,
    #[serde(default)]
    pub(crate) emit_skipped: bool,
}
