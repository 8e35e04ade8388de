//! Text helpers shared by the converters.

use serde::{Deserialize, Serialize};

use crate::raw::{RawMessageChain, RawMessageText};

const SPACE_KIND: &str = "space";
const TEXT_KIND: &str = "text";

/// One token of engine display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPart {
    /// Token text.
    pub text: String,
    /// Token kind, e.g. `keyword`, `space` or `text`.
    #[serde(default)]
    pub kind: String,
}

impl DisplayPart {
    /// Builds a token.
    #[must_use]
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
        }
    }
}

/// Concatenates token texts in order. Absent input yields an empty string.
#[must_use]
pub fn merge_doc_parts(parts: Option<&[DisplayPart]>) -> String {
    parts
        .unwrap_or_default()
        .iter()
        .map(|part| part.text.as_str())
        .collect()
}

/// Splits tag tokens into a label run and a value run.
///
/// The value starts at the first token whose kind is neither `space` nor
/// `text`. Without such a token everything is label.
#[must_use]
pub fn split_tag_tokens(parts: &[DisplayPart]) -> (String, String) {
    let boundary = parts
        .iter()
        .position(|part| part.kind != SPACE_KIND && part.kind != TEXT_KIND)
        .unwrap_or(parts.len());
    let (label, value) = parts.split_at(boundary);
    (merge_doc_parts(Some(label)), merge_doc_parts(Some(value)))
}

/// Flattens a diagnostic message chain depth first, one message per line.
pub(crate) fn flatten_message(message: &RawMessageText) -> String {
    match message {
        RawMessageText::Text(text) => text.clone(),
        RawMessageText::Chain(chain) => {
            let mut lines = Vec::new();
            collect_chain(chain, &mut lines);
            lines.join("\n")
        }
    }
}

fn collect_chain<'a>(chain: &'a RawMessageChain, lines: &mut Vec<&'a str>) {
    lines.push(chain.message_text.as_str());
    for next in &chain.next {
        collect_chain(next, lines);
    }
}
