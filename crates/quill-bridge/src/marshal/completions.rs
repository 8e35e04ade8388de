//! Completion list and completion detail conversion.

use serde_json::Value;

use crate::errors::MarshalError;
use crate::handle::ServiceHandle;
use crate::raw::{RawCompletionEntry, RawCompletionEntryDetails, RawCompletionInfo, RawSortText};
use crate::records::{
    CompletionEntry, CompletionEntryDetails, CompletionEntryFlags, CompletionList, TextSpan,
};

use super::text::merge_doc_parts;
use super::{code_actions, convert_each, decode, overview};

/// Converts raw completion info, `None` when the engine reported none.
pub(crate) fn convert(raw: Value) -> Result<Option<CompletionList>, MarshalError> {
    if raw.is_null() {
        return Ok(None);
    }
    let info: RawCompletionInfo = decode("completion list", raw)?;
    let default_span = info.optional_replacement_span.map(TextSpan::from);
    let entries = convert_each("completion entry", info.entries, |value| {
        convert_entry(decode("completion entry", value)?, default_span)
    });

    Ok(Some(CompletionList {
        is_member_completion: info.is_member_completion,
        is_new_identifier_location: info.is_new_identifier_location,
        is_incomplete: info.is_incomplete,
        entries,
    }))
}

fn convert_entry(
    raw: RawCompletionEntry,
    default_span: Option<TextSpan>,
) -> Result<CompletionEntry, MarshalError> {
    let rank = match &raw.sort_text {
        RawSortText::Number(rank) => *rank,
        RawSortText::Text(text) => parse_rank(text).ok_or_else(|| MarshalError::SortText {
            name: raw.name.clone(),
            sort_text: text.clone(),
        })?,
    };

    Ok(CompletionEntry {
        name: raw.name,
        kind: raw.kind,
        kind_modifiers: raw.kind_modifiers,
        flags: CompletionEntryFlags {
            has_action: raw.has_action,
            is_recommended: raw.is_recommended,
            is_from_unchecked_file: raw.is_from_unchecked_file,
            is_snippet: raw.is_snippet,
            is_package_json_import: raw.is_package_json_import,
        },
        insert_text: raw.insert_text,
        replacement_span: raw.replacement_span.map(TextSpan::from).or(default_span),
        rank,
        source: raw.source,
    })
}

/// Integer value of the first run of ASCII digits in `sort_text`.
fn parse_rank(sort_text: &str) -> Option<u32> {
    let digits: String = sort_text
        .chars()
        .skip_while(|character| !character.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Converts raw completion entry details, `None` when the engine had none.
pub(crate) fn convert_details(
    service: &ServiceHandle,
    raw: Value,
) -> Result<Option<CompletionEntryDetails>, MarshalError> {
    if raw.is_null() {
        return Ok(None);
    }
    let details: RawCompletionEntryDetails = decode("completion details", raw)?;

    Ok(Some(CompletionEntryDetails {
        name: details.name,
        kind: details.kind,
        kind_modifiers: details.kind_modifiers,
        display: merge_doc_parts(details.display_parts.as_deref()),
        documentation: merge_doc_parts(details.documentation.as_deref()),
        tags: overview::convert_tags(details.tags),
        code_actions: code_actions::convert(service, details.code_actions.unwrap_or_default()),
    }))
}
