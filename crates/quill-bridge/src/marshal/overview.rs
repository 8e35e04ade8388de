//! Quick info and documentation tag conversion.

use serde_json::Value;

use crate::errors::MarshalError;
use crate::raw::{RawJsDocTag, RawQuickInfo};
use crate::records::{DocTag, Overview};

use super::text::{merge_doc_parts, split_tag_tokens};
use super::{convert_each, decode};

/// Converts raw quick info, `None` when the engine had nothing to say.
pub(crate) fn convert(raw: Value) -> Result<Option<Overview>, MarshalError> {
    if raw.is_null() {
        return Ok(None);
    }
    let info: RawQuickInfo = decode("quick info", raw)?;

    Ok(Some(Overview {
        kind: info.kind,
        kind_modifiers: info.kind_modifiers,
        display: merge_doc_parts(info.display_parts.as_deref()),
        documentation: merge_doc_parts(info.documentation.as_deref()),
        tags: convert_tags(info.tags),
    }))
}

/// Converts documentation tags, skipping malformed ones.
pub(crate) fn convert_tags(tags: Option<Vec<Value>>) -> Vec<DocTag> {
    convert_each("documentation tag", tags.unwrap_or_default(), |raw| {
        let tag: RawJsDocTag = decode("documentation tag", raw)?;
        let (label, value) = split_tag_tokens(tag.text.as_deref().unwrap_or_default());
        Ok(DocTag {
            name: tag.name,
            label,
            value,
        })
    })
}
