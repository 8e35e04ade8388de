//! Code action conversion.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::MarshalError;
use crate::handle::{CodeActionHandle, EngineActionToken, ServiceHandle};
use crate::raw::RawCodeAction;
use crate::records::{CodeAction, FileTextChanges, TextChange};

use super::convert_each;

/// Converts raw code actions produced by `service`.
pub(crate) fn convert(service: &ServiceHandle, values: Vec<Value>) -> Vec<CodeAction> {
    convert_each("code action", values, |value| convert_one(service, value))
}

fn convert_one(service: &ServiceHandle, value: Value) -> Result<CodeAction, MarshalError> {
    let raw = RawCodeAction::deserialize(&value)
        .map_err(|error| MarshalError::shape("code action", error))?;

    let changes = raw
        .changes
        .into_iter()
        .map(|file| FileTextChanges {
            file_name: file.file_name,
            text_changes: file
                .text_changes
                .into_iter()
                .map(|change| TextChange {
                    offset: change.span.start,
                    length: change.span.length,
                    replacement: change.new_text,
                })
                .collect(),
        })
        .collect();

    Ok(CodeAction {
        description: raw.description,
        changes,
        handle: CodeActionHandle::new(service.clone(), EngineActionToken::new(value)),
    })
}
