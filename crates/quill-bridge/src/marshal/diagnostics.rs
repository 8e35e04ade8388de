//! Diagnostic conversion.

use serde_json::Value;

use crate::engine::{LanguageService, LineAndCharacter};
use crate::errors::MarshalError;
use crate::raw::RawDiagnostic;
use crate::records::{Diagnostic, DiagnosticCategory, DiagnosticLocation};

use super::text::flatten_message;
use super::{convert_each, decode};

/// Converts one raw diagnostic array reported for `file_name`.
pub(crate) fn convert(
    service: &dyn LanguageService,
    file_name: &str,
    raw: Value,
) -> Result<Vec<Diagnostic>, MarshalError> {
    let items: Vec<Value> = decode("diagnostic list", raw)?;
    Ok(convert_each("diagnostic", items, |value| {
        let diagnostic: RawDiagnostic = decode("diagnostic", value)?;
        convert_one(service, file_name, diagnostic)
    }))
}

fn convert_one(
    service: &dyn LanguageService,
    file_name: &str,
    raw: RawDiagnostic,
) -> Result<Diagnostic, MarshalError> {
    let owner = raw
        .file
        .as_ref()
        .map_or(file_name, |file| file.file_name.as_str());
    let location = raw
        .start
        .map(|offset| locate(service, owner, offset, raw.length.unwrap_or(0)))
        .transpose()?;

    Ok(Diagnostic {
        code: raw.code,
        category: DiagnosticCategory::from_engine(raw.category),
        message: flatten_message(&raw.message_text),
        location,
    })
}

fn locate(
    service: &dyn LanguageService,
    file_name: &str,
    offset: u32,
    length: u32,
) -> Result<DiagnosticLocation, MarshalError> {
    let start = resolve(service, file_name, offset)?;
    let end = resolve(service, file_name, offset.saturating_add(length))?;
    Ok(DiagnosticLocation {
        file_name: file_name.to_owned(),
        line: start.line,
        column: start.character,
        end_line: end.line,
        end_column: end.character,
        offset,
        length,
    })
}

fn resolve(
    service: &dyn LanguageService,
    file_name: &str,
    offset: u32,
) -> Result<LineAndCharacter, MarshalError> {
    service
        .line_and_character_of_position(file_name, offset)
        .map_err(|error| MarshalError::Position {
            file_name: file_name.to_owned(),
            offset,
            source: error,
        })
}
