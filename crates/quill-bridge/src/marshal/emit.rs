//! Emit output conversion.

use serde_json::Value;

use crate::errors::MarshalError;
use crate::raw::RawEmitOutput;
use crate::records::CompileOutput;

use super::decode;

/// Picks the JavaScript and source map outputs for `file_name`.
///
/// Returns `None` when the engine skipped emit.
pub(crate) fn convert(file_name: &str, raw: Value) -> Result<Option<CompileOutput>, MarshalError> {
    let output: RawEmitOutput = decode("emit output", raw)?;
    if output.emit_skipped {
        return Ok(None);
    }

    let mut javascript = None;
    let mut map = None;
    for file in output.output_files {
        if file.name.ends_with(".js") {
            javascript = Some(file.text);
        } else if file.name.ends_with(".map") {
            map = Some(file.text);
        }
    }
    let js = javascript.ok_or(MarshalError::Missing {
        item: "javascript output",
    })?;

    Ok(Some(CompileOutput {
        source_file: file_name.to_owned(),
        js_file: format!("{file_name}.js"),
        js,
        map_file: format!("{file_name}.js.map"),
        map,
    }))
}
