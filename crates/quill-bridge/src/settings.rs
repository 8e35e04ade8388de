//! Fixed compilation settings and host constants.

use serde::Serialize;

/// File name reported as the engine's default library.
pub const DEFAULT_LIB_FILE_NAME: &str = "lib.d.ts";

/// Working directory reported to the engine. Script names are root-relative.
pub const CURRENT_DIRECTORY: &str = "";

/// Line terminator used for emitted output.
pub const NEW_LINE: &str = "\n";

/// Language level the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScriptTarget {
    /// ECMAScript 2020.
    #[serde(rename = "ES2020")]
    Es2020,
}

/// Module format the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModuleKind {
    /// ECMAScript 2015 modules.
    #[serde(rename = "ES2015")]
    Es2015,
}

/// Compiler options handed to the engine.
///
/// Scripts are checked and transpiled one file at a time, so the settings
/// forbid constructs that need whole-program knowledge. They are not
/// configurable per project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[expect(
    clippy::struct_excessive_bools,
    reason = "mirrors the engine's flat compiler option record"
)]
pub struct CompilationSettings {
    /// Accept plain script files.
    pub allow_js: bool,
    /// Type-check plain script files.
    pub check_js: bool,
    /// Emit source maps next to the output.
    pub source_map: bool,
    /// Reject constructs that cannot be compiled file by file.
    pub isolated_modules: bool,
    /// Reject imports whose casing differs from the file on disk.
    pub force_consistent_casing_in_file_names: bool,
    /// Output language level.
    pub target: ScriptTarget,
    /// Output module format.
    pub module: ModuleKind,
}

impl CompilationSettings {
    /// The settings every host reports.
    #[must_use]
    pub const fn fixed() -> Self {
        Self {
            allow_js: true,
            check_js: true,
            source_map: true,
            isolated_modules: true,
            force_consistent_casing_in_file_names: true,
            target: ScriptTarget::Es2020,
            module: ModuleKind::Es2015,
        }
    }
}

impl Default for CompilationSettings {
    fn default() -> Self {
        Self::fixed()
    }
}
