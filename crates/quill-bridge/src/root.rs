//! The virtual file system contract the host delegates to.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::snapshot::ScriptSnapshot;

/// Opaque per-file version.
///
/// Versions are only meaningful for change detection: two reads of the same
/// file that return equal versions must see the same content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScriptVersion(u64);

impl ScriptVersion {
    /// Wraps a raw version counter.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScriptVersion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Virtual file system for one editing session.
///
/// Implementations are owned by the embedding application. Returning `None`
/// from [`CompilationRoot::version`] or [`CompilationRoot::snapshot`] for a
/// file that [`CompilationRoot::list`] reported is a contract violation which
/// the host surfaces as an error rather than repairs.
pub trait CompilationRoot: Send + Sync {
    /// Project files in a stable order.
    fn list(&self) -> Vec<String>;

    /// Current version of `file_name`.
    fn version(&self, file_name: &str) -> Option<ScriptVersion>;

    /// Current content of `file_name`.
    fn snapshot(&self, file_name: &str) -> Option<Arc<ScriptSnapshot>>;

    /// Whether `file_name` is part of the root.
    fn exists(&self, file_name: &str) -> bool;

    /// Whether `name` is a directory containing at least one file.
    fn directory_exists(&self, name: &str) -> bool;
}

struct MemoryFile {
    version: ScriptVersion,
    snapshot: Arc<ScriptSnapshot>,
}

#[derive(Default)]
struct MemoryState {
    order: Vec<String>,
    files: HashMap<String, MemoryFile>,
    clock: u64,
}

/// In-memory [`CompilationRoot`] used by embedders without a project model
/// of their own, and by tests.
///
/// Every edit draws a fresh version from a root-wide counter, so versions
/// strictly change on edit even when a file is removed and re-added.
#[derive(Default)]
pub struct MemoryCompilationRoot {
    state: RwLock<MemoryState>,
}

impl MemoryCompilationRoot {
    /// Creates an empty root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `file_name` or replaces its text, returning the new version.
    pub fn set_text(&self, file_name: &str, text: &str) -> ScriptVersion {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.clock += 1;
        let version = ScriptVersion::new(state.clock);
        let file = MemoryFile {
            version,
            snapshot: ScriptSnapshot::new(text),
        };
        if state.files.insert(file_name.to_owned(), file).is_none() {
            state.order.push(file_name.to_owned());
        }
        version
    }

    /// Removes `file_name`, returning whether it was present.
    pub fn remove(&self, file_name: &str) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.files.remove(file_name).is_none() {
            return false;
        }
        state.order.retain(|name| name != file_name);
        true
    }

    fn read<T>(&self, reader: impl FnOnce(&MemoryState) -> T) -> T {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        reader(&state)
    }
}

impl CompilationRoot for MemoryCompilationRoot {
    fn list(&self) -> Vec<String> {
        self.read(|state| state.order.clone())
    }

    fn version(&self, file_name: &str) -> Option<ScriptVersion> {
        self.read(|state| state.files.get(file_name).map(|file| file.version))
    }

    fn snapshot(&self, file_name: &str) -> Option<Arc<ScriptSnapshot>> {
        self.read(|state| {
            state
                .files
                .get(file_name)
                .map(|file| Arc::clone(&file.snapshot))
        })
    }

    fn exists(&self, file_name: &str) -> bool {
        self.read(|state| state.files.contains_key(file_name))
    }

    fn directory_exists(&self, name: &str) -> bool {
        let prefix = if name.ends_with('/') {
            name.to_owned()
        } else {
            format!("{name}/")
        };
        self.read(|state| state.order.iter().any(|file| file.starts_with(&prefix)))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn versions_strictly_increase_on_edit() {
        let root = MemoryCompilationRoot::new();
        let first = root.set_text("main.ts", "let a = 1;");
        let second = root.set_text("main.ts", "let a = 2;");

        assert!(second > first);
        assert_eq!(root.version("main.ts"), Some(second));
        assert_eq!(root.list(), vec![String::from("main.ts")]);
    }

    #[rstest]
    fn readding_a_removed_file_gets_a_new_version() {
        let root = MemoryCompilationRoot::new();
        let first = root.set_text("main.ts", "a");
        assert!(root.remove("main.ts"));
        assert!(!root.exists("main.ts"));
        let second = root.set_text("main.ts", "a");

        assert_ne!(first, second);
    }

    #[rstest]
    #[case("scripts", true)]
    #[case("scripts/", true)]
    #[case("script", false)]
    #[case("scripts/util", false)]
    fn directory_queries_match_path_prefixes(#[case] name: &str, #[case] expected: bool) {
        let root = MemoryCompilationRoot::new();
        root.set_text("scripts/main.ts", "");

        assert_eq!(root.directory_exists(name), expected);
    }

    #[rstest]
    fn preserves_insertion_order() {
        let root = MemoryCompilationRoot::new();
        root.set_text("b.ts", "");
        root.set_text("a.ts", "");
        root.set_text("b.ts", "changed");

        assert_eq!(root.list(), vec![String::from("b.ts"), String::from("a.ts")]);
    }
}
