//! Immutable text snapshots handed to the analysis engine.

use std::fmt;
use std::sync::Arc;

/// Immutable captured file text.
///
/// Snapshots are shared as `Arc<ScriptSnapshot>`. The engine compares the
/// pointer of the snapshot it saw last with the one it receives now, so a
/// pointer-equal snapshot means "nothing changed" and skips reparsing.
#[derive(PartialEq, Eq)]
pub struct ScriptSnapshot {
    text: Arc<str>,
}

impl ScriptSnapshot {
    /// Captures `text` in a new shared snapshot.
    #[must_use]
    pub fn new(text: impl Into<Arc<str>>) -> Arc<Self> {
        Arc::new(Self { text: text.into() })
    }

    /// Full snapshot text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the snapshot holds no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text between two byte offsets, `None` when the range is out of bounds
    /// or splits a character.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Option<&str> {
        self.text.get(start..end)
    }
}

impl fmt::Debug for ScriptSnapshot {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ScriptSnapshot")
            .field("len", &self.text.len())
            .finish()
    }
}
