//! Optional host hooks the engine may probe before calling.

use std::collections::BTreeSet;
use std::fmt;

/// Optional method on [`crate::LanguageServiceHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HostCapability {
    /// `file_exists`.
    FileExists,
    /// `directory_exists`.
    DirectoryExists,
    /// `new_line`.
    NewLine,
    /// `log`.
    Log,
    /// `trace`.
    Trace,
    /// `error`.
    Error,
}

impl HostCapability {
    /// Every optional hook.
    pub const ALL: [Self; 6] = [
        Self::FileExists,
        Self::DirectoryExists,
        Self::NewLine,
        Self::Log,
        Self::Trace,
        Self::Error,
    ];

    /// Name of the hook as the engine knows it.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FileExists => "fileExists",
            Self::DirectoryExists => "directoryExists",
            Self::NewLine => "getNewLine",
            Self::Log => "log",
            Self::Trace => "trace",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for HostCapability {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.key())
    }
}

/// Set of optional hooks a host implements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    supported: BTreeSet<HostCapability>,
}

impl HostCapabilities {
    /// A host implementing no optional hook.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A host implementing every optional hook.
    #[must_use]
    pub fn all() -> Self {
        Self {
            supported: HostCapability::ALL.into_iter().collect(),
        }
    }

    /// Adds `capability` to the set.
    #[must_use]
    pub fn with(mut self, capability: HostCapability) -> Self {
        self.supported.insert(capability);
        self
    }

    /// Whether the host implements `capability`.
    #[must_use]
    pub fn supports(&self, capability: HostCapability) -> bool {
        self.supported.contains(&capability)
    }

    /// Iterates over supported hooks in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = HostCapability> + '_ {
        self.supported.iter().copied()
    }
}
