//! The host contract the engine drives, and its adapter over a
//! [`CompilationRoot`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, info, trace, warn};

use crate::capability::{HostCapabilities, HostCapability};
use crate::errors::HostContractError;
use crate::registry::{SHARED_DOCUMENT_VERSION, SharedLibraryRegistry};
use crate::root::{CompilationRoot, ScriptVersion};
use crate::settings::{CURRENT_DIRECTORY, CompilationSettings, DEFAULT_LIB_FILE_NAME, NEW_LINE};
use crate::snapshot::ScriptSnapshot;

const HOST_TARGET: &str = "quill::host";
/// Target carrying messages the engine sends through its host.
pub(crate) const ENGINE_TARGET: &str = "quill::engine";

/// Everything the engine may ask of its host.
///
/// Required methods answer the incremental-compilation queries. Optional
/// hooks have neutral defaults; the engine checks
/// [`LanguageServiceHost::capabilities`] before calling one of them.
pub trait LanguageServiceHost: Send + Sync {
    /// Compiler options for every file of this host.
    fn compilation_settings(&self) -> CompilationSettings;

    /// Files the engine should know about, in a stable order.
    fn script_file_names(&self) -> Vec<String>;

    /// Version of `file_name`, compared by the engine for change detection.
    fn script_version(&self, file_name: &str) -> Result<String, HostContractError>;

    /// Snapshot of `file_name`. Must be the same instance while the version
    /// is unchanged.
    fn script_snapshot(&self, file_name: &str) -> Result<Arc<ScriptSnapshot>, HostContractError>;

    /// Name of the default library file.
    fn default_lib_file_name(&self) -> &str {
        DEFAULT_LIB_FILE_NAME
    }

    /// Directory file names are relative to.
    fn current_directory(&self) -> &str {
        CURRENT_DIRECTORY
    }

    /// Optional hooks this host implements.
    fn capabilities(&self) -> HostCapabilities {
        HostCapabilities::none()
    }

    /// Whether `file_name` exists. Optional.
    fn file_exists(&self, _file_name: &str) -> bool {
        false
    }

    /// Whether `name` is an existing directory. Optional.
    fn directory_exists(&self, _name: &str) -> bool {
        false
    }

    /// Line terminator for emitted text. Optional.
    fn new_line(&self) -> &str {
        NEW_LINE
    }

    /// Informational message from the engine. Optional.
    fn log(&self, _message: &str) {}

    /// High-frequency diagnostic message from the engine. Optional.
    fn trace(&self, _message: &str) {}

    /// Error message from the engine. Optional.
    fn error(&self, _message: &str) {}
}

impl fmt::Debug for dyn LanguageServiceHost {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("LanguageServiceHost")
    }
}

struct CachedSnapshot {
    version: ScriptVersion,
    snapshot: Arc<ScriptSnapshot>,
}

/// [`LanguageServiceHost`] backed by a [`CompilationRoot`] and the shared
/// library registry.
pub struct CompilationHost {
    root: Arc<dyn CompilationRoot>,
    libraries: Arc<SharedLibraryRegistry>,
    snapshots: Mutex<HashMap<String, CachedSnapshot>>,
    engine_trace: bool,
}

impl CompilationHost {
    /// Builds a host over `root` that also serves the registered libraries.
    #[must_use]
    pub fn new(root: Arc<dyn CompilationRoot>, libraries: Arc<SharedLibraryRegistry>) -> Self {
        Self {
            root,
            libraries,
            snapshots: Mutex::new(HashMap::new()),
            engine_trace: false,
        }
    }

    /// Enables forwarding of the engine's trace hook.
    #[must_use]
    pub fn with_engine_trace(mut self, enabled: bool) -> Self {
        self.engine_trace = enabled;
        self
    }

    /// The compilation root this host delegates to.
    #[must_use]
    pub fn root(&self) -> &Arc<dyn CompilationRoot> {
        &self.root
    }

    fn project_snapshot(&self, file_name: &str) -> Result<Arc<ScriptSnapshot>, HostContractError> {
        let version = self.project_version(file_name)?;
        let mut cache = self
            .snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.get(file_name) {
            if cached.version == version {
                return Ok(Arc::clone(&cached.snapshot));
            }
        }

        let snapshot =
            self.root
                .snapshot(file_name)
                .ok_or_else(|| HostContractError::MissingSnapshot {
                    file_name: file_name.to_owned(),
                })?;
        debug!(
            target: HOST_TARGET,
            file_name,
            %version,
            "caching new snapshot"
        );
        cache.insert(
            file_name.to_owned(),
            CachedSnapshot {
                version,
                snapshot: Arc::clone(&snapshot),
            },
        );
        Ok(snapshot)
    }

    /// Version of a project file. A file the root no longer knows is evicted
    /// from the snapshot cache.
    fn project_version(&self, file_name: &str) -> Result<ScriptVersion, HostContractError> {
        if let Some(version) = self.root.version(file_name) {
            return Ok(version);
        }
        let evicted = self
            .snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(file_name)
            .is_some();
        if evicted {
            debug!(target: HOST_TARGET, file_name, "evicted snapshot of removed file");
        }
        Err(HostContractError::MissingVersion {
            file_name: file_name.to_owned(),
        })
    }

    /// Number of project snapshots currently cached.
    #[must_use]
    pub fn cached_snapshots(&self) -> usize {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl LanguageServiceHost for CompilationHost {
    fn compilation_settings(&self) -> CompilationSettings {
        CompilationSettings::fixed()
    }

    fn script_file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .root
            .list()
            .into_iter()
            .filter(|name| {
                let shadowed = self.libraries.contains(name);
                if shadowed {
                    warn!(
                        target: HOST_TARGET,
                        file_name = %name,
                        "project file shares its name with a shared library; serving the library"
                    );
                }
                !shadowed
            })
            .collect();
        names.extend(self.libraries.file_names());
        names
    }

    fn script_version(&self, file_name: &str) -> Result<String, HostContractError> {
        if self.libraries.contains(file_name) {
            return Ok(SHARED_DOCUMENT_VERSION.to_owned());
        }
        self.project_version(file_name)
            .map(|version| version.to_string())
    }

    fn script_snapshot(&self, file_name: &str) -> Result<Arc<ScriptSnapshot>, HostContractError> {
        match self.libraries.snapshot(file_name) {
            Some(snapshot) => Ok(snapshot),
            None => self.project_snapshot(file_name),
        }
    }

    fn capabilities(&self) -> HostCapabilities {
        HostCapabilities::all()
    }

    fn file_exists(&self, file_name: &str) -> bool {
        self.libraries.contains(file_name) || self.root.exists(file_name)
    }

    fn directory_exists(&self, name: &str) -> bool {
        self.root.directory_exists(name)
    }

    fn log(&self, message: &str) {
        info!(target: ENGINE_TARGET, "{message}");
    }

    fn trace(&self, message: &str) {
        if self.engine_trace {
            trace!(target: ENGINE_TARGET, "{message}");
        }
    }

    fn error(&self, message: &str) {
        error!(target: ENGINE_TARGET, "{message}");
    }
}

impl fmt::Debug for CompilationHost {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CompilationHost")
            .field("libraries", &self.libraries)
            .field("engine_trace", &self.engine_trace)
            .finish_non_exhaustive()
    }
}

/// Whether `host` implements the optional `capability`.
#[must_use]
pub fn host_supports(host: &dyn LanguageServiceHost, capability: HostCapability) -> bool {
    host.capabilities().supports(capability)
}
