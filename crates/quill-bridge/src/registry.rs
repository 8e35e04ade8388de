//! Process-wide cache of shared ambient declaration files.
//!
//! Ambient libraries are registered once per process and never change, so
//! every host reports them with the same constant version and the same
//! snapshot instance. The cache is a lazily created singleton handed to hosts
//! as an `Arc`, which lets tests build private registries instead.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;
use tracing::{debug, info};

use crate::errors::PackagingError;
use crate::resources::{LibraryBundle, ResourceSource};
use crate::snapshot::ScriptSnapshot;

/// Version reported for every shared library.
pub const SHARED_DOCUMENT_VERSION: &str = "0";

const REGISTRY_TARGET: &str = "quill::registry";

static GLOBAL_REGISTRY: Lazy<Arc<SharedLibraryRegistry>> =
    Lazy::new(|| Arc::new(SharedLibraryRegistry::new()));

/// Immutable ambient declaration file.
#[derive(Debug)]
pub struct SharedDocument {
    file_name: String,
    resource_path: String,
    snapshot: Arc<ScriptSnapshot>,
}

impl SharedDocument {
    /// File name the engine sees.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Bundle path the document was read from.
    #[must_use]
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// The one snapshot instance for this document.
    #[must_use]
    pub fn snapshot(&self) -> &Arc<ScriptSnapshot> {
        &self.snapshot
    }
}

#[derive(Default)]
struct RegistryState {
    names_by_path: HashMap<String, String>,
    documents: HashMap<String, Arc<SharedDocument>>,
    order: Vec<String>,
}

/// Registry of shared libraries.
#[derive(Default)]
pub struct SharedLibraryRegistry {
    state: RwLock<RegistryState>,
}

impl SharedLibraryRegistry {
    /// Creates an empty, private registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first use.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_REGISTRY)
    }

    /// Registers the resource at `resource_path` and returns its file name.
    ///
    /// Registering a path twice returns the existing name and keeps the first
    /// snapshot. When several callers race on the same path the first insert
    /// wins and later callers observe it.
    pub fn register(
        &self,
        resource_path: &str,
        source: &dyn ResourceSource,
    ) -> Result<String, PackagingError> {
        if let Some(name) = self.read(|state| state.names_by_path.get(resource_path).cloned()) {
            return Ok(name);
        }

        let file_name = derive_file_name(resource_path)?;
        let text = source
            .read(resource_path)
            .map_err(|error| PackagingError::Unreadable {
                path: resource_path.to_owned(),
                source: error,
            })?
            .ok_or_else(|| PackagingError::MissingResource {
                path: resource_path.to_owned(),
            })?;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(name) = state.names_by_path.get(resource_path) {
            debug!(
                target: REGISTRY_TARGET,
                path = resource_path,
                "library registered concurrently; keeping first registration"
            );
            return Ok(name.clone());
        }
        if let Some(existing) = state.documents.get(&file_name) {
            return Err(PackagingError::DuplicateFileName {
                file_name,
                existing: existing.resource_path.clone(),
                path: resource_path.to_owned(),
            });
        }

        let document = SharedDocument {
            file_name: file_name.clone(),
            resource_path: resource_path.to_owned(),
            snapshot: ScriptSnapshot::new(text),
        };
        info!(
            target: REGISTRY_TARGET,
            path = resource_path,
            file_name = %file_name,
            bytes = document.snapshot.len(),
            "registered shared library"
        );
        state
            .names_by_path
            .insert(resource_path.to_owned(), file_name.clone());
        state
            .documents
            .insert(file_name.clone(), Arc::new(document));
        state.order.push(file_name.clone());
        Ok(file_name)
    }

    /// Registers every path in `bundle`, in order, stopping at the first
    /// failure.
    pub fn register_bundle(&self, bundle: &LibraryBundle) -> Result<Vec<String>, PackagingError> {
        bundle
            .paths()
            .iter()
            .map(|path| self.register(path, bundle.source()))
            .collect()
    }

    /// Document registered under `file_name`.
    #[must_use]
    pub fn get(&self, file_name: &str) -> Option<Arc<SharedDocument>> {
        self.read(|state| state.documents.get(file_name).cloned())
    }

    /// Snapshot of the document registered under `file_name`.
    #[must_use]
    pub fn snapshot(&self, file_name: &str) -> Option<Arc<ScriptSnapshot>> {
        self.read(|state| {
            state
                .documents
                .get(file_name)
                .map(|document| Arc::clone(&document.snapshot))
        })
    }

    /// Whether `file_name` names a shared library.
    #[must_use]
    pub fn contains(&self, file_name: &str) -> bool {
        self.read(|state| state.documents.contains_key(file_name))
    }

    /// Registered file names in registration order.
    #[must_use]
    pub fn file_names(&self) -> Vec<String> {
        self.read(|state| state.order.clone())
    }

    /// Number of registered documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read(|state| state.order.len())
    }

    /// Whether nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read<T>(&self, reader: impl FnOnce(&RegistryState) -> T) -> T {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        reader(&state)
    }
}

impl std::fmt::Debug for SharedLibraryRegistry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SharedLibraryRegistry")
            .field("file_names", &self.file_names())
            .finish()
    }
}

fn derive_file_name(resource_path: &str) -> Result<String, PackagingError> {
    resource_path
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| PackagingError::InvalidPath {
            path: resource_path.to_owned(),
        })
}
