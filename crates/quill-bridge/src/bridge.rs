//! Facade the script editor talks to.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use quill_config::Config;
use serde_json::Value;
use tracing::debug;

use crate::engine::{AnalysisEngine, EngineError};
use crate::errors::{BridgeError, BridgeOperation};
use crate::handle::ServiceHandle;
use crate::host::{CompilationHost, LanguageServiceHost};
use crate::marshal;
use crate::records::{
    CodeAction, CompileOutput, CompletionEntry, CompletionEntryDetails, CompletionList,
    Diagnostic, NavigationTree, Overview,
};
use crate::registry::SharedLibraryRegistry;
use crate::resources::LibraryBundle;
use crate::root::CompilationRoot;
use crate::settings::CompilationSettings;
use crate::snapshot::ScriptSnapshot;

const BRIDGE_TARGET: &str = "quill::bridge";

/// Entry point binding one analysis engine to the shared libraries.
pub struct ScriptBridge {
    engine: Arc<dyn AnalysisEngine>,
    libraries: Arc<SharedLibraryRegistry>,
    bundle: LibraryBundle,
    registered: OnceCell<Vec<String>>,
    engine_trace: bool,
}

impl ScriptBridge {
    /// Builds a bridge over `engine` that registers `bundle` into the
    /// process-wide library registry on first use.
    #[must_use]
    pub fn new(engine: Arc<dyn AnalysisEngine>, bundle: LibraryBundle, config: &Config) -> Self {
        Self {
            engine,
            libraries: SharedLibraryRegistry::global(),
            bundle,
            registered: OnceCell::new(),
            engine_trace: config.engine_trace(),
        }
    }

    /// Uses `registry` instead of the process-wide one.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<SharedLibraryRegistry>) -> Self {
        self.libraries = registry;
        self
    }

    /// Registers the bundled libraries now instead of on first host creation.
    ///
    /// Returns the registered file names. A packaging error is fatal for the
    /// embedding application.
    pub fn initialise(&self) -> Result<&[String], BridgeError> {
        self.registered
            .get_or_try_init(|| self.libraries.register_bundle(&self.bundle))
            .map(Vec::as_slice)
            .map_err(BridgeError::from)
    }

    /// Registry the bridge's hosts read libraries from.
    #[must_use]
    pub const fn libraries(&self) -> &Arc<SharedLibraryRegistry> {
        &self.libraries
    }

    /// Engine version string.
    #[must_use]
    pub fn version(&self) -> String {
        self.engine.version()
    }

    /// The raw engine.
    #[must_use]
    pub fn services_lib(&self) -> Arc<dyn AnalysisEngine> {
        Arc::clone(&self.engine)
    }

    /// Transpiles one file without type information, returning the engine's
    /// untyped output.
    pub fn transpile(&self, file_name: &str, text: &str) -> Result<Value, BridgeError> {
        self.engine
            .transpile(file_name, text, &CompilationSettings::fixed())
            .map_err(|error| BridgeError::engine(BridgeOperation::Transpile, error))
    }

    /// Captures `text` in a fresh snapshot.
    #[must_use]
    pub fn create_snapshot(&self, text: &str) -> Arc<ScriptSnapshot> {
        ScriptSnapshot::new(text)
    }

    /// Creates a language service bound to `host`.
    pub fn create_language_service(
        &self,
        host: Arc<dyn LanguageServiceHost>,
    ) -> Result<ServiceHandle, BridgeError> {
        let service = self
            .engine
            .create_language_service(host)
            .map_err(|error| BridgeError::engine(BridgeOperation::CreateService, error))?;
        let handle = ServiceHandle::new(service);
        debug!(target: BRIDGE_TARGET, service = handle.id(), "created language service");
        Ok(handle)
    }

    /// Creates a host over `root`, registering the bundled libraries first if
    /// no earlier call did.
    pub fn create_language_service_host(
        &self,
        root: Arc<dyn CompilationRoot>,
    ) -> Result<Arc<CompilationHost>, BridgeError> {
        self.initialise()?;
        let host = CompilationHost::new(root, Arc::clone(&self.libraries))
            .with_engine_trace(self.engine_trace);
        Ok(Arc::new(host))
    }

    /// Emits `file_name`. `js_file` is always `file_name` plus `.js`.
    pub fn compile(
        &self,
        service: &ServiceHandle,
        file_name: &str,
    ) -> Result<CompileOutput, BridgeError> {
        let operation = BridgeOperation::Compile;
        let raw = engine_call(operation, service.service().emit_output(file_name))?;
        marshal::emit::convert(file_name, raw)
            .map_err(|error| BridgeError::malformed(operation, error))?
            .ok_or_else(|| BridgeError::EmitSkipped {
                file_name: file_name.to_owned(),
            })
    }

    /// Diagnostics for `file_name`, syntactic first.
    ///
    /// Returns `None` when no category is requested or the requested
    /// categories are both empty.
    pub fn get_diagnostics(
        &self,
        service: &ServiceHandle,
        file_name: &str,
        syntactic: bool,
        semantic: bool,
    ) -> Result<Option<Vec<Diagnostic>>, BridgeError> {
        let operation = BridgeOperation::Diagnostics;
        let engine = service.service();
        let mut diagnostics = Vec::new();
        if syntactic {
            let raw = engine_call(operation, engine.syntactic_diagnostics(file_name))?;
            diagnostics.extend(
                marshal::diagnostics::convert(engine, file_name, raw)
                    .map_err(|error| BridgeError::malformed(operation, error))?,
            );
        }
        if semantic {
            let raw = engine_call(operation, engine.semantic_diagnostics(file_name))?;
            diagnostics.extend(
                marshal::diagnostics::convert(engine, file_name, raw)
                    .map_err(|error| BridgeError::malformed(operation, error))?,
            );
        }
        debug!(
            target: BRIDGE_TARGET,
            service = service.id(),
            file_name,
            count = diagnostics.len(),
            "collected diagnostics"
        );
        Ok((!diagnostics.is_empty()).then_some(diagnostics))
    }

    /// Completions at `position`, `None` when the engine offers none.
    pub fn get_code_completions(
        &self,
        service: &ServiceHandle,
        file_name: &str,
        position: u32,
    ) -> Result<Option<CompletionList>, BridgeError> {
        let operation = BridgeOperation::Completions;
        let raw = engine_call(
            operation,
            service.service().completions_at_position(file_name, position),
        )?;
        marshal::completions::convert(raw).map_err(|error| BridgeError::malformed(operation, error))
    }

    /// Details for `entry`, `None` when the engine has none.
    pub fn get_code_completion_details(
        &self,
        service: &ServiceHandle,
        file_name: &str,
        position: u32,
        entry: &CompletionEntry,
    ) -> Result<Option<CompletionEntryDetails>, BridgeError> {
        let operation = BridgeOperation::CompletionDetails;
        let raw = engine_call(
            operation,
            service.service().completion_entry_details(
                file_name,
                position,
                &entry.name,
                entry.source.as_deref(),
            ),
        )?;
        marshal::completions::convert_details(service, raw)
            .map_err(|error| BridgeError::malformed(operation, error))
    }

    /// Outline of `file_name`.
    pub fn get_navigation_tree(
        &self,
        service: &ServiceHandle,
        file_name: &str,
    ) -> Result<NavigationTree, BridgeError> {
        let operation = BridgeOperation::NavigationTree;
        let raw = engine_call(operation, service.service().navigation_tree(file_name))?;
        marshal::navigation::convert(raw).map_err(|error| BridgeError::malformed(operation, error))
    }

    /// Quick info at `position`, `None` when the engine has none.
    pub fn get_overview(
        &self,
        service: &ServiceHandle,
        file_name: &str,
        position: u32,
    ) -> Result<Option<Overview>, BridgeError> {
        let operation = BridgeOperation::Overview;
        let raw = engine_call(
            operation,
            service.service().quick_info_at_position(file_name, position),
        )?;
        marshal::overview::convert(raw).map_err(|error| BridgeError::malformed(operation, error))
    }

    /// Hands `action` back to the service that produced it.
    pub fn apply_code_action(&self, action: &CodeAction) -> Result<Value, BridgeError> {
        let handle = &action.handle;
        debug!(
            target: BRIDGE_TARGET,
            service = handle.service_id(),
            description = %action.description,
            "applying code action"
        );
        engine_call(
            BridgeOperation::ApplyCodeAction,
            handle
                .service()
                .service()
                .apply_code_action(handle.token().raw()),
        )
    }
}

impl fmt::Debug for ScriptBridge {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ScriptBridge")
            .field("bundle", &self.bundle)
            .field("engine_trace", &self.engine_trace)
            .finish_non_exhaustive()
    }
}

fn engine_call<T>(operation: BridgeOperation, result: Result<T, EngineError>) -> Result<T, BridgeError> {
    result.map_err(|error| BridgeError::engine(operation, error))
}
