//! BDD test world wrapping a bridge over the scripted engine.

use std::sync::Arc;

use crate::bridge::ScriptBridge;
use crate::errors::BridgeError;
use crate::handle::ServiceHandle;
use crate::host::CompilationHost;
use crate::records::Diagnostic;
use crate::root::MemoryCompilationRoot;

use super::scripted_engine::{Responses, ScriptedEngine, ScriptedService};

/// Shared state exercised by BDD step implementations.
pub struct TestWorld {
    /// Bridge under test.
    pub bridge: ScriptBridge,
    /// Engine behind the bridge.
    pub engine: Arc<ScriptedEngine>,
    /// Root the host reads project files from.
    pub root: Arc<MemoryCompilationRoot>,
    /// Host created by the bridge, once requested.
    pub host: Option<Arc<CompilationHost>>,
    /// Service created by the bridge, once requested.
    pub handle: Option<ServiceHandle>,
    /// Last diagnostics result.
    pub diagnostics: Option<Option<Vec<Diagnostic>>>,
    /// Last error observed while exercising the bridge.
    pub last_error: Option<BridgeError>,
}

impl TestWorld {
    /// Builds a world whose engine answers with `responses`.
    #[must_use]
    pub fn new(responses: Responses) -> Self {
        let (bridge, engine) = super::bridge_with(responses);
        Self {
            bridge,
            engine,
            root: Arc::new(MemoryCompilationRoot::new()),
            host: None,
            handle: None,
            diagnostics: None,
            last_error: None,
        }
    }

    /// Creates the host and the service over [`Self::root`].
    pub fn start_service(&mut self) {
        let result = self
            .bridge
            .create_language_service_host(self.root.clone())
            .and_then(|host| {
                let handle = self.bridge.create_language_service(host.clone())?;
                Ok((host, handle))
            });
        match result {
            Ok((host, handle)) => {
                self.host = Some(host);
                self.handle = Some(handle);
            }
            Err(error) => self.last_error = Some(error),
        }
    }

    /// The service handle, panicking when none was created.
    #[must_use]
    pub fn handle(&self) -> &ServiceHandle {
        self.handle
            .as_ref()
            .unwrap_or_else(|| panic!("service was not created"))
    }

    /// The scripted service behind [`Self::handle`].
    #[must_use]
    pub fn service(&self) -> Arc<ScriptedService> {
        self.engine
            .last_service()
            .unwrap_or_else(|| panic!("engine created no service"))
    }

    /// The host, panicking when none was created.
    #[must_use]
    pub fn host(&self) -> &Arc<CompilationHost> {
        self.host
            .as_ref()
            .unwrap_or_else(|| panic!("host was not created"))
    }
}
