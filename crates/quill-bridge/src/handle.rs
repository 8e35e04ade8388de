//! Handles that keep engine objects opaque to callers.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

use crate::engine::LanguageService;

static NEXT_SERVICE_ID: AtomicU64 = AtomicU64::new(1);

/// A language service created by the bridge.
///
/// Cloning is cheap and every clone refers to the same service.
#[derive(Clone)]
pub struct ServiceHandle {
    id: u64,
    service: Arc<dyn LanguageService>,
}

impl ServiceHandle {
    /// Wraps `service` under a fresh identifier.
    #[must_use]
    pub fn new(service: Arc<dyn LanguageService>) -> Self {
        Self {
            id: NEXT_SERVICE_ID.fetch_add(1, Ordering::Relaxed),
            service,
        }
    }

    /// Process-unique identifier of the service.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// The raw engine service.
    #[must_use]
    pub fn service(&self) -> &dyn LanguageService {
        self.service.as_ref()
    }
}

impl fmt::Debug for ServiceHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ServiceHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// The engine's own code action object, kept untouched for re-application.
#[derive(Clone)]
pub struct EngineActionToken(Value);

impl EngineActionToken {
    pub(crate) const fn new(raw: Value) -> Self {
        Self(raw)
    }

    pub(crate) const fn raw(&self) -> &Value {
        &self.0
    }
}

impl fmt::Debug for EngineActionToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("EngineActionToken(..)")
    }
}

/// Pairs a code action with the service that produced it.
///
/// Only [`crate::ScriptBridge::apply_code_action`] looks inside.
#[derive(Clone)]
pub struct CodeActionHandle {
    service: ServiceHandle,
    token: EngineActionToken,
}

impl CodeActionHandle {
    pub(crate) const fn new(service: ServiceHandle, token: EngineActionToken) -> Self {
        Self { service, token }
    }

    /// Identifier of the originating service.
    #[must_use]
    pub const fn service_id(&self) -> u64 {
        self.service.id
    }

    pub(crate) const fn service(&self) -> &ServiceHandle {
        &self.service
    }

    pub(crate) const fn token(&self) -> &EngineActionToken {
        &self.token
    }
}

impl fmt::Debug for CodeActionHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CodeActionHandle")
            .field("service", &self.service.id)
            .finish_non_exhaustive()
    }
}
