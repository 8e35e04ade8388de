//! Scripted analysis engine that records every call routed through it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{Value, json};

use crate::engine::{AnalysisEngine, EngineError, LanguageService, LineAndCharacter};
use crate::host::LanguageServiceHost;
use crate::settings::CompilationSettings;

/// Discriminates the kind of call recorded by the scripted service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Syntactic diagnostics were requested.
    Syntactic,
    /// Semantic diagnostics were requested.
    Semantic,
    /// Completions were requested.
    Completions,
    /// Completion details were requested.
    CompletionDetails,
    /// The navigation tree was requested.
    NavigationTree,
    /// Quick info was requested.
    QuickInfo,
    /// Emit was requested.
    Emit,
    /// A code action was applied.
    ApplyCodeAction,
}

/// Canned raw values returned by the scripted service.
#[derive(Debug, Clone)]
pub struct Responses {
    /// Raw syntactic diagnostics.
    pub syntactic: Value,
    /// Raw semantic diagnostics.
    pub semantic: Value,
    /// Raw completion info.
    pub completions: Value,
    /// Raw completion details.
    pub details: Value,
    /// Raw navigation tree.
    pub navigation: Value,
    /// Raw quick info.
    pub quick_info: Value,
    /// Raw emit output.
    pub emit: Value,
    /// Value returned when a code action is applied.
    pub applied: Value,
    /// When set, semantic diagnostics fail with this message.
    pub semantic_error: Option<String>,
}

impl Default for Responses {
    fn default() -> Self {
        Self {
            syntactic: json!([]),
            semantic: json!([]),
            completions: Value::Null,
            details: Value::Null,
            navigation: json!({ "text": "<global>", "kind": "script" }),
            quick_info: Value::Null,
            emit: json!({ "outputFiles": [], "emitSkipped": true }),
            applied: json!({ "applied": true }),
            semantic_error: None,
        }
    }
}

#[derive(Default)]
struct ServiceState {
    calls: Vec<CallKind>,
    entry_requests: Vec<(String, Option<String>)>,
    applied: Vec<Value>,
    seen: HashMap<String, usize>,
    parses: HashMap<String, usize>,
}

/// Language service returning [`Responses`] and recording calls.
///
/// Before answering a query it syncs with its host the way an incremental
/// engine does, reparsing only files whose snapshot instance changed.
pub struct ScriptedService {
    host: Arc<dyn LanguageServiceHost>,
    responses: Responses,
    state: Mutex<ServiceState>,
}

impl ScriptedService {
    fn new(host: Arc<dyn LanguageServiceHost>, responses: Responses) -> Self {
        Self {
            host,
            responses,
            state: Mutex::new(ServiceState::default()),
        }
    }

    /// Calls recorded so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<CallKind> {
        self.with_state(|state| state.calls.clone())
    }

    /// Entry names and sources passed to completion detail requests.
    #[must_use]
    pub fn entry_requests(&self) -> Vec<(String, Option<String>)> {
        self.with_state(|state| state.entry_requests.clone())
    }

    /// Raw code actions handed back for application.
    #[must_use]
    pub fn applied(&self) -> Vec<Value> {
        self.with_state(|state| state.applied.clone())
    }

    /// How often `file_name` has been parsed.
    #[must_use]
    pub fn parse_count(&self, file_name: &str) -> usize {
        self.with_state(|state| state.parses.get(file_name).copied().unwrap_or(0))
    }

    /// Syncs with the host, as done before every query.
    pub fn sync(&self) -> Result<(), EngineError> {
        for file_name in self.host.script_file_names() {
            self.host.script_version(&file_name)?;
            let snapshot = self.host.script_snapshot(&file_name)?;
            let identity = Arc::as_ptr(&snapshot).cast::<u8>() as usize;
            self.with_state(|state| {
                if state.seen.insert(file_name.clone(), identity) != Some(identity) {
                    *state.parses.entry(file_name).or_default() += 1;
                }
            });
        }
        Ok(())
    }

    fn answer(&self, call: CallKind, value: &Value) -> Result<Value, EngineError> {
        self.sync()?;
        self.with_state(|state| state.calls.push(call));
        Ok(value.clone())
    }

    fn with_state<T>(&self, action: impl FnOnce(&mut ServiceState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        action(&mut state)
    }
}

impl LanguageService for ScriptedService {
    fn syntactic_diagnostics(&self, _file_name: &str) -> Result<Value, EngineError> {
        self.answer(CallKind::Syntactic, &self.responses.syntactic)
    }

    fn semantic_diagnostics(&self, _file_name: &str) -> Result<Value, EngineError> {
        if let Some(message) = &self.responses.semantic_error {
            return Err(EngineError::new(message.clone()));
        }
        self.answer(CallKind::Semantic, &self.responses.semantic)
    }

    fn completions_at_position(
        &self,
        _file_name: &str,
        _position: u32,
    ) -> Result<Value, EngineError> {
        self.answer(CallKind::Completions, &self.responses.completions)
    }

    fn completion_entry_details(
        &self,
        _file_name: &str,
        _position: u32,
        entry_name: &str,
        source: Option<&str>,
    ) -> Result<Value, EngineError> {
        self.with_state(|state| {
            state
                .entry_requests
                .push((entry_name.to_owned(), source.map(str::to_owned)));
        });
        self.answer(CallKind::CompletionDetails, &self.responses.details)
    }

    fn navigation_tree(&self, _file_name: &str) -> Result<Value, EngineError> {
        self.answer(CallKind::NavigationTree, &self.responses.navigation)
    }

    fn quick_info_at_position(
        &self,
        _file_name: &str,
        _position: u32,
    ) -> Result<Value, EngineError> {
        self.answer(CallKind::QuickInfo, &self.responses.quick_info)
    }

    fn emit_output(&self, _file_name: &str) -> Result<Value, EngineError> {
        self.answer(CallKind::Emit, &self.responses.emit)
    }

    fn line_and_character_of_position(
        &self,
        file_name: &str,
        position: u32,
    ) -> Result<LineAndCharacter, EngineError> {
        let snapshot = self.host.script_snapshot(file_name)?;
        let end = usize::try_from(position)
            .map_err(|error| EngineError::with_source("position out of range", error))?;
        let prefix = snapshot.slice(0, end.min(snapshot.len())).unwrap_or_default();
        let line = prefix.matches('\n').count();
        let character = prefix.rsplit('\n').next().map_or(0, str::len);
        Ok(LineAndCharacter::new(
            u32::try_from(line).map_err(|error| EngineError::with_source("line", error))?,
            u32::try_from(character)
                .map_err(|error| EngineError::with_source("character", error))?,
        ))
    }

    fn apply_code_action(&self, action: &Value) -> Result<Value, EngineError> {
        self.with_state(|state| {
            state.calls.push(CallKind::ApplyCodeAction);
            state.applied.push(action.clone());
        });
        Ok(self.responses.applied.clone())
    }
}

/// Engine that creates [`ScriptedService`]s and keeps them for inspection.
pub struct ScriptedEngine {
    responses: Responses,
    services: Mutex<Vec<Arc<ScriptedService>>>,
}

impl ScriptedEngine {
    /// Creates an engine whose services answer with `responses`.
    pub const fn new(responses: Responses) -> Self {
        Self {
            responses,
            services: Mutex::new(Vec::new()),
        }
    }

    /// Most recently created service.
    #[must_use]
    pub fn last_service(&self) -> Option<Arc<ScriptedService>> {
        self.services
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl AnalysisEngine for ScriptedEngine {
    fn version(&self) -> String {
        String::from("5.0.4-scripted")
    }

    fn transpile(
        &self,
        file_name: &str,
        text: &str,
        settings: &CompilationSettings,
    ) -> Result<Value, EngineError> {
        Ok(json!({
            "fileName": file_name,
            "outputText": text,
            "target": settings.target,
        }))
    }

    fn create_language_service(
        &self,
        host: Arc<dyn LanguageServiceHost>,
    ) -> Result<Arc<dyn LanguageService>, EngineError> {
        let service = Arc::new(ScriptedService::new(host, self.responses.clone()));
        self.services
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&service));
        Ok(service)
    }
}
