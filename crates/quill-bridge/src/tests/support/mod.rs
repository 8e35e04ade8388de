//! Shared fixtures and helpers for bridge tests.

mod scripted_engine;
mod world;

use std::sync::Arc;

use quill_config::Config;
use rstest::fixture;

pub use scripted_engine::{CallKind, Responses, ScriptedEngine, ScriptedService};
pub use world::TestWorld;

use crate::bridge::ScriptBridge;
use crate::handle::ServiceHandle;
use crate::registry::SharedLibraryRegistry;
use crate::resources::{LibraryBundle, StaticResources};
use crate::root::MemoryCompilationRoot;

/// File edited by most tests.
pub const MAIN_FILE: &str = "main.ts";

/// Text of [`MAIN_FILE`]; the second line starts at offset 11.
pub const MAIN_TEXT: &str = "let a = 1;\nlet b: string = 2;\n";

/// Ambient library text bundled by [`sample_bundle`].
pub const LIB_TEXT: &str = "interface Array<T> { length: number; }";

/// Bundle holding one ambient library at `lib/lib.d.ts`.
#[fixture]
pub fn sample_bundle() -> LibraryBundle {
    LibraryBundle::new(
        Arc::new(StaticResources::new([("lib/lib.d.ts", LIB_TEXT)])),
        ["lib/lib.d.ts"],
    )
}

/// Bridge over a scripted engine and a private registry.
#[must_use]
pub fn bridge_with(responses: Responses) -> (ScriptBridge, Arc<ScriptedEngine>) {
    let engine = Arc::new(ScriptedEngine::new(responses));
    let bridge = ScriptBridge::new(engine.clone(), sample_bundle(), &Config::default())
        .with_registry(Arc::new(SharedLibraryRegistry::new()));
    (bridge, engine)
}

/// Bridge, service and root with [`MAIN_FILE`] loaded.
#[must_use]
pub fn service_with(
    responses: Responses,
) -> (ScriptBridge, ServiceHandle, Arc<ScriptedService>, Arc<MemoryCompilationRoot>) {
    let (bridge, engine) = bridge_with(responses);
    let root = Arc::new(MemoryCompilationRoot::new());
    root.set_text(MAIN_FILE, MAIN_TEXT);
    let host = bridge
        .create_language_service_host(root.clone())
        .expect("host creation failed");
    let handle = bridge
        .create_language_service(host)
        .expect("service creation failed");
    let service = engine.last_service().expect("engine created no service");
    (bridge, handle, service, root)
}
