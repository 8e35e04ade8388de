//! Crate-level tests driving the bridge through a scripted engine.

mod support;
