//! Integration tests driving the bundled plugins through the engine.

mod binding_test;
mod engine_test;
mod helpers;
mod invocation_test;
mod lifecycle_test;
