//! Capability binding and prerequisite checks.

use serde_json::json;

use exthost_plugin::{Capability, ConstructParams, PluginError};

use plugin_demo::hello_world;
use plugin_introspection::{introspection, missing_prerequisite};

use crate::helpers::loaded_engine;

#[test]
fn test_prerequisite_satisfied() {
    let engine = loaded_engine();
    assert!(engine.provides_extension(introspection::PLUGIN_ID, Capability::HasPrerequisite));

    let params = ConstructParams::new().with(introspection::PREREQUISITE, "prerequisite");
    let mut ext = engine
        .create_extension(introspection::PLUGIN_ID, Capability::HasPrerequisite, params)
        .unwrap();
    assert_eq!(
        ext.as_has_prerequisite().unwrap().prerequisite(),
        Some("prerequisite")
    );
    assert_eq!(ext.call("prerequisite", &[]).unwrap(), json!("prerequisite"));
}

#[test]
fn test_missing_prerequisite_fails_at_bind() {
    let engine = loaded_engine();
    assert!(!engine.provides_extension(missing_prerequisite::PLUGIN_ID, Capability::HasPrerequisite));

    let err = engine
        .create_extension(
            missing_prerequisite::PLUGIN_ID,
            Capability::HasPrerequisite,
            ConstructParams::new(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        PluginError::PrerequisiteUnsatisfied {
            capability: Capability::HasPrerequisite,
            missing: Capability::Properties,
            ..
        }
    ));
    assert!(err.is_binding_error());

    // Capabilities without prerequisites stay usable.
    assert!(
        engine
            .create_extension(missing_prerequisite::PLUGIN_ID, Capability::Callable, ConstructParams::new())
            .is_ok()
    );
}

#[test]
fn test_capability_not_provided() {
    let engine = loaded_engine();
    assert!(!engine.provides_extension(hello_world::PLUGIN_ID, Capability::Callable));
    assert!(matches!(
        engine.create_extension(hello_world::PLUGIN_ID, Capability::Callable, ConstructParams::new()),
        Err(PluginError::CapabilityNotProvided { capability: Capability::Callable, .. })
    ));
}

#[test]
fn test_wrong_capability_accessor() {
    let engine = loaded_engine();
    let ext = engine
        .create_extension(hello_world::PLUGIN_ID, Capability::Configurable, ConstructParams::new())
        .unwrap();
    assert!(matches!(
        ext.as_callable(),
        Err(PluginError::WrongCapability { expected: Capability::Callable, actual: Capability::Configurable })
    ));
}

#[test]
fn test_capability_names_parse() {
    for cap in Capability::ALL {
        assert_eq!(cap.as_str().parse::<Capability>().unwrap(), cap);
    }
    assert!(matches!(
        "Flying".parse::<Capability>(),
        Err(PluginError::UnknownCapability(_))
    ));
}
