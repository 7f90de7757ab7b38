//! Typed and by-name invocation of the introspection plugin.

use serde_json::{Value, json};

use exthost_plugin::host::HostWindow;
use exthost_plugin::{Capability, ConstructParams, PluginError};

use plugin_introspection::introspection::{self, CONSTRUCT_ONLY, READ_ONLY, READWRITE, WRITE_ONLY};

use crate::helpers::loaded_engine;

fn callable() -> exthost_plugin::BoundExtension {
    loaded_engine()
        .create_extension(introspection::PLUGIN_ID, Capability::Callable, ConstructParams::new())
        .unwrap()
}

#[test]
fn test_typed_calls() {
    let ext = callable();
    let callable = ext.as_callable().unwrap();
    callable.call_no_args();
    assert_eq!(callable.call_with_return(), "Hello, World!");
    assert!(callable.call_single_arg());
    assert_eq!(
        callable.call_multi_args(json!("A"), json!("B")),
        (json!("B"), json!("A"))
    );
}

#[test]
fn test_calls_by_name() {
    let mut ext = callable();
    assert_eq!(ext.call("call_no_args", &[]).unwrap(), Value::Null);
    assert_eq!(ext.call("call_with_return", &[]).unwrap(), json!("Hello, World!"));
    assert_eq!(ext.call("call_single_arg", &[]).unwrap(), json!(true));
    assert_eq!(
        ext.call("call_multi_args", &[json!("A"), json!("B")]).unwrap(),
        json!(["B", "A"])
    );
}

#[test]
fn test_bad_calls_are_rejected() {
    let mut ext = callable();
    assert!(matches!(
        ext.call("does_not_exist", &[]),
        Err(PluginError::UnknownMethod { .. })
    ));
    assert!(matches!(
        ext.call("call_multi_args", &[json!("A")]),
        Err(PluginError::ArgumentCount { expected: 2, actual: 1, .. })
    ));
    assert!(ext.method_names().contains(&"call_with_return"));
}

#[test]
fn test_single_arg_is_returned_not_passed() {
    let mut ext = callable();
    assert_eq!(ext.call("call_single_arg", &[]).unwrap(), json!(true));
    assert!(matches!(
        ext.call("call_single_arg", &[json!(false)]),
        Err(PluginError::ArgumentCount { expected: 0, actual: 1, .. })
    ));
}

#[test]
fn test_lifecycle_by_name_needs_host() {
    let engine = loaded_engine();
    let mut ext = engine
        .create_extension("hello-world", Capability::Activatable, ConstructParams::new())
        .unwrap();
    let mut window = HostWindow::new("by-name");

    assert!(matches!(ext.call("activate", &[]), Err(PluginError::HostRequired(_))));
    ext.call_with_host("activate", &mut window, &[]).unwrap();
    assert!(ext.is_active());
    ext.call_with_host("deactivate", &mut window, &[]).unwrap();
    assert!(!ext.is_active());
}

#[test]
fn test_property_access_modes() {
    let engine = loaded_engine();
    let mut ext = engine
        .create_extension(introspection::PLUGIN_ID, Capability::Properties, ConstructParams::new())
        .unwrap();

    let err = ext.call("set_property", &[json!(READ_ONLY), json!("changed")]);
    assert!(err.is_err());
    assert_eq!(
        ext.call("get_property", &[json!(READ_ONLY)]).unwrap(),
        json!("read-only")
    );

    ext.call("set_property", &[json!(READWRITE), json!("changed")])
        .unwrap();
    assert_eq!(
        ext.call("get_property", &[json!(READWRITE)]).unwrap(),
        json!("changed")
    );

    ext.call("set_property", &[json!(WRITE_ONLY), json!("secret")])
        .unwrap();
    assert!(matches!(
        ext.call("get_property", &[json!(WRITE_ONLY)]),
        Err(PluginError::PropertyNotReadable(_))
    ));

    assert!(matches!(
        ext.call("set_property", &[json!(CONSTRUCT_ONLY), json!("late")]),
        Err(PluginError::PropertyConstructOnly(_))
    ));
}

#[test]
fn test_construct_only_round_trip() {
    let engine = loaded_engine();
    let params = ConstructParams::new().with(CONSTRUCT_ONLY, "my-construct-only");
    let ext = engine
        .create_extension(introspection::PLUGIN_ID, Capability::Properties, params)
        .unwrap();
    assert_eq!(
        ext.as_properties().unwrap().get_property(CONSTRUCT_ONLY).unwrap(),
        json!("my-construct-only")
    );
}

#[test]
fn test_invalid_construct_property_fails() {
    let engine = loaded_engine();
    let params = ConstructParams::new().with("invalid-property", "does-not-exist");
    assert!(matches!(
        engine.create_extension(introspection::PLUGIN_ID, Capability::Properties, params),
        Err(PluginError::UnknownProperty(name)) if name == "invalid-property"
    ));
}
