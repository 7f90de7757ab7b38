//! Plugin loading, unloading and configuration-driven startup.

use exthost_core::config::EngineConfig;
use exthost_core::error::{AppError, ErrorKind};
use exthost_plugin::host::{HostObject, HostWindow};
use exthost_plugin::{
    ActivationSet, Capability, ConstructParams, PluginEngine, PluginError, PluginExport, plugin_info,
};

use plugin_demo::{hello_world, second_time};
use plugin_introspection::introspection;

use crate::helpers::{all_exports, registered_engine};

#[test]
fn test_dependency_is_loaded_first() {
    let mut engine = registered_engine();
    engine.load_plugin(second_time::PLUGIN_ID).unwrap();
    assert!(engine.is_loaded(hello_world::PLUGIN_ID));
    assert!(engine.is_loaded(second_time::PLUGIN_ID));
}

#[test]
fn test_unloading_dependency_unloads_dependant() {
    let mut engine = registered_engine();
    engine.load_plugin(second_time::PLUGIN_ID).unwrap();
    engine.unload_plugin(hello_world::PLUGIN_ID).unwrap();
    assert!(!engine.is_loaded(second_time::PLUGIN_ID));
    assert!(engine.loaded_plugins().is_empty());
}

#[test]
fn test_unloaded_plugin_cannot_bind() {
    let mut engine = registered_engine();
    engine.load_plugin(introspection::PLUGIN_ID).unwrap();
    assert!(
        engine
            .create_extension(introspection::PLUGIN_ID, Capability::Callable, ConstructParams::new())
            .is_ok()
    );

    engine.unload_plugin(introspection::PLUGIN_ID).unwrap();
    assert!(!engine.provides_extension(introspection::PLUGIN_ID, Capability::Callable));
    assert!(matches!(
        engine.create_extension(introspection::PLUGIN_ID, Capability::Callable, ConstructParams::new()),
        Err(PluginError::PluginNotLoaded(_))
    ));
}

#[test]
fn test_unknown_plugin_maps_to_not_found() {
    let engine = registered_engine();
    let err = engine
        .create_extension("nope", Capability::Callable, ConstructParams::new())
        .unwrap_err();
    let app: AppError = err.into();
    assert_eq!(app.kind, ErrorKind::NotFound);
}

#[test]
fn test_config_skips_hidden_plugins() {
    let engine = PluginEngine::from_config(&EngineConfig::default(), all_exports()).unwrap();
    let ids: Vec<String> = engine.list_plugins().into_iter().map(|info| info.id).collect();
    assert_eq!(ids, vec![hello_world::PLUGIN_ID, second_time::PLUGIN_ID]);
    assert_eq!(engine.loaded_plugins().len(), 2);
}

#[test]
fn test_config_loads_listed_plugins_only() {
    let config = EngineConfig {
        load_all: false,
        plugins: vec![hello_world::PLUGIN_ID.to_string()],
        include_hidden: false,
    };
    let engine = PluginEngine::from_config(&config, all_exports()).unwrap();
    assert!(engine.is_loaded(hello_world::PLUGIN_ID));
    assert!(!engine.is_loaded(second_time::PLUGIN_ID));
}

#[test]
fn test_plugin_loaded_while_active_joins_set() {
    let mut engine = registered_engine();
    engine.load_plugin(hello_world::PLUGIN_ID).unwrap();
    let mut window = HostWindow::new("hot-load");
    let before = window.snapshot();

    let (mut set, _) = ActivationSet::new(&engine);
    set.activate_all(&mut window);
    assert_eq!(window.container().len(), 1);

    engine.load_plugin(second_time::PLUGIN_ID).unwrap();
    set.add_plugin(&engine, second_time::PLUGIN_ID, &mut window)
        .unwrap();
    assert_eq!(window.container().len(), 2);

    set.remove_plugin(second_time::PLUGIN_ID, &mut window).unwrap();
    engine.unload_plugin(second_time::PLUGIN_ID).unwrap();
    assert_eq!(window.container().len(), 1);

    set.deactivate_all(&mut window);
    assert_eq!(window.snapshot(), before);
}

#[test]
fn test_self_dependent_plugin_loads() {
    let mut engine = PluginEngine::new();
    engine
        .register(PluginExport::new(plugin_info!(
            id: "self-dep",
            name: "Self Dependency",
            version: "1.0",
            description: "Lists itself as a dependency",
            authors: ["tests"],
            depends: ["self-dep"]
        )))
        .unwrap();

    engine.load_plugin("self-dep").unwrap();
    assert!(engine.is_loaded("self-dep"));
    engine.unload_plugin("self-dep").unwrap();
    assert!(!engine.is_loaded("self-dep"));
}

#[test]
fn test_unloading_active_plugin_restores_window() {
    let mut engine = registered_engine();
    engine.load_plugin(second_time::PLUGIN_ID).unwrap();
    let mut window = HostWindow::new("unload-while-active");
    let before = window.snapshot();

    let (mut set, _) = ActivationSet::new(&engine);
    assert!(set.activate_all(&mut window).is_ok());
    assert_eq!(window.container().len(), 2);

    let report = set
        .unload_plugin(&mut engine, hello_world::PLUGIN_ID, &mut window)
        .unwrap();
    assert!(report.is_ok());
    assert_eq!(
        report.succeeded,
        vec![second_time::PLUGIN_ID.to_string(), hello_world::PLUGIN_ID.to_string()]
    );
    assert!(set.is_empty());
    assert!(!engine.is_loaded(second_time::PLUGIN_ID));
    assert_eq!(window.snapshot(), before);
}

#[test]
fn test_plugin_with_missing_dependency_becomes_unavailable() {
    let mut engine = PluginEngine::new();
    engine
        .register(PluginExport::new(plugin_info!(
            id: "orphan",
            name: "Orphan",
            version: "1.0",
            description: "Depends on a plugin nobody registered",
            authors: ["tests"],
            depends: ["nobody"]
        )))
        .unwrap();

    assert!(matches!(
        engine.load_plugin("orphan"),
        Err(PluginError::DependencyNotFound { .. })
    ));
    assert!(!engine.is_available("orphan"));
    assert!(matches!(
        engine.load_plugin("orphan"),
        Err(PluginError::PluginUnavailable { .. })
    ));
}

#[test]
fn test_versioned_dependency_on_bundled_plugin() {
    let mut engine = registered_engine();
    engine
        .register(PluginExport::new(plugin_info!(
            id: "needs-future-hello",
            name: "Needs Future Hello",
            version: "1.0",
            description: "Requires a hello-world release that does not exist",
            authors: ["tests"],
            depends: ["hello-world >=99"]
        )))
        .unwrap();

    assert!(matches!(
        engine.load_plugin("needs-future-hello"),
        Err(PluginError::DependencyVersionMismatch { .. })
    ));
    assert!(!engine.is_loaded(hello_world::PLUGIN_ID));

    // The bundled dependant's own requirement is met.
    engine.load_plugin(second_time::PLUGIN_ID).unwrap();
    assert!(engine.is_loaded(hello_world::PLUGIN_ID));
}
