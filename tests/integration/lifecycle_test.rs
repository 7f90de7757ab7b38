//! Activation lifecycle against a host window.

use exthost_plugin::host::{DialogResponse, HostObject, HostWindow, Widget};
use exthost_plugin::{ActivationSet, Capability, ConstructParams, ExtensionState};

use plugin_demo::{hello_world, second_time};

use crate::helpers::loaded_engine;

#[test]
fn test_activation_set_restores_window() {
    let engine = loaded_engine();
    let mut window = HostWindow::new("lifecycle");
    window.container_mut().pack(Widget::label("host content"));
    let before = window.snapshot();

    let (mut set, report) = ActivationSet::new(&engine);
    assert!(report.is_ok());
    assert_eq!(set.plugin_ids(), vec![hello_world::PLUGIN_ID, second_time::PLUGIN_ID]);

    let report = set.activate_all(&mut window);
    assert!(report.is_ok());
    let texts: Vec<_> = window
        .container()
        .children()
        .iter()
        .filter_map(|w| w.text())
        .collect();
    assert_eq!(
        texts,
        vec!["host content", hello_world::LABEL_TEXT, second_time::LABEL_TEXT]
    );
    assert!(window.data(hello_world::WINDOW_DATA_KEY).is_some());

    assert!(set.update_state_all(&mut window).is_ok());

    let report = set.deactivate_all(&mut window);
    assert!(report.is_ok());
    assert_eq!(window.snapshot(), before);
}

#[test]
fn test_lifecycle_is_repeatable() {
    let engine = loaded_engine();
    let mut window = HostWindow::new("repeat");
    let before = window.snapshot();
    let (mut set, _) = ActivationSet::new(&engine);

    for _ in 0..3 {
        assert!(set.activate_all(&mut window).is_ok());
        assert_eq!(window.container().len(), 2);
        assert!(set.deactivate_all(&mut window).is_ok());
        assert_eq!(window.snapshot(), before);
    }
}

#[test]
fn test_double_activate_and_stray_deactivate_are_no_ops() {
    let engine = loaded_engine();
    let mut window = HostWindow::new("guards");
    let mut ext = engine
        .create_extension(hello_world::PLUGIN_ID, Capability::Activatable, ConstructParams::new())
        .unwrap();

    ext.deactivate(&mut window).unwrap();
    assert_eq!(ext.state(), ExtensionState::Inactive);

    ext.activate(&mut window).unwrap();
    ext.activate(&mut window).unwrap();
    assert_eq!(window.container().len(), 1);
    assert_eq!(ext.active_host(), Some(window.host_id()));
    assert!(ext.activated_at().is_some());

    ext.deactivate(&mut window).unwrap();
    assert!(window.container().is_empty());
}

#[test]
fn test_extension_is_bound_to_one_host() {
    let engine = loaded_engine();
    let mut first = HostWindow::new("first");
    let mut second = HostWindow::new("second");
    let mut ext = engine
        .create_extension(second_time::PLUGIN_ID, Capability::Activatable, ConstructParams::new())
        .unwrap();

    ext.activate(&mut first).unwrap();
    assert!(ext.activate(&mut second).is_err());
    assert!(ext.deactivate(&mut second).is_err());
    assert!(second.container().is_empty());
    ext.deactivate(&mut first).unwrap();
    assert!(first.container().is_empty());
}

#[test]
fn test_configure_widgets_are_distinct() {
    let engine = loaded_engine();
    let ext = engine
        .create_extension(hello_world::PLUGIN_ID, Capability::Configurable, ConstructParams::new())
        .unwrap();

    let first = ext.create_configure_widget().unwrap();
    let second = ext.create_configure_widget().unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(first.text(), Some(hello_world::CONFIGURE_TEXT));
}

#[test]
fn test_configure_dialog_closes_on_response() {
    let engine = loaded_engine();
    let ext = engine
        .create_extension(second_time::PLUGIN_ID, Capability::Configurable, ConstructParams::new())
        .unwrap();

    let mut widget = ext.create_configure_widget().unwrap();
    let dialog = widget.as_dialog_mut().unwrap();
    assert!(dialog.open);
    dialog.respond(DialogResponse::Close);
    assert!(!dialog.open);
    assert_eq!(dialog.response, Some(DialogResponse::Close));
}
