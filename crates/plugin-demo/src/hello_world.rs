//! The `hello-world` plugin.

use tracing::debug;

use exthost_plugin::prelude::*;

/// Module name.
pub const PLUGIN_ID: &str = "hello-world";

/// Text of the label packed into the window.
pub const LABEL_TEXT: &str = "Hello World!";

/// Window attachment key holding the label's widget id.
pub const WINDOW_DATA_KEY: &str = "HelloWorldPluginWindowData";

/// Text of the configure widget.
pub const CONFIGURE_TEXT: &str = "This is a configuration dialog for the HelloWorld plugin.";

/// Plugin export.
pub fn register() -> PluginExport {
    PluginExport::new(plugin_info!(
        id: PLUGIN_ID,
        name: "Hello World",
        version: env!("CARGO_PKG_VERSION"),
        description: "Adds a 'Hello World!' label to the window",
        authors: ["exthost developers"]
    ))
    .with_activatable(|| HelloWorldPlugin)
    .with_configurable(|| HelloWorldConfigurable)
}

/// Stateless extension: everything it creates is parked on the window
/// under [`WINDOW_DATA_KEY`].
#[derive(Debug)]
pub struct HelloWorldPlugin;

impl Activatable for HelloWorldPlugin {
    fn activate(&mut self, host: &mut dyn HostObject) -> PluginResult<()> {
        debug!(host_id = %host.host_id(), "hello_world_plugin_activate");

        if host.data(WINDOW_DATA_KEY).is_some() {
            debug!("hello-world label already present");
            return Ok(());
        }

        let label = host.container_mut().pack(Widget::label(LABEL_TEXT).show());
        host.set_data(WINDOW_DATA_KEY, serde_json::to_value(label)?);
        Ok(())
    }

    fn deactivate(&mut self, host: &mut dyn HostObject) -> PluginResult<()> {
        debug!(host_id = %host.host_id(), "hello_world_plugin_deactivate");

        let data = host
            .take_data(WINDOW_DATA_KEY)
            .ok_or_else(|| PluginError::extension("window has no hello-world data"))?;
        let label: WidgetId = serde_json::from_value(data)?;
        host.container_mut().remove(label);
        Ok(())
    }

    fn update_state(&mut self, host: &mut dyn HostObject) {
        debug!(host_id = %host.host_id(), "hello_world_plugin_update_state");
    }
}

/// Settings surface: a plain label.
#[derive(Debug)]
pub struct HelloWorldConfigurable;

impl Configurable for HelloWorldConfigurable {
    fn create_configure_widget(&self) -> PluginResult<Widget> {
        debug!("hello_world_configurable_create_configure_widget");
        Ok(Widget::label(CONFIGURE_TEXT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exthost_plugin::HostWindow;

    #[test]
    fn test_activate_packs_label_and_parks_data() {
        let mut window = HostWindow::new("test");
        HelloWorldPlugin.activate(&mut window).unwrap();

        assert_eq!(window.container().len(), 1);
        assert_eq!(window.container().children()[0].text(), Some(LABEL_TEXT));
        assert!(window.container().children()[0].visible);
        assert!(window.data(WINDOW_DATA_KEY).is_some());
    }

    #[test]
    fn test_activate_deactivate_restores_window() {
        let mut window = HostWindow::new("test");
        window.container_mut().pack(Widget::label("host label"));
        let before = window.snapshot();

        let mut plugin = HelloWorldPlugin;
        plugin.activate(&mut window).unwrap();
        plugin.deactivate(&mut window).unwrap();

        assert_eq!(window.snapshot(), before);
    }

    #[test]
    fn test_second_activate_does_not_duplicate() {
        let mut window = HostWindow::new("test");
        let mut plugin = HelloWorldPlugin;
        plugin.activate(&mut window).unwrap();
        plugin.activate(&mut window).unwrap();
        assert_eq!(window.container().len(), 1);
    }

    #[test]
    fn test_deactivate_without_data_fails_cleanly() {
        let mut window = HostWindow::new("test");
        let before = window.snapshot();
        assert!(HelloWorldPlugin.deactivate(&mut window).is_err());
        assert_eq!(window.snapshot(), before);
    }

    #[test]
    fn test_configure_widgets_are_distinct() {
        let first = HelloWorldConfigurable.create_configure_widget().unwrap();
        let second = HelloWorldConfigurable.create_configure_widget().unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.text(), Some(CONFIGURE_TEXT));
    }
}
