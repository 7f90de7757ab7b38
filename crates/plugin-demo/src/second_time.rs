//! The `second-time` plugin.

use tracing::debug;

use exthost_plugin::prelude::*;

/// Module name.
pub const PLUGIN_ID: &str = "second-time";

/// Text of the label packed into the window.
pub const LABEL_TEXT: &str = "A second time!";

/// Plugin export.
pub fn register() -> PluginExport {
    PluginExport::new(plugin_info!(
        id: PLUGIN_ID,
        name: "Second Time",
        version: env!("CARGO_PKG_VERSION"),
        description: "Says hello a second time, after hello-world",
        authors: ["exthost developers"],
        depends: [format!("{} >=0.1", super::hello_world::PLUGIN_ID)]
    ))
    .with_activatable(SecondTime::default)
    .with_configurable(|| SecondTimeConfigurable)
}

/// Extension that keeps the label it packed on itself.
#[derive(Debug, Default)]
pub struct SecondTime {
    label: Option<WidgetId>,
    updates: u32,
}

impl SecondTime {
    /// Number of state notifications received in the current cycle.
    pub fn updates(&self) -> u32 {
        self.updates
    }
}

impl Activatable for SecondTime {
    fn activate(&mut self, host: &mut dyn HostObject) -> PluginResult<()> {
        debug!(host_id = %host.host_id(), "second_time_activate");

        if self.label.is_none() {
            self.label = Some(host.container_mut().pack(Widget::label(LABEL_TEXT).show()));
        }
        Ok(())
    }

    fn deactivate(&mut self, host: &mut dyn HostObject) -> PluginResult<()> {
        debug!(host_id = %host.host_id(), "second_time_deactivate");

        if let Some(label) = self.label.take() {
            host.container_mut().remove(label);
        }
        self.updates = 0;
        Ok(())
    }

    fn update_state(&mut self, host: &mut dyn HostObject) {
        self.updates += 1;
        debug!(host_id = %host.host_id(), updates = self.updates, "second_time_update_state");
    }
}

/// Settings surface: a dialog that closes itself on any response.
#[derive(Debug)]
pub struct SecondTimeConfigurable;

impl Configurable for SecondTimeConfigurable {
    fn create_configure_widget(&self) -> PluginResult<Widget> {
        Ok(Widget::dialog(
            "Second Time",
            "There is nothing to configure for this plugin.",
        ))
    }
}
