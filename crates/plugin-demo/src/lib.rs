//! Reference plugins for the exthost demo host.
//!
//! - [`hello_world`]: packs a label into the window, keeping its state on
//!   the window itself; ships a label configure widget.
//! - [`second_time`]: packs a second label, keeping its state on the
//!   extension; depends on `hello-world`; ships a dialog configure widget.

pub mod hello_world;
pub mod second_time;

use exthost_plugin::PluginExport;

/// Every plugin in this crate.
pub fn exports() -> Vec<PluginExport> {
    vec![hello_world::register(), second_time::register()]
}
