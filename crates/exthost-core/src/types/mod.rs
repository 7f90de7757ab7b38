//! Shared value types.

pub mod id;

pub use id::{ExtensionId, HostId, WidgetId};
