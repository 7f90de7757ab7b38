//! Host-side object model handed to extensions.
//!
//! Widgets are plain data: the host only needs enough structure to observe
//! what an extension attached and whether it was detached again.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use exthost_core::types::{HostId, WidgetId};

/// Object owned by the host that extensions attach resources to.
///
/// Extensions receive it as `&mut dyn HostObject` for the duration of a
/// single lifecycle call and must not keep it afterwards.
pub trait HostObject: std::fmt::Debug {
    /// Returns the host object's identifier.
    fn host_id(&self) -> HostId;

    /// Returns the insertion point for visual elements.
    fn container(&self) -> &Container;

    /// Returns the insertion point for visual elements, mutably.
    fn container_mut(&mut self) -> &mut Container;

    /// Reads a keyed attachment.
    fn data(&self, key: &str) -> Option<&Value>;

    /// Stores a keyed attachment, returning the previous value.
    fn set_data(&mut self, key: &str, value: Value) -> Option<Value>;

    /// Removes and returns a keyed attachment.
    fn take_data(&mut self, key: &str) -> Option<Value>;

    /// Captures the observable state: children and attachments.
    fn snapshot(&self) -> HostSnapshot;
}

/// Comparable capture of a host object's observable state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostSnapshot {
    /// Child widgets in container order.
    pub children: Vec<Widget>,
    /// Keyed attachments.
    pub data: BTreeMap<String, Value>,
}

/// Ordered list of child widgets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    children: Vec<Widget>,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a widget and returns its id.
    pub fn pack(&mut self, widget: Widget) -> WidgetId {
        let id = widget.id;
        self.children.push(widget);
        id
    }

    /// Removes a widget by id.
    pub fn remove(&mut self, id: WidgetId) -> Option<Widget> {
        let index = self.children.iter().position(|w| w.id == id)?;
        Some(self.children.remove(index))
    }

    /// Gets a widget by id.
    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.children.iter().find(|w| w.id == id)
    }

    /// Whether a widget with this id is packed.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.get(id).is_some()
    }

    /// Child widgets in packing order.
    pub fn children(&self) -> &[Widget] {
        &self.children
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the container has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A visual element created by an extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    /// Unique widget id; every constructor call yields a new one.
    pub id: WidgetId,
    /// Widget payload.
    pub kind: WidgetKind,
    /// Whether the widget has been shown.
    pub visible: bool,
}

impl Widget {
    /// Creates a hidden text label.
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            id: WidgetId::new(),
            kind: WidgetKind::Label { text: text.into() },
            visible: false,
        }
    }

    /// Creates a self-closing dialog.
    pub fn dialog(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: WidgetId::new(),
            kind: WidgetKind::Dialog(Dialog::new(title, message)),
            visible: false,
        }
    }

    /// Marks the widget visible.
    pub fn show(mut self) -> Self {
        self.visible = true;
        self
    }

    /// Label text, if this is a label.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            WidgetKind::Label { text } => Some(text),
            WidgetKind::Dialog(_) => None,
        }
    }

    /// Dialog state, if this is a dialog.
    pub fn as_dialog_mut(&mut self) -> Option<&mut Dialog> {
        match &mut self.kind {
            WidgetKind::Dialog(dialog) => Some(dialog),
            WidgetKind::Label { .. } => None,
        }
    }
}

/// Widget payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetKind {
    /// Static text.
    Label {
        /// Displayed text.
        text: String,
    },
    /// Interactive dialog.
    Dialog(Dialog),
}

/// Response a user gives a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogResponse {
    /// Accept / OK.
    Accept,
    /// Cancel.
    Cancel,
    /// Window-manager close.
    Close,
}

/// A dialog that handles its own response by closing itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialog {
    /// Dialog title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Last response received.
    pub response: Option<DialogResponse>,
    /// Whether the dialog is still open.
    pub open: bool,
}

impl Dialog {
    fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            response: None,
            open: true,
        }
    }

    /// Records a response; any response closes the dialog.
    pub fn respond(&mut self, response: DialogResponse) {
        self.response = Some(response);
        self.open = false;
    }
}

/// Reference host object: a window with a single box container.
#[derive(Debug, Clone, PartialEq)]
pub struct HostWindow {
    id: HostId,
    title: String,
    container: Container,
    data: BTreeMap<String, Value>,
}

impl HostWindow {
    /// Creates an empty window.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: HostId::new(),
            title: title.into(),
            container: Container::new(),
            data: BTreeMap::new(),
        }
    }

    /// Window title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl HostObject for HostWindow {
    fn host_id(&self) -> HostId {
        self.id
    }

    fn container(&self) -> &Container {
        &self.container
    }

    fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    fn data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    fn set_data(&mut self, key: &str, value: Value) -> Option<Value> {
        self.data.insert(key.to_string(), value)
    }

    fn take_data(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    fn snapshot(&self) -> HostSnapshot {
        HostSnapshot {
            children: self.container.children().to_vec(),
            data: self.data.clone(),
        }
    }
}
