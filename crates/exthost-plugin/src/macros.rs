//! Convenience macros for plugin development.

/// Macro for creating a [`PluginInfo`](crate::registry::PluginInfo).
///
/// # Example
/// ```rust,ignore
/// let info = plugin_info!(
///     id: "second-time",
///     name: "Second Time",
///     version: "1.0.0",
///     description: "Says hello a second time",
///     authors: ["Dev"],
///     depends: ["hello-world"]
/// );
/// ```
#[macro_export]
macro_rules! plugin_info {
    (
        id: $id:expr,
        name: $name:expr,
        version: $version:expr
    ) => {
        $crate::registry::PluginInfo::new($id, $name, $version)
    };
    (
        id: $id:expr,
        name: $name:expr,
        version: $version:expr,
        description: $desc:expr,
        authors: [$($author:expr),* $(,)?]
        $(, depends: [$($dep:expr),* $(,)?])?
        $(, hidden: $hidden:expr)?
    ) => {{
        #[allow(unused_mut)]
        let mut info = $crate::registry::PluginInfo::new($id, $name, $version);
        info.description = $desc.to_string();
        info.authors = vec![$($author.to_string()),*];
        $( info.dependencies = vec![$($dep.to_string()),*]; )?
        $( info.hidden = $hidden; )?
        info
    }};
}
