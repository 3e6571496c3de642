use anyhow::Result;

use crate::model::menu::{MenuTree, NodeId};

/// Capability set every plugin implements.
///
/// The manager calls `initialize`, then `register_commands`, exactly once per
/// successful load, and `shutdown` once on unload.
pub trait Plugin {
    /// Key under which the plugin is tracked once loaded.
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    fn author(&self) -> &str;

    fn description(&self) -> &str;

    fn initialize(&mut self) -> Result<()>;

    fn shutdown(&mut self) -> Result<()>;

    /// Graft this plugin's menu entries under `root`. This is the only point at
    /// which a plugin may touch the shared tree.
    fn register_commands(&self, tree: &mut MenuTree, root: NodeId) -> Result<()>;
}

impl std::fmt::Debug for dyn Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name())
            .field("version", &self.version())
            .finish()
    }
}
