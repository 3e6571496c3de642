use crate::model::menu::{MenuTree, NodeId};
use crate::plugin::contract::Plugin;
use crate::plugin::error::{LifecycleStage, PluginLoadError};

/// A plugin that completed `initialize` and `register_commands`.
#[derive(Debug)]
pub struct PluginRuntime {
    pub name: String,
    plugin: Box<dyn Plugin>,
}

impl PluginRuntime {
    /// Initialize the plugin and let it graft its menu under `root`.
    ///
    /// If grafting fails after a successful initialize, the plugin is shut down
    /// again before the error is returned.
    pub fn start(
        mut plugin: Box<dyn Plugin>,
        tree: &mut MenuTree,
        root: NodeId,
    ) -> Result<Self, PluginLoadError> {
        let name = plugin.name().to_string();

        plugin
            .initialize()
            .map_err(|source| lifecycle(&name, LifecycleStage::Initialize, source))?;

        if let Err(source) = plugin.register_commands(tree, root) {
            if let Err(err) = plugin.shutdown() {
                tracing::error!("plugin {name}: shutdown after failed registration: {err:#}");
            }
            return Err(lifecycle(&name, LifecycleStage::RegisterCommands, source));
        }

        Ok(Self {
            name,
            plugin,
        })
    }

    pub fn stop(&mut self) -> Result<(), PluginLoadError> {
        self.plugin
            .shutdown()
            .map_err(|source| lifecycle(&self.name, LifecycleStage::Shutdown, source))
    }

    pub fn plugin(&self) -> &dyn Plugin {
        self.plugin.as_ref()
    }

    pub fn display_name(&self) -> String {
        format!("{} v{}", self.name, self.plugin.version())
    }
}

fn lifecycle(name: &str, stage: LifecycleStage, source: anyhow::Error) -> PluginLoadError {
    PluginLoadError::Lifecycle {
        plugin: name.to_string(),
        stage,
        source,
    }
}
