//! Plugins shipped with the shell and registered as static units.

use anyhow::{Result, anyhow};

use crate::model::command::CommandKind;
use crate::model::menu::{MenuTree, NodeId};
use crate::plugin::contract::Plugin;
use crate::plugin::registry::StaticUnits;

/// Register every bundled plugin under its unit id.
pub fn register_builtin(units: &mut StaticUnits) {
    units.register("SamplePlugin", || {
        Ok(Box::new(SamplePlugin::default()) as Box<dyn Plugin>)
    });
    units.register("ExtendedPlugin", || {
        Ok(Box::new(ExtendedPlugin::default()) as Box<dyn Plugin>)
    });
}

fn graft(
    tree: &mut MenuTree,
    root: NodeId,
    title: &str,
    entries: &[(&str, CommandKind)],
) -> Result<()> {
    let menu = tree
        .add_entry(root, title, CommandKind::OpenSubmenu)
        .ok_or_else(|| anyhow!("menu root is not part of the tree"))?;

    for (entry, kind) in entries {
        tree.add_entry(menu, *entry, *kind);
    }
    Ok(())
}

/// Demonstration plugin with two sample commands.
#[derive(Debug, Default)]
pub struct SamplePlugin;

impl Plugin for SamplePlugin {
    fn name(&self) -> &str {
        "SamplePlugin"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn author(&self) -> &str {
        "bootmenu"
    }

    fn description(&self) -> &str {
        "Demonstration plugin with sample commands."
    }

    fn initialize(&mut self) -> Result<()> {
        tracing::info!("{} initialized", self.name());
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        tracing::info!("{} shutting down", self.name());
        Ok(())
    }

    fn register_commands(&self, tree: &mut MenuTree, root: NodeId) -> Result<()> {
        graft(
            tree,
            root,
            self.name(),
            &[("Run Test", CommandKind::Tools), ("Show Info", CommandKind::Help)],
        )
    }
}

/// Advanced diagnostics and model tooling.
#[derive(Debug, Default)]
pub struct ExtendedPlugin;

impl Plugin for ExtendedPlugin {
    fn name(&self) -> &str {
        "ExtendedPlugin"
    }

    fn version(&self) -> &str {
        "2.1.0"
    }

    fn author(&self) -> &str {
        "bootmenu"
    }

    fn description(&self) -> &str {
        "Provides advanced AI tools and diagnostics."
    }

    fn initialize(&mut self) -> Result<()> {
        tracing::info!("{} v{} initialized", self.name(), self.version());
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        tracing::info!("{} shutting down", self.name());
        Ok(())
    }

    fn register_commands(&self, tree: &mut MenuTree, root: NodeId) -> Result<()> {
        graft(
            tree,
            root,
            self.name(),
            &[
                ("Advanced Diagnostics", CommandKind::Diagnostics),
                ("Model Profiler", CommandKind::Tools),
                ("Hyperparameter Sweeper", CommandKind::Tools),
                ("Explainability Suite", CommandKind::Tools),
            ],
        )
    }
}
