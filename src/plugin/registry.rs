use std::collections::HashMap;

use anyhow::Result;

use crate::plugin::contract::Plugin;
use crate::plugin::error::PluginLoadError;

/// Constructor for one concrete plugin type.
pub type PluginFactory = Box<dyn Fn() -> Result<Box<dyn Plugin>>>;

/// One instantiation attempt from a unit.
pub type Candidate = Result<Box<dyn Plugin>>;

/// Resolves a unit id to the plugin instances it provides.
pub trait UnitLoader {
    fn load(&self, unit: &str) -> Result<Vec<Candidate>, PluginLoadError>;
}

/// Units registered in-process at startup, each with one or more factories.
#[derive(Default)]
pub struct StaticUnits {
    units: HashMap<String, Vec<PluginFactory>>,
}

impl StaticUnits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, unit: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn Plugin>> + 'static,
    {
        self.units
            .entry(unit.into())
            .or_default()
            .push(Box::new(factory));
    }
}

impl UnitLoader for StaticUnits {
    fn load(&self, unit: &str) -> Result<Vec<Candidate>, PluginLoadError> {
        let factories = self
            .units
            .get(unit)
            .ok_or_else(|| PluginLoadError::UnitNotFound(unit.to_string()))?;

        Ok(factories.iter().map(|factory| factory()).collect())
    }
}

impl std::fmt::Debug for StaticUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut units: Vec<&String> = self.units.keys().collect();
        units.sort();
        f.debug_struct("StaticUnits").field("units", &units).finish()
    }
}
