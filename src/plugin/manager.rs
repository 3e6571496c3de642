use std::collections::HashMap;

use crate::model::config::{AppConfig, VerificationMode};
use crate::model::menu::{MenuTree, NodeId};
use crate::plugin::contract::Plugin;
use crate::plugin::error::PluginLoadError;
use crate::plugin::integrity::{DigestAllowlist, IntegrityChecker, TrustAll};
use crate::plugin::manifest::PluginManifest;
use crate::plugin::registry::UnitLoader;
use crate::plugin::runtime::PluginRuntime;
use crate::plugin::store::{DirectoryStore, ManifestStore};

#[derive(Debug)]
pub enum LoadStatus {
    Loaded { name: String, version: String },
    Skipped(PluginLoadError),
}

/// What happened to one manifest, or to one candidate a manifest produced.
#[derive(Debug)]
pub struct LoadOutcome {
    pub origin: String,
    pub status: LoadStatus,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self.status, LoadStatus::Loaded { .. })
    }

    pub fn error(&self) -> Option<&PluginLoadError> {
        match &self.status {
            LoadStatus::Skipped(err) => Some(err),
            LoadStatus::Loaded { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub outcomes: Vec<LoadOutcome>,
    /// Set when the store could not be scanned at all.
    pub scan_error: Option<String>,
}

impl LoadReport {
    pub fn loaded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_loaded()).count()
    }

    pub fn error_count(&self) -> usize {
        self.outcomes.len() - self.loaded_count() + usize::from(self.scan_error.is_some())
    }

    pub fn errors(&self) -> impl Iterator<Item = &PluginLoadError> {
        self.outcomes.iter().filter_map(LoadOutcome::error)
    }

    pub fn summary_notification(&self) -> String {
        format!(
            "plugins: {} loaded, {} skipped",
            self.loaded_count(),
            self.error_count()
        )
    }

    pub fn error_notifications(&self) -> Vec<String> {
        let mut notes: Vec<String> = self
            .scan_error
            .iter()
            .map(|err| format!("plugins: scan failed: {err}"))
            .collect();

        notes.extend(self.outcomes.iter().filter_map(|outcome| {
            outcome
                .error()
                .map(|err| format!("plugin ({}): skipped: {err}", outcome.origin))
        }));
        notes
    }

    pub fn startup_notifications(&self) -> Vec<String> {
        if self.outcomes.is_empty() && self.scan_error.is_none() {
            return Vec::new();
        }

        let mut notices = vec![self.summary_notification()];
        notices.extend(self.error_notifications());
        notices
    }
}

/// Discovers, verifies and loads plugins, and owns the loaded set.
pub struct PluginManager {
    store: Box<dyn ManifestStore>,
    checker: Box<dyn IntegrityChecker>,
    units: Box<dyn UnitLoader>,
    catalog: HashMap<String, PluginManifest>,
    loaded: Vec<PluginRuntime>,
}

impl PluginManager {
    pub fn new(
        store: impl ManifestStore + 'static,
        checker: impl IntegrityChecker + 'static,
        units: impl UnitLoader + 'static,
    ) -> Self {
        Self {
            store: Box::new(store),
            checker: Box::new(checker),
            units: Box::new(units),
            catalog: HashMap::new(),
            loaded: Vec::new(),
        }
    }

    /// Manager reading the configured plugin directory with the configured checker.
    pub fn from_config(config: &AppConfig, units: impl UnitLoader + 'static) -> Self {
        let store = DirectoryStore::new(config.plugin_dir());
        match config.plugins.verification {
            VerificationMode::TrustAll => Self::new(store, TrustAll, units),
            VerificationMode::Sha256 => Self::new(
                store,
                DigestAllowlist::new(&config.plugins.trusted_digests),
                units,
            ),
        }
    }

    /// Process every discovered manifest in storage order.
    ///
    /// A dependency is satisfied only if it is already loaded when the dependent
    /// candidate is reached; nothing is retried or reordered. Failures are
    /// recorded per manifest and never stop the pass.
    pub fn load_all(&mut self, tree: &mut MenuTree, root: NodeId) -> LoadReport {
        let mut report = LoadReport::default();

        let origins = match self.store.scan() {
            Ok(origins) => origins,
            Err(err) => {
                tracing::warn!("plugin scan failed: {err:#}");
                report.scan_error = Some(format!("{err:#}"));
                return report;
            }
        };

        tracing::info!("loading plugins from {} manifests", origins.len());

        for origin in origins {
            if let Err(err) = self.load_manifest(&origin, tree, root, &mut report) {
                tracing::warn!("plugin manifest {origin}: {err}");
                report.outcomes.push(LoadOutcome {
                    origin,
                    status: LoadStatus::Skipped(err),
                });
            }
        }

        report
    }

    fn load_manifest(
        &mut self,
        origin: &str,
        tree: &mut MenuTree,
        root: NodeId,
        report: &mut LoadReport,
    ) -> Result<(), PluginLoadError> {
        let raw = self
            .store
            .read(origin)
            .map_err(|err| PluginLoadError::Unreadable(format!("{err:#}")))?;

        let mut manifest = PluginManifest::parse(&raw)?;
        manifest.verified = self.checker.verify(&manifest, &raw);

        let name = manifest.name.clone();
        let verified = manifest.verified;
        let unit = manifest.unit_id().to_string();
        let dependencies = manifest.dependencies.clone();
        self.catalog.insert(name.clone(), manifest);

        if !verified {
            return Err(PluginLoadError::VerificationFailed(name));
        }

        let candidates = self.units.load(&unit)?;
        if candidates.is_empty() {
            return Err(PluginLoadError::EmptyUnit(unit));
        }

        for candidate in candidates {
            let status = match candidate {
                Ok(plugin) => self.admit(plugin, &dependencies, tree, root),
                Err(source) => Err(PluginLoadError::Instantiation {
                    unit: unit.clone(),
                    source,
                }),
            };

            let status = match status {
                Ok(status) => status,
                Err(err) => {
                    if err.is_lifecycle() {
                        tracing::error!("plugin manifest {origin}: {err}");
                    } else {
                        tracing::warn!("plugin manifest {origin}: {err}");
                    }
                    LoadStatus::Skipped(err)
                }
            };

            report.outcomes.push(LoadOutcome {
                origin: origin.to_string(),
                status,
            });
        }

        Ok(())
    }

    fn admit(
        &mut self,
        plugin: Box<dyn Plugin>,
        dependencies: &[String],
        tree: &mut MenuTree,
        root: NodeId,
    ) -> Result<LoadStatus, PluginLoadError> {
        if let Some(missing) = dependencies.iter().find(|dep| !self.is_loaded(dep)) {
            return Err(PluginLoadError::UnmetDependency {
                plugin: plugin.name().to_string(),
                missing: missing.clone(),
            });
        }

        let runtime = PluginRuntime::start(plugin, tree, root)?;
        let status = LoadStatus::Loaded {
            name: runtime.name.clone(),
            version: runtime.plugin().version().to_string(),
        };

        tracing::info!("loaded plugin: {}", runtime.display_name());
        self.insert(runtime);
        Ok(status)
    }

    fn insert(&mut self, runtime: PluginRuntime) {
        match self.loaded.iter_mut().find(|r| r.name == runtime.name) {
            Some(slot) => {
                tracing::warn!("plugin {} loaded twice, replacing", runtime.name);
                if let Err(err) = slot.stop() {
                    tracing::error!("{err}");
                }
                *slot = runtime;
            }
            None => self.loaded.push(runtime),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Plugin> {
        self.loaded
            .iter()
            .find(|runtime| runtime.name == name)
            .map(PluginRuntime::plugin)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Loaded plugins in load order.
    pub fn list_loaded(&self) -> Vec<&dyn Plugin> {
        self.loaded.iter().map(PluginRuntime::plugin).collect()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Every manifest seen so far, verified or not, keyed by manifest name.
    pub fn catalog(&self) -> &HashMap<String, PluginManifest> {
        &self.catalog
    }

    pub fn manifest(&self, name: &str) -> Option<&PluginManifest> {
        self.catalog.get(name)
    }

    pub fn list_notifications(&self) -> Vec<String> {
        if self.catalog.is_empty() {
            return vec!["plugins: none discovered".to_string()];
        }

        let mut rows: Vec<String> = self
            .catalog
            .values()
            .map(|manifest| {
                let status = if self.is_loaded(&manifest.name) {
                    "loaded"
                } else if manifest.verified {
                    "not loaded"
                } else {
                    "unverified"
                };
                format!("plugin {manifest} [{status}]")
            })
            .collect();

        rows.sort();
        rows
    }

    /// Shut down every loaded plugin, then clear the set. Failures are logged and
    /// returned but never stop the remaining shutdowns.
    pub fn unload_all(&mut self) -> Vec<PluginLoadError> {
        let mut failures = Vec::new();

        for mut runtime in self.loaded.drain(..) {
            match runtime.stop() {
                Ok(()) => tracing::info!("shutdown plugin: {}", runtime.name),
                Err(err) => {
                    tracing::error!("{err}");
                    failures.push(err);
                }
            }
        }

        failures
    }
}

impl std::fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginManager")
            .field("catalog", &self.catalog.keys().collect::<Vec<_>>())
            .field("loaded", &self.loaded)
            .finish()
    }
}
