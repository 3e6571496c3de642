use thiserror::Error;

/// Which plugin callback failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStage {
    Initialize,
    RegisterCommands,
    Shutdown,
}

impl std::fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LifecycleStage::Initialize => "initialize",
            LifecycleStage::RegisterCommands => "register_commands",
            LifecycleStage::Shutdown => "shutdown",
        })
    }
}

/// Why a manifest or a plugin candidate was skipped. None of these escape
/// `PluginManager::load_all`; they are recorded in the load report instead.
#[derive(Debug, Error)]
pub enum PluginLoadError {
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("manifest unreadable: {0}")]
    Unreadable(String),

    #[error("plugin '{0}' failed verification")]
    VerificationFailed(String),

    #[error("plugin unit '{0}' not found")]
    UnitNotFound(String),

    #[error("plugin unit '{0}' provided no plugins")]
    EmptyUnit(String),

    #[error("plugin '{plugin}' has unmet dependency '{missing}'")]
    UnmetDependency { plugin: String, missing: String },

    #[error("failed to instantiate plugin from unit '{unit}': {source}")]
    Instantiation {
        unit: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("plugin '{plugin}' failed during {stage}: {source}")]
    Lifecycle {
        plugin: String,
        stage: LifecycleStage,
        #[source]
        source: anyhow::Error,
    },
}

impl PluginLoadError {
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, PluginLoadError::Lifecycle { .. })
    }
}
