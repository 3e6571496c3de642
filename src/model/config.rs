use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub shell: ShellConfig,
    pub plugins: PluginsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    pub plugin_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    /// Reserved input that pops the back-stack.
    pub back_token: String,
    pub prompt: String,
    #[serde(default)]
    pub color: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            back_token: "EXIT".to_string(),
            prompt: "Selection: ".to_string(),
            color: false,
        }
    }
}

impl ShellConfig {
    /// Colour is only kept when the shell writes to a terminal.
    pub fn for_output(mut self, is_terminal: bool) -> Self {
        self.color &= is_terminal;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMode {
    #[default]
    TrustAll,
    Sha256,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PluginsConfig {
    pub enabled: bool,
    #[serde(default)]
    pub verification: VerificationMode,
    #[serde(default)]
    pub trusted_digests: Vec<String>,
}

impl AppConfig {
    /// Load configuration with layering: defaults → user config.
    pub fn load() -> Result<Self> {
        let mut config = Self::defaults()?;

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "bootmenu") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                config = Self::from_file(&config_path)?;
            }
        }

        config.expand_paths()?;
        Ok(config)
    }

    pub fn defaults() -> Result<Self> {
        let defaults = include_str!("../../config/default.toml");
        Ok(toml::from_str(defaults)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|err| anyhow!("{}: {err}", path.display()))
    }

    pub fn plugin_dir(&self) -> PathBuf {
        PathBuf::from(&self.general.plugin_dir)
    }

    fn expand_paths(&mut self) -> Result<()> {
        if self.general.plugin_dir.starts_with('~') {
            let home = dirs_home().ok_or_else(|| anyhow!("cannot determine home directory"))?;
            self.general.plugin_dir =
                self.general
                    .plugin_dir
                    .replacen('~', &home.to_string_lossy(), 1);
        }
        Ok(())
    }
}

fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}
