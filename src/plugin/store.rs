use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ignore::WalkBuilder;

const MANIFEST_EXTENSION: &str = "toml";

/// Source of raw manifest bodies.
///
/// `scan` yields origins in whatever order the storage produces; callers must
/// not assume it is sorted.
pub trait ManifestStore {
    fn scan(&self) -> Result<Vec<String>>;

    fn read(&self, origin: &str) -> Result<String>;
}

/// Top-level `*.toml` files in a plugin directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ManifestStore for DirectoryStore {
    fn scan(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            tracing::info!(
                "plugin directory {} does not exist, creating",
                self.root.display()
            );
            fs::create_dir_all(&self.root)
                .with_context(|| format!("creating {}", self.root.display()))?;
        }

        let origins = WalkBuilder::new(&self.root)
            .max_depth(Some(1))
            .hidden(false)
            .standard_filters(false)
            .build()
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if path == self.root {
                    return None;
                }

                let is_file = entry.file_type().map(|kind| kind.is_file()).unwrap_or(false);
                let is_manifest = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION))
                    .unwrap_or(false);

                (is_file && is_manifest).then(|| path.display().to_string())
            })
            .collect();

        Ok(origins)
    }

    fn read(&self, origin: &str) -> Result<String> {
        fs::read_to_string(origin).with_context(|| format!("reading {origin}"))
    }
}

/// Manifests held in memory, yielded in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<(String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, origin: impl Into<String>, body: impl Into<String>) -> Self {
        self.push(origin, body);
        self
    }

    pub fn push(&mut self, origin: impl Into<String>, body: impl Into<String>) {
        self.entries.push((origin.into(), body.into()));
    }
}

impl ManifestStore for MemoryStore {
    fn scan(&self) -> Result<Vec<String>> {
        Ok(self.entries.iter().map(|(origin, _)| origin.clone()).collect())
    }

    fn read(&self, origin: &str) -> Result<String> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == origin)
            .map(|(_, body)| body.clone())
            .with_context(|| format!("no manifest at {origin}"))
    }
}
