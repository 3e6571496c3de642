use serde::Deserialize;

use crate::plugin::error::PluginLoadError;

/// Plugin identity as declared on disk.
///
/// `verified` is never read from the file; the manager sets it after the
/// integrity check.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    /// Names that must already be loaded, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Loadable unit identifier. Defaults to the plugin name.
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(skip)]
    pub verified: bool,
}

impl PluginManifest {
    /// Parse a manifest body. Only `name` is validated.
    pub fn parse(raw: &str) -> Result<Self, PluginLoadError> {
        let manifest = toml::from_str::<PluginManifest>(raw)
            .map_err(|err| PluginLoadError::InvalidManifest(err.to_string()))?;

        if manifest.name.trim().is_empty() {
            return Err(PluginLoadError::InvalidManifest(
                "missing plugin name".to_string(),
            ));
        }

        Ok(manifest)
    }

    pub fn unit_id(&self) -> &str {
        self.unit.as_deref().unwrap_or(&self.name)
    }
}

impl std::fmt::Display for PluginManifest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{} by {}", self.name, self.version, self.author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_manifest_parses() {
        let manifest = PluginManifest::parse(
            r#"
name = "ExtendedPlugin"
version = "2.1.0"
author = "Dev Team"
description = "Advanced tools"
dependencies = ["SamplePlugin"]
verified = true
"#,
        )
        .unwrap();

        assert_eq!(manifest.name, "ExtendedPlugin");
        assert_eq!(manifest.dependencies, vec!["SamplePlugin".to_string()]);
        assert_eq!(manifest.unit_id(), "ExtendedPlugin");
        assert!(!manifest.verified, "verified must not be trusted from disk");
        assert_eq!(manifest.to_string(), "ExtendedPlugin v2.1.0 by Dev Team");
    }

    #[test]
    fn only_name_is_required() {
        let manifest = PluginManifest::parse("name = \"Bare\"\nunit = \"bare-unit\"").unwrap();

        assert!(manifest.dependencies.is_empty());
        assert!(manifest.version.is_empty());
        assert_eq!(manifest.unit_id(), "bare-unit");
    }

    #[test]
    fn missing_or_blank_name_is_invalid() {
        for raw in ["version = \"1.0\"", "name = \"   \"", "name = [1, 2]", "not toml at all"] {
            let err = PluginManifest::parse(raw).unwrap_err();
            assert!(
                matches!(err, PluginLoadError::InvalidManifest(_)),
                "{raw:?} gave {err}"
            );
        }
    }
}
