//! Registry descriptor
//!
//! Distribution-facing summary of the latest build, written to
//! `dist/pkg.json` and consumed by an external package store. Unlike the
//! version ledger this is a deliberate overwrite-in-place singleton: it
//! always reflects only the most recent build.

use crate::error::{BuildError, BuildResult};
use chrono::Utc;
use pkgbuild_descriptor::ProjectDescriptor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Registry descriptor file name, relative to the output directory root
pub const REGISTRY_FILE: &str = "pkg.json";

/// Registry entry type for bundled programs
const PROGRAM_TYPE: &str = "program";

/// Latest-build summary for the package registry
///
/// Every textual field is always present, defaulting to `""` when the
/// project descriptor omits it, so the registry sees a stable schema.
/// `long_desc` is the one exception: the key is absent entirely when the
/// project has no README.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryDescriptor {
    /// Version of the most recent build
    pub latest_version: String,

    /// Wall-clock time of the most recent build, milliseconds since epoch
    pub latest_timestamp: i64,

    /// Registry entry type, always `"program"`
    #[serde(rename = "type")]
    pub kind: String,

    /// Short description
    pub description: String,

    /// Author
    pub author: String,

    /// License identifier
    pub license: String,

    /// Repository URL
    pub repo_url: String,

    /// Homepage URL supplied at orchestrator construction
    pub homepage_url: String,

    /// Verbatim README contents, absent when no README exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_desc: Option<String>,
}

/// Builds and writes the registry descriptor singleton
pub struct RegistryDescriptorBuilder {
    dist_dir: PathBuf,
    homepage_url: String,
    readme: Option<String>,
}

impl RegistryDescriptorBuilder {
    /// Create a builder
    ///
    /// `readme` is the project's README content, read once up front; it is
    /// embedded verbatim into every descriptor this builder produces.
    pub fn new(dist_dir: &Path, homepage_url: impl Into<String>, readme: Option<String>) -> Self {
        Self {
            dist_dir: dist_dir.to_path_buf(),
            homepage_url: homepage_url.into(),
            readme,
        }
    }

    /// Build a registry descriptor from the current project snapshot
    pub fn build(&self, descriptor: &ProjectDescriptor) -> RegistryDescriptor {
        RegistryDescriptor {
            latest_version: descriptor.version.clone(),
            latest_timestamp: Utc::now().timestamp_millis(),
            kind: PROGRAM_TYPE.to_string(),
            description: descriptor.description.clone().unwrap_or_default(),
            author: descriptor.author.clone().unwrap_or_default(),
            license: descriptor.license.clone().unwrap_or_default(),
            repo_url: descriptor.repository_url().unwrap_or_default().to_string(),
            homepage_url: self.homepage_url.clone(),
            long_desc: self.readme.clone(),
        }
    }

    /// Write the descriptor to `dist/pkg.json`, pretty-printed
    pub fn write(&self, registry: &RegistryDescriptor) -> BuildResult<PathBuf> {
        let path = self.registry_path();
        let json = serde_json::to_string_pretty(registry)
            .map_err(|e| BuildError::serialize(REGISTRY_FILE, e))?;
        fs::write(&path, json).map_err(|e| BuildError::io(&path, e))?;

        info!(version = %registry.latest_version, "wrote pkg.json");
        Ok(path)
    }

    /// Path of the registry descriptor artifact
    pub fn registry_path(&self) -> PathBuf {
        self.dist_dir.join(REGISTRY_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn descriptor(raw: &str) -> ProjectDescriptor {
        ProjectDescriptor::parse(raw, Path::new("package.json")).unwrap()
    }

    #[test]
    fn test_missing_optionals_default_to_empty_strings() {
        let temp_dir = TempDir::new().unwrap();
        let builder = RegistryDescriptorBuilder::new(temp_dir.path(), "https://x", None);

        let registry = builder.build(&descriptor(r#"{"name": "demo", "version": "1.0.0"}"#));

        assert_eq!(registry.latest_version, "1.0.0");
        assert_eq!(registry.kind, "program");
        assert_eq!(registry.description, "");
        assert_eq!(registry.author, "");
        assert_eq!(registry.license, "");
        assert_eq!(registry.repo_url, "");
        assert_eq!(registry.homepage_url, "https://x");
        assert!(registry.long_desc.is_none());
    }

    #[test]
    fn test_fields_come_from_descriptor_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let builder = RegistryDescriptorBuilder::new(temp_dir.path(), "https://x", None);

        let registry = builder.build(&descriptor(
            r#"{
                "name": "demo",
                "version": "2.0.0",
                "description": "a demo",
                "author": "Ollie",
                "license": "MIT",
                "repository": {"url": "https://repo"}
            }"#,
        ));

        assert_eq!(registry.latest_version, "2.0.0");
        assert_eq!(registry.description, "a demo");
        assert_eq!(registry.author, "Ollie");
        assert_eq!(registry.license, "MIT");
        assert_eq!(registry.repo_url, "https://repo");
    }

    #[test]
    fn test_long_desc_embedded_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let readme = "# Demo\n\nline two, unmodified \t bytes\n";
        let builder =
            RegistryDescriptorBuilder::new(temp_dir.path(), "https://x", Some(readme.to_string()));

        let registry = builder.build(&descriptor(r#"{"name": "demo", "version": "1.0.0"}"#));

        assert_eq!(registry.long_desc.as_deref(), Some(readme));
    }

    #[test]
    fn test_written_artifact_omits_long_desc_key_without_readme() {
        let temp_dir = TempDir::new().unwrap();
        let builder = RegistryDescriptorBuilder::new(temp_dir.path(), "https://x", None);
        let registry = builder.build(&descriptor(r#"{"name": "demo", "version": "1.0.0"}"#));

        let path = builder.write(&registry).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert!(value.get("long_desc").is_none());
        assert_eq!(value["type"], "program");
        assert_eq!(value["latest_version"], "1.0.0");
    }

    #[test]
    fn test_write_overwrites_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let builder = RegistryDescriptorBuilder::new(temp_dir.path(), "https://x", None);

        let first = builder.build(&descriptor(r#"{"name": "demo", "version": "1.0.0"}"#));
        builder.write(&first).unwrap();
        let second = builder.build(&descriptor(r#"{"name": "demo", "version": "2.0.0"}"#));
        builder.write(&second).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(builder.registry_path()).unwrap()).unwrap();
        assert_eq!(value["latest_version"], "2.0.0");
    }
}
