//! Project Descriptor
//!
//! Data model for the project's `package.json`, the source of the name,
//! version, and registry metadata consumed by manifests and the registry
//! descriptor.

use crate::{DescriptorError, DescriptorResult};
use serde::Deserialize;
use std::path::Path;

/// Parsed project descriptor (package.json)
///
/// An immutable snapshot: reloads replace the whole value, fields are never
/// mutated in place.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProjectDescriptor {
    /// Package name
    pub name: String,

    /// Package version, treated as an opaque string
    pub version: String,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// Author
    #[serde(default)]
    pub author: Option<String>,

    /// License identifier
    #[serde(default)]
    pub license: Option<String>,

    /// Repository, either a bare URL or an object with a `url` key
    #[serde(default)]
    pub repository: Option<RepositoryField>,
}

/// Repository field of a descriptor
///
/// `package.json` allows both `"repository": "https://..."` and
/// `"repository": { "type": "git", "url": "https://..." }`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RepositoryField {
    /// Bare URL string
    Url(String),
    /// Object form with an optional `url` key
    Detailed {
        #[serde(default)]
        url: Option<String>,
    },
}

impl ProjectDescriptor {
    /// Parse a descriptor from raw JSON
    pub fn parse(raw: &str, file: &Path) -> DescriptorResult<Self> {
        let descriptor: Self =
            serde_json::from_str(raw).map_err(|error| DescriptorError::ParseError {
                file: file.to_path_buf(),
                error,
            })?;

        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Validate the descriptor
    pub fn validate(&self) -> DescriptorResult<()> {
        if self.name.is_empty() {
            return Err(DescriptorError::ValidationError(
                "name cannot be empty".to_string(),
            ));
        }

        if self.version.is_empty() {
            return Err(DescriptorError::ValidationError(
                "version cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the repository URL, if any
    pub fn repository_url(&self) -> Option<&str> {
        match self.repository.as_ref()? {
            RepositoryField::Url(url) => Some(url),
            RepositoryField::Detailed { url } => url.as_deref(),
        }
    }
}
