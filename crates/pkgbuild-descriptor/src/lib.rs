//! Project Descriptor Management
//!
//! Loads and caches the project's descriptor (`package.json`) and detects
//! content changes across incremental (watch) builds:
//! - Descriptor data model (name, version, registry metadata)
//! - Cached raw + parsed snapshots with cheap byte-equality change detection
//! - Per-version output directory provisioning on version change
//!
//! # Example
//!
//! ```no_run
//! use pkgbuild_descriptor::DescriptorStore;
//! use std::path::Path;
//!
//! let mut store = DescriptorStore::load(Path::new("."), Path::new("dist")).unwrap();
//! let outcome = store.refresh_if_changed().unwrap();
//! ```

pub mod descriptor;
pub mod store;

use std::path::PathBuf;
use thiserror::Error;

/// Descriptor errors
#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Project descriptor not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read project descriptor: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid JSON in {file}: {error}")]
    ParseError {
        file: PathBuf,
        error: serde_json::Error,
    },

    #[error("Invalid descriptor: {0}")]
    ValidationError(String),

    #[error("Failed to create output directory {path}: {error}")]
    OutputDirError {
        path: PathBuf,
        error: std::io::Error,
    },
}

/// Result type for descriptor operations
pub type DescriptorResult<T> = Result<T, DescriptorError>;

// Re-export main types
pub use descriptor::{ProjectDescriptor, RepositoryField};
pub use store::{DescriptorStore, RefreshOutcome};
