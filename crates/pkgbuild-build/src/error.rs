/// Build metadata error types
use crate::lifecycle::BuildPhase;
use pkgbuild_descriptor::DescriptorError;
use std::path::PathBuf;
use thiserror::Error;

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("I/O error at {path}: {error}")]
    IoError {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize {artifact}: {error}")]
    SerializeError {
        artifact: String,
        error: serde_json::Error,
    },

    #[error("Lifecycle event out of order: got {got} while {state}")]
    OutOfOrder { got: BuildPhase, state: String },
}

impl BuildError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            error,
        }
    }

    /// Create a serialization error for a named artifact
    pub fn serialize(artifact: impl Into<String>, error: serde_json::Error) -> Self {
        Self::SerializeError {
            artifact: artifact.into(),
            error,
        }
    }
}
