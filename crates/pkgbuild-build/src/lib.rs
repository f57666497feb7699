//! Build metadata and versioning for bundler-driven builds
//!
//! Augments an external bundler with persistent build metadata:
//! - Append-only history of every version ever built (`dist/versions.txt`)
//! - Per-version output manifests (`dist/<version>/meta.json`)
//! - A registry descriptor summarizing the latest build (`dist/pkg.json`)
//! - Lifecycle orchestration tying the above to the bundler's compile /
//!   done / after-emit events, including descriptor change detection in
//!   watch mode
//!
//! The bundler itself is an external collaborator: it fires lifecycle
//! events and supplies an asset report; this crate never compiles anything.

pub mod bundler;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod manifest;
pub mod orchestrator;
pub mod readme;
pub mod registry;

// Re-export main types
pub use bundler::{BundlerConfig, BUILTIN_EXTERNALS};
pub use error::{BuildError, BuildResult};
pub use ledger::{LedgerUpdate, VersionLedger};
pub use lifecycle::{AssetReport, BuildEvent, BuildPhase, SessionState};
pub use manifest::{Manifest, ManifestBuilder};
pub use orchestrator::{BuildOptions, BuildOrchestrator};
pub use registry::{RegistryDescriptor, RegistryDescriptorBuilder};

// Re-export descriptor types for convenience
pub use pkgbuild_descriptor::{DescriptorStore, ProjectDescriptor, RefreshOutcome};
