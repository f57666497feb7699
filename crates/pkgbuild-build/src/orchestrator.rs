//! Build lifecycle orchestration
//!
//! Wires the descriptor store, version ledger, manifest builder, and
//! registry descriptor builder to the external bundler's lifecycle events.
//! The orchestrator holds explicit references to each component and passes
//! data as arguments; there is no ambient shared state. Events must arrive
//! in bundler order (compile, done, afterEmit); out-of-order events are an
//! error, never silently re-ordered.

use crate::bundler::BundlerConfig;
use crate::error::{BuildError, BuildResult};
use crate::ledger::VersionLedger;
use crate::lifecycle::{AssetReport, BuildEvent, BuildPhase, SessionState};
use crate::manifest::ManifestBuilder;
use crate::readme::find_readme;
use crate::registry::RegistryDescriptorBuilder;
use pkgbuild_descriptor::{DescriptorStore, ProjectDescriptor};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output directory name, relative to the project root
pub const DIST_DIR: &str = "dist";

/// Orchestrator construction options
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Project root (holds package.json and the optional README)
    pub project_root: PathBuf,

    /// Homepage URL published in the registry descriptor
    pub homepage_url: String,

    /// Dependencies as `name@version` strings, recorded in each manifest
    pub dependencies: Vec<String>,
}

impl BuildOptions {
    /// Create options for a project root and homepage URL
    pub fn new(project_root: impl Into<PathBuf>, homepage_url: impl Into<String>) -> Self {
        Self {
            project_root: project_root.into(),
            homepage_url: homepage_url.into(),
            dependencies: Vec::new(),
        }
    }

    /// Set the dependency list
    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }
}

/// Subscribes build-metadata components to the bundler lifecycle
///
/// One orchestrator per build session. Watch mode drives the session
/// through repeated compile/done/afterEmit cycles; every handler is safe to
/// invoke once per cycle, including for rebuilds of an unchanged version.
pub struct BuildOrchestrator {
    store: DescriptorStore,
    ledger: VersionLedger,
    manifests: ManifestBuilder,
    registry: RegistryDescriptorBuilder,
    dependencies: Vec<String>,
    state: SessionState,
}

impl BuildOrchestrator {
    /// Create an orchestrator for one build session
    ///
    /// Loads the descriptor (fatal if missing or malformed), reads the
    /// README once, creates `dist/` and the current version's output
    /// directory.
    pub fn new(options: BuildOptions) -> BuildResult<Self> {
        let dist_dir = options.project_root.join(DIST_DIR);
        fs::create_dir_all(&dist_dir).map_err(|e| BuildError::io(&dist_dir, e))?;

        let store = DescriptorStore::load(&options.project_root, &dist_dir)?;
        store.ensure_version_dir()?;

        // README is cached for the whole session, not re-read per build
        let readme = find_readme(&options.project_root);

        info!(name = %store.name(), version = %store.version(), "building");

        Ok(Self {
            ledger: VersionLedger::new(&dist_dir),
            manifests: ManifestBuilder::new(&dist_dir),
            registry: RegistryDescriptorBuilder::new(&dist_dir, options.homepage_url, readme),
            store,
            dependencies: options.dependencies,
            state: SessionState::Idle,
        })
    }

    /// Handle one lifecycle event from the bundler
    pub fn handle(&mut self, event: BuildEvent) -> BuildResult<()> {
        match event {
            BuildEvent::Compile => self.on_compile(),
            BuildEvent::Done(report) => self.on_done(&report),
            BuildEvent::AfterEmit => self.on_after_emit(),
        }
    }

    /// Compile: refresh the descriptor snapshot if its bytes changed
    fn on_compile(&mut self) -> BuildResult<()> {
        // Watch mode fires compile repeatedly, including back-to-back
        // without an intervening emit; only a half-finished build cycle
        // (done without afterEmit) is out of order.
        if self.state == SessionState::Built {
            return Err(self.out_of_order(BuildPhase::Compile));
        }

        self.store.refresh_if_changed()?;
        self.state = SessionState::Compiling;
        Ok(())
    }

    /// Done: record the version and write this build's manifest
    fn on_done(&mut self, report: &AssetReport) -> BuildResult<()> {
        if self.state != SessionState::Compiling {
            return Err(self.out_of_order(BuildPhase::Done));
        }

        self.ledger.record(self.store.version())?;

        let manifest = self
            .manifests
            .build(report, &self.dependencies, self.store.version());
        self.manifests.write(&manifest)?;

        self.state = SessionState::Built;
        Ok(())
    }

    /// AfterEmit: publish the latest-build registry descriptor
    fn on_after_emit(&mut self) -> BuildResult<()> {
        if self.state != SessionState::Built {
            return Err(self.out_of_order(BuildPhase::AfterEmit));
        }

        let registry = self.registry.build(self.store.descriptor());
        self.registry.write(&registry)?;

        self.state = SessionState::Emitted;
        Ok(())
    }

    fn out_of_order(&self, got: BuildPhase) -> BuildError {
        BuildError::OutOfOrder {
            got,
            state: self.state.to_string(),
        }
    }

    /// Produce the configuration shape for the external bundler
    pub fn bundler_config(&self) -> BundlerConfig {
        BundlerConfig::new(
            self.store.name(),
            self.store.version(),
            self.store.dist_dir(),
            self.store.descriptor_path(),
        )
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current descriptor snapshot
    pub fn descriptor(&self) -> &ProjectDescriptor {
        self.store.descriptor()
    }

    /// Output directory root
    pub fn dist_dir(&self) -> &Path {
        self.store.dist_dir()
    }
}
