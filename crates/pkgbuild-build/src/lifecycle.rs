/// Bundler lifecycle model and the asset report input shape
use serde::{Deserialize, Serialize};

/// Named point in the external bundler's build process
///
/// Within one build the bundler fires `Compile`, then `Done`, then
/// `AfterEmit`, in that order. Watch mode repeats the whole cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildPhase {
    /// Compilation is starting (fires again on every watch rebuild)
    Compile,
    /// The build finished and the asset report is available
    Done,
    /// All assets have been written to the output directory
    AfterEmit,
}

impl std::fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compile => write!(f, "compile"),
            Self::Done => write!(f, "done"),
            Self::AfterEmit => write!(f, "afterEmit"),
        }
    }
}

/// Lifecycle event fired by the bundler, with its payload
#[derive(Debug, Clone)]
pub enum BuildEvent {
    /// Compilation is starting
    Compile,
    /// Build completed; carries the bundler's emitted-asset report
    Done(AssetReport),
    /// Final asset emission finished
    AfterEmit,
}

impl BuildEvent {
    /// The phase this event belongs to
    pub fn phase(&self) -> BuildPhase {
        match self {
            Self::Compile => BuildPhase::Compile,
            Self::Done(_) => BuildPhase::Done,
            Self::AfterEmit => BuildPhase::AfterEmit,
        }
    }
}

/// Orchestrator state over one build session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No event seen yet
    Idle,
    /// Compile seen, build in progress
    Compiling,
    /// Done seen, artifacts recorded
    Built,
    /// AfterEmit seen, registry descriptor written
    Emitted,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Compiling => write!(f, "compiling"),
            Self::Built => write!(f, "built"),
            Self::Emitted => write!(f, "emitted"),
        }
    }
}

/// Emitted-asset report supplied by the bundler on `Done`
///
/// Maps each entry chunk to the output filenames it produced, in declared
/// entry order. One chunk may emit several files (script plus source map).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetReport {
    /// Per-chunk emitted filenames
    pub chunks: Vec<ChunkAssets>,
}

/// Output filenames emitted for one entry chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkAssets {
    /// Chunk (entry) name
    pub name: String,
    /// Emitted filenames, possibly directory-qualified
    pub files: Vec<String>,
}

impl AssetReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chunk and its emitted files
    pub fn with_chunk(
        mut self,
        name: impl Into<String>,
        files: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.chunks.push(ChunkAssets {
            name: name.into(),
            files: files.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// All emitted filenames, flattened across chunks in declared order
    pub fn all_files(&self) -> impl Iterator<Item = &str> {
        self.chunks
            .iter()
            .flat_map(|chunk| chunk.files.iter().map(String::as_str))
    }
}
