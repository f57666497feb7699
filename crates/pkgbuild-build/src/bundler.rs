//! Bundler configuration shape
//!
//! Input the external bundler collaborator consumes: entry points, external
//! module mappings, output filename templates, and the descriptor path to
//! watch. This crate only produces the shape; interpreting it is entirely
//! the bundler's concern. `[name]` in the filename templates is the
//! bundler's own chunk-name placeholder and is passed through literally.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Platform modules every program links against externally
pub const BUILTIN_EXTERNALS: [&str; 10] = [
    "ollieos",
    "howler",
    "html-to-text",
    "sixel",
    "sweetalert2",
    "@xterm/xterm",
    "@xterm/addon-fit",
    "@xterm/addon-web-links",
    "@xterm/addon-image",
    "@xterm/link-provider",
];

/// Configuration handed to the external bundler
#[derive(Debug, Clone, PartialEq)]
pub struct BundlerConfig {
    /// Entry chunks: program name to entry-point path
    pub entries: BTreeMap<String, PathBuf>,

    /// External modules: module name to external name
    pub externals: BTreeMap<String, String>,

    /// Output directory root (dist/)
    pub output_dir: PathBuf,

    /// Output filename template, version-keyed
    pub output_filename: String,

    /// Source map filename template (maps live outside dist/)
    pub source_map_filename: String,

    /// Extensions the bundler resolves, in priority order
    pub resolve_extensions: Vec<String>,

    /// Extra paths the bundler watches beyond the source tree
    pub watch_paths: Vec<PathBuf>,

    /// Chunk limit per entry
    pub max_chunks: usize,

    /// Emit hidden source maps (no reference comment in the artifact)
    pub hidden_source_maps: bool,

    /// Emit module-format output
    pub module_output: bool,
}

impl BundlerConfig {
    /// Create a config for one package name/version pair
    ///
    /// Externals start pre-populated with [`BUILTIN_EXTERNALS`]; the
    /// descriptor path is registered as an extra watch path so watch
    /// rebuilds pick up version changes.
    pub fn new(name: &str, version: &str, dist_dir: &Path, descriptor_path: &Path) -> Self {
        let externals = BUILTIN_EXTERNALS
            .iter()
            .map(|module| (module.to_string(), module.to_string()))
            .collect();

        Self {
            entries: BTreeMap::new(),
            externals,
            output_dir: dist_dir.to_path_buf(),
            output_filename: format!("./{version}/{name}-[name]-{version}.js"),
            source_map_filename: format!("../maps/{name}-[name]-{version}.js.map"),
            resolve_extensions: vec![".ts".to_string(), ".js".to_string()],
            watch_paths: vec![descriptor_path.to_path_buf()],
            max_chunks: 1,
            hidden_source_maps: true,
            module_output: true,
        }
    }

    /// Add an entry chunk
    pub fn with_entry(mut self, name: impl Into<String>, entry: impl Into<PathBuf>) -> Self {
        self.entries.insert(name.into(), entry.into());
        self
    }

    /// Add an external module mapping
    ///
    /// Built-in platform externals cannot be remapped; they keep their
    /// canonical names.
    pub fn with_external(mut self, module: impl Into<String>, external: impl Into<String>) -> Self {
        let module = module.into();
        if !BUILTIN_EXTERNALS.contains(&module.as_str()) {
            self.externals.insert(module, external.into());
        }
        self
    }
}
