//! README discovery
//!
//! The registry descriptor embeds the project's README verbatim when one
//! exists. Absence is not an error.

use std::fs;
use std::path::Path;

/// Conventional README file names, checked in order
pub const README_CANDIDATES: [&str; 3] = ["README", "README.txt", "README.md"];

/// Read the first README-like file in the project root, verbatim
pub fn find_readme(project_root: &Path) -> Option<String> {
    README_CANDIDATES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.exists())
        .and_then(|path| fs::read_to_string(path).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_readme_is_none() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(find_readme(temp_dir.path()), None);
    }

    #[test]
    fn test_reads_readme_md() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("README.md"), "# Demo\n").unwrap();

        assert_eq!(find_readme(temp_dir.path()).as_deref(), Some("# Demo\n"));
    }

    #[test]
    fn test_bare_readme_wins_over_readme_md() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("README"), "plain").unwrap();
        fs::write(temp_dir.path().join("README.md"), "markdown").unwrap();

        assert_eq!(find_readme(temp_dir.path()).as_deref(), Some("plain"));
    }
}
