//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The core stays headless (no terminal crates)
//! - No sleep() calls in production code outside the TUI frame tick
//!
//! The helpers here locate the workspace and hand the tests the production
//! lines of each source file, with test modules cut off.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this package
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

/// Every `.rs` file under `dir` (relative to the workspace root)
///
/// Panics if the directory doesn't exist, so a moved crate can't make a
/// check pass by scanning nothing.
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let path = workspace_root().join(dir);
    assert!(path.is_dir(), "expected source directory {}", path.display());

    walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect()
}

/// A production source line
#[derive(Debug, Clone)]
pub struct SourceLine {
    /// 1-based line number
    pub number: usize,
    /// Code with any trailing `//` comment removed
    pub code: String,
}

/// Production lines of `content`: comments stripped, everything from the
/// first `#[cfg(test)]` on dropped
pub fn production_lines(content: &str) -> Vec<SourceLine> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .map(|(idx, line)| SourceLine {
            number: idx + 1,
            code: line.split("//").next().unwrap_or(line).to_string(),
        })
        .collect()
}

/// Read `path` and return its production lines (empty if unreadable)
pub fn production_lines_of(path: &Path) -> Vec<SourceLine> {
    match fs::read_to_string(path) {
        Ok(content) => production_lines(&content),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_tests() {
        let code = "fn a() {}\n// note\nfn b() {} // trailing\n#[cfg(test)]\nmod tests {}";
        let lines = production_lines(code);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].code, "");
        assert_eq!(lines[2].code.trim(), "fn b() {}");
        assert_eq!(lines[2].number, 3);
    }

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }
}
