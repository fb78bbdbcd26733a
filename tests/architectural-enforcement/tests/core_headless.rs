//! Integration Test: Headless Core
//!
//! **Policy**: `stepper-core` MUST NOT depend on or import any terminal/UI
//! crate. Surfaces depend on the core, never the other way around.

use std::fs;

use architectural_enforcement::{production_lines_of, rust_files, workspace_root};

/// Crates that belong to a surface, not the core
const UI_CRATES: &[&str] = &["ratatui", "crossterm", "termion", "cursive"];

#[test]
fn test_core_manifest_has_no_ui_dependencies() {
    let manifest = workspace_root().join("stepper/core/Cargo.toml");
    let content = fs::read_to_string(&manifest).expect("read core manifest");

    let violations: Vec<&str> = content
        .lines()
        .filter(|line| {
            let name = line.split('=').next().unwrap_or("").trim();
            UI_CRATES.contains(&name)
        })
        .collect();

    assert!(
        violations.is_empty(),
        "stepper-core must stay headless, found: {violations:?}"
    );
}

#[test]
fn test_core_sources_import_no_ui_crates() {
    let mut violations = Vec::new();

    for path in rust_files("stepper/core/src") {
        for line in production_lines_of(&path) {
            for krate in UI_CRATES {
                if line.code.contains(&format!("{krate}::")) {
                    violations.push(format!(
                        "{}:{} - {}",
                        path.display(),
                        line.number,
                        line.code.trim()
                    ));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "UI crates used in stepper-core:\n  {}",
        violations.join("\n  ")
    );
}
