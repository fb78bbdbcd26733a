//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep methods. Animation ticks
//! come from `tokio::time::interval`, bus events are awaited.
//! **Exceptions**: Frame rate limiting (TUI `app.rs` only), test code

use std::path::Path;

use architectural_enforcement::{production_lines_of, rust_files, SourceLine};

/// Test that production code does not contain sleep() calls
#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = Vec::new();
    check_directory("stepper/core/src", false, &mut violations);
    check_directory("tui/src", true, &mut violations);

    if !violations.is_empty() {
        eprintln!("\n❌ Sleep calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        eprintln!("\n✅ ACCEPTABLE sleep uses:");
        eprintln!("  - Frame tick in the TUI event loop");
        eprintln!("  - Test code (#[cfg(test)] modules, tests/ directories)");
        eprintln!("  - Periodic tasks use tokio::time::interval() instead");

        panic!(
            "\nFound {} sleep violation(s) in production code.",
            violations.len()
        );
    }
}

fn check_directory(dir: &str, allow_frame_limiting: bool, violations: &mut Vec<String>) {
    for path in rust_files(dir) {
        let lines = production_lines_of(&path);
        for (idx, line) in lines.iter().enumerate() {
            if !is_sleep_call(&line.code) {
                continue;
            }

            if allow_frame_limiting
                && path.ends_with(Path::new("tui/src/app.rs"))
                && is_frame_limiting_context(&lines, idx)
            {
                continue;
            }

            violations.push(format!(
                "{}:{} - {}",
                path.display(),
                line.number,
                line.code.trim()
            ));
        }
    }
}

fn is_sleep_call(code: &str) -> bool {
    code.contains("::sleep(") || code.contains(".sleep(")
}

/// Check if sleep is used for frame rate limiting (acceptable in TUI)
fn is_frame_limiting_context(lines: &[SourceLine], current_idx: usize) -> bool {
    let context_range = current_idx.saturating_sub(5)..(current_idx + 2).min(lines.len());

    lines[context_range].iter().any(|line| {
        let code = line.code.to_lowercase();
        code.contains("frame") || code.contains("fps")
    })
}

#[test]
fn test_sleep_detection() {
    assert!(is_sleep_call("    tokio::time::sleep(Duration::from_millis(10)).await;"));
    assert!(is_sleep_call("std::thread::sleep(d);"));
    assert!(!is_sleep_call("let mut interval = time::interval(period);"));
}

#[test]
fn test_frame_limiting_detection() {
    let lines: Vec<SourceLine> = [
        "tokio::select! {",
        "    () = tokio::time::sleep(FRAME_DURATION) => {}",
        "}",
    ]
    .iter()
    .enumerate()
    .map(|(idx, code)| SourceLine {
        number: idx + 1,
        code: (*code).to_string(),
    })
    .collect();

    assert!(is_frame_limiting_context(&lines, 1));
}
