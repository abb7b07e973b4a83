//! Purpose: Keep code lines within rustfmt's default width.
//!
//! Non-scope: Lines holding string literals are skipped, since rustfmt leaves
//! long literals in place.

mod common;

use common::{find_workspace_root, rust_files};
use std::fs;

const MAX_WIDTH: usize = 100;

/// Lines wider than `MAX_WIDTH` that rustfmt would have wrapped, numbered from 1.
fn overlong_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.chars().count() > MAX_WIDTH && !line.contains('"'))
        .map(|(i, line)| (i + 1, line))
        .collect()
}

#[test]
fn test_code_lines_fit_rustfmt_width() {
    let crates_dir = find_workspace_root().join("crates");
    let mut violations = Vec::new();

    for path in rust_files(&crates_dir) {
        let content = fs::read_to_string(&path).unwrap_or_default();
        for (number, line) in overlong_lines(&content) {
            violations.push(format!("{}:{}: {}", path.display(), number, line.trim()));
        }
    }

    assert!(
        violations.is_empty(),
        "Found lines wider than {} columns:\n{}",
        MAX_WIDTH,
        violations.join("\n")
    );
}

#[test]
fn test_overlong_lines_skip_string_literals() {
    let wide_code = format!("let x = {};", "a".repeat(MAX_WIDTH));
    let wide_literal = format!("let x = \"{}\";", "a".repeat(MAX_WIDTH));
    let content = format!("fn f() {{}}\n{}\n{}\n", wide_code, wide_literal);
    let lines = overlong_lines(&content);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0, 2);
}
