#![forbid(unsafe_code)]

//! Visual test machinery for tuido.
//!
//! - **Frame capture**: converts rendered [`Buffer`]s to plain text so
//!   scenarios and tests can assert on what the user would see.
//! - **Scenario runner**: sequential execution of named behavioral scenarios
//!   with per-scenario isolation and structured results.

pub mod scenario;

pub use scenario::{
    RunReport, Scenario, ScenarioCategory, ScenarioContext, ScenarioResult, ScenarioRunner,
    ScenarioStatus,
};

use std::fmt::Write as FmtWrite;

use tuido_render::Buffer;

// ============================================================================
// Buffer → Text Conversion
// ============================================================================

/// Convert a [`Buffer`] to a plain text string.
///
/// Each row becomes one line. Empty cells become spaces. Continuation cells
/// (trailing cells of wide characters) are skipped so wide characters occupy
/// their natural display width in the output string.
#[must_use]
pub fn buffer_to_text(buf: &Buffer) -> String {
    let capacity = (buf.width() as usize + 1) * buf.height() as usize;
    let mut out = String::with_capacity(capacity);

    for y in 0..buf.height() {
        if y > 0 {
            out.push('\n');
        }
        for cell in buf.row_cells(y) {
            if cell.is_continuation() {
                continue;
            }
            match cell.content.as_char() {
                Some(c) => out.push(c),
                None => out.push(' '),
            }
        }
    }
    out
}

/// One row of a [`Buffer`] as text, trailing whitespace trimmed.
#[must_use]
pub fn buffer_line(buf: &Buffer, y: u16) -> String {
    let mut out = String::with_capacity(buf.width() as usize);
    for cell in buf.row_cells(y) {
        if cell.is_continuation() {
            continue;
        }
        match cell.content.as_char() {
            Some(c) => out.push(c),
            None => out.push(' '),
        }
    }
    out.trim_end().to_string()
}

// ============================================================================
// Diff
// ============================================================================

/// Compute a simple line-by-line diff between two text strings.
///
/// Lines prefixed with ` ` are identical, `-` appear only in `expected`,
/// `+` only in `actual`. Returns an empty string when the inputs match.
#[must_use]
pub fn diff_text(expected: &str, actual: &str) -> String {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();

    let max_lines = expected_lines.len().max(actual_lines.len());
    let mut out = String::new();
    let mut has_diff = false;

    for i in 0..max_lines {
        let exp = expected_lines.get(i).copied();
        let act = actual_lines.get(i).copied();

        match (exp, act) {
            (Some(e), Some(a)) if e == a => {
                writeln!(out, " {e}").expect("string write");
            }
            (Some(e), Some(a)) => {
                writeln!(out, "-{e}").expect("string write");
                writeln!(out, "+{a}").expect("string write");
                has_diff = true;
            }
            (Some(e), None) => {
                writeln!(out, "-{e}").expect("string write");
                has_diff = true;
            }
            (None, Some(a)) => {
                writeln!(out, "+{a}").expect("string write");
                has_diff = true;
            }
            (None, None) => {}
        }
    }

    if has_diff { out } else { String::new() }
}
