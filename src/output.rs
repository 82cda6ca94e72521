//! CLI output formatting for both operations.
//!
//! # Output Format
//!
//! ## Convert
//!
//! ```text
//! Image converted successfully: /pics/output_1.jpg
//!     Source: /pics/input.png
//!     Format: jpg (quality 85)
//!     Renamed: output.jpg already exists
//! ```
//!
//! ## Resize
//!
//! ```text
//! Image resized successfully: /pics/input_resized.png (800x600)
//!     Source: /pics/input.png (200x100)
//!     Interpolation: linear
//! ```
//!
//! The `Renamed:` line only appears when collision avoidance kicked in.
//!
//! # Architecture
//!
//! [`format_report`] returns `Vec<String>` for testability and
//! [`print_report`] writes it to stdout. [`format_json`] is the `--json`
//! rendering. Format functions are pure: no I/O, no side effects.

use crate::types::{ConvertReport, Report, ResizeReport};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn renamed_line(renamed_from: Option<&Path>) -> Option<String> {
    renamed_from.map(|requested| {
        format!("{}Renamed: {} already exists", indent(1), file_name(requested))
    })
}

fn format_convert(report: &ConvertReport) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Image converted successfully: {}",
            report.destination.display()
        ),
        format!("{}Source: {}", indent(1), report.source.display()),
        format!(
            "{}Format: {} ({})",
            indent(1),
            report.format,
            report.level_description
        ),
    ];
    lines.extend(renamed_line(report.renamed_from.as_deref()));
    lines
}

fn format_resize(report: &ResizeReport) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Image resized successfully: {} ({})",
            report.destination.display(),
            report.size
        ),
        format!(
            "{}Source: {} ({})",
            indent(1),
            report.source.display(),
            report.original
        ),
        format!("{}Interpolation: {}", indent(1), report.interpolation),
    ];
    lines.extend(renamed_line(report.renamed_from.as_deref()));
    lines
}

/// Format a report as human-readable lines.
pub fn format_report(report: &Report) -> Vec<String> {
    match report {
        Report::Convert(r) => format_convert(r),
        Report::Resize(r) => format_resize(r),
    }
}

/// Print a report to stdout.
pub fn print_report(report: &Report) {
    for line in format_report(report) {
        println!("{}", line);
    }
}

/// Render a report as pretty-printed JSON.
pub fn format_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
