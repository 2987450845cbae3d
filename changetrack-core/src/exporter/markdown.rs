//! Markdown format exporter.

use super::result_location;
use crate::message::MarkdownMessageFormatter;
use crate::results::{ChangeCalculatorResult, ComparisonResult, SemVerChangeType};

const SECTIONS: [(SemVerChangeType, &str); 2] = [
    (SemVerChangeType::Breaking, "Breaking changes"),
    (SemVerChangeType::Feature, "Features"),
];

/// Export a comparison outcome to Markdown.
///
/// Messages are re-rendered with [`MarkdownMessageFormatter`] regardless of
/// the formatter used during the comparison.
pub fn export(result: &ChangeCalculatorResult<'_>) -> String {
    let mut lines = Vec::new();

    lines.push("# API change report".to_string());
    lines.push(String::new());
    lines.push(format!(
        "**Verdict:** {} ({})",
        verdict(result.change_type),
        result.summary.text()
    ));

    for (change_type, title) in SECTIONS {
        let entries: Vec<String> = result.results_of(change_type).map(export_result).collect();
        if entries.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("## {}", title));
        lines.push(String::new());
        lines.extend(entries);
    }

    lines.push(String::new());
    lines.join("\n")
}

fn verdict(change_type: SemVerChangeType) -> &'static str {
    match change_type {
        SemVerChangeType::None => "None",
        SemVerChangeType::Feature => "Feature",
        SemVerChangeType::Breaking => "Breaking",
    }
}

fn export_result(result: &ComparisonResult<'_>) -> String {
    let message = result.format_with(&MarkdownMessageFormatter);
    match result_location(result) {
        Some(location) => format!("- {} ({}:{})", message, location.file_path, location.line),
        None => format!("- {}", message),
    }
}
