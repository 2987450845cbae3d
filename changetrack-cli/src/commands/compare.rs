//! Compare command - semantic version impact between two API versions
//!
//! Loads the C# sources of an old and a new version (a file or a directory
//! each), matches their declarations and reports every change with its
//! severity.

use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::{debug, info};

use changetrack_core::exporter::markdown;
use changetrack_core::{
    calculate_changes, parser, scanner, AttributeCompareOption, ChangeCalculatorResult,
    ComparerOptions, ComparisonResult, DeclarationForest, SemVerChangeType,
};

use crate::output::{Output, OutputConfig, TableDisplay};

/// Resolved settings for one comparison (flags merged over config).
#[derive(Debug, Clone, Default)]
pub struct CompareArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    pub attributes: AttributeCompareOption,
    /// Empty keeps the built-in serialization attribute families.
    pub attribute_patterns: Vec<String>,
    pub threads: Option<usize>,
}

/// Comparison outcome with the inputs it was computed from.
#[derive(Debug, Serialize)]
pub struct CompareReport<'a> {
    pub old_path: String,
    pub new_path: String,
    pub old_files: usize,
    pub new_files: usize,
    #[serde(flatten)]
    pub result: ChangeCalculatorResult<'a>,
}

fn verdict_label(change_type: SemVerChangeType) -> colored::ColoredString {
    match change_type {
        SemVerChangeType::Breaking => "BREAKING".red().bold(),
        SemVerChangeType::Feature => "FEATURE".green().bold(),
        SemVerChangeType::None => "NONE".dimmed(),
    }
}

fn location_of(result: &ComparisonResult<'_>) -> Option<String> {
    let declaration = result.new_item.or(result.old_item)?;
    let location = declaration.location();
    if location.file_path.is_empty() {
        return None;
    }
    Some(format!("{}:{}", location.file_path, location.line))
}

impl TableDisplay for CompareReport<'_> {
    fn to_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} -> {}\n",
            "COMPARE:".cyan().bold(),
            self.old_path.yellow(),
            self.new_path.green()
        ));
        output.push_str(&format!(
            "Verdict: {} ({}) across {} -> {} files ({:.1}ms)\n",
            verdict_label(self.result.change_type),
            self.result.summary.text(),
            self.old_files,
            self.new_files,
            self.result.duration_ms
        ));

        if !self.result.has_changes() {
            output.push_str(&format!("\n{}\n", "No API changes detected.".dimmed()));
            return output;
        }

        let sections = [
            (SemVerChangeType::Breaking, "BREAKING CHANGES", "!"),
            (SemVerChangeType::Feature, "FEATURES", "+"),
        ];
        for (change_type, title, marker) in sections {
            let results: Vec<_> = self.result.results_of(change_type).collect();
            if results.is_empty() {
                continue;
            }
            let heading = match change_type {
                SemVerChangeType::Breaking => title.red().bold(),
                _ => title.green().bold(),
            };
            output.push_str(&format!("\n{} ({}):\n", heading, results.len()));
            for result in results {
                output.push_str(&format!("  {} {}\n", marker, result.message));
                if let Some(location) = location_of(result) {
                    output.push_str(&format!("    {}\n", location.dimmed()));
                }
            }
        }

        output
    }

    fn to_markdown(&self) -> String {
        markdown::export(&self.result)
    }
}

struct LoadedSide {
    forest: DeclarationForest,
    files: usize,
}

fn load_side(path: &Path, threads: Option<usize>) -> anyhow::Result<LoadedSide> {
    let sources = scanner::load_sources(path)
        .with_context(|| format!("Failed to scan {}", path.display()))?;
    let forest = parser::parse_sources(&sources, threads)
        .with_context(|| format!("Failed to parse sources under {}", path.display()))?;
    debug!(
        path = %path.display(),
        files = sources.len(),
        types = forest.type_count(),
        "Loaded declarations"
    );
    Ok(LoadedSide {
        forest,
        files: sources.len(),
    })
}

fn build_options(args: &CompareArgs) -> anyhow::Result<ComparerOptions> {
    let options = ComparerOptions::default().with_compare_attributes(args.attributes);
    if args.attribute_patterns.is_empty() {
        return Ok(options);
    }
    options
        .with_attribute_patterns(&args.attribute_patterns)
        .context("Invalid --attribute-pattern")
}

/// Run the compare command and return the verdict.
pub async fn run(args: CompareArgs, config: OutputConfig) -> anyhow::Result<SemVerChangeType> {
    let options = build_options(&args)?;
    info!(
        old = %args.old.display(),
        new = %args.new.display(),
        attributes = args.attributes.as_str(),
        "Comparing API surfaces"
    );

    let (old_path, new_path, threads) = (args.old.clone(), args.new.clone(), args.threads);
    let old_task = tokio::task::spawn_blocking(move || load_side(&old_path, threads));
    let new_task = tokio::task::spawn_blocking(move || load_side(&new_path, threads));
    let (old_side, new_side) =
        tokio::try_join!(old_task, new_task).context("Source loading task failed")?;
    let (old_side, new_side) = (old_side?, new_side?);

    let result = calculate_changes(&old_side.forest, &new_side.forest, &options);
    let change_type = result.change_type;

    let report = CompareReport {
        old_path: args.old.display().to_string(),
        new_path: args.new.display().to_string(),
        old_files: old_side.files,
        new_files: new_side.files,
        result,
    };
    Output::with_config(report, config).render()?;

    Ok(change_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use tempfile::TempDir;

    fn forest(source: &str) -> DeclarationForest {
        parser::build_forest(source, Some("Api.cs")).unwrap()
    }

    fn report<'a>(old: &'a DeclarationForest, new: &'a DeclarationForest) -> CompareReport<'a> {
        CompareReport {
            old_path: "v1".to_string(),
            new_path: "v2".to_string(),
            old_files: 1,
            new_files: 1,
            result: calculate_changes(old, new, &ComparerOptions::default()),
        }
    }

    #[test]
    fn test_table_lists_changes_by_severity() {
        let old = forest("namespace Shop { public class Cart { public int Count; } }");
        let new = forest(
            "namespace Shop { public class Cart { public void Clear() {} } }",
        );
        let output = report(&old, &new).to_table();

        assert!(output.contains("(1 breaking, 1 feature)"));
        assert!(output.contains("! Field 'Shop.Cart.Count' has been removed"));
        assert!(output.contains("+ Method 'Shop.Cart.Clear' has been added"));
        assert!(output.contains("Api.cs:1"));
    }

    #[test]
    fn test_table_without_changes() {
        let old = forest("public class Cart { }");
        let output = report(&old, &old).to_table();
        assert!(output.contains("No API changes detected."));
    }

    #[test]
    fn test_markdown_and_json_rendering() {
        let old = forest("namespace Shop { public class Cart { } }");
        let new = forest("namespace Shop { public sealed class Cart { } }");

        let markdown = report(&old, &new).to_markdown();
        assert!(markdown.contains("**Verdict:** Breaking"));

        let mut config = OutputConfig::new(OutputFormat::Json);
        config.compact = true;
        let json = Output::with_config(report(&old, &new), config).render_to_string();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["old_path"], "v1");
        assert_eq!(value["change_type"], "Breaking");
        assert_eq!(value["results"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_invalid_attribute_pattern() {
        let args = CompareArgs {
            attribute_patterns: vec!["(".to_string()],
            ..CompareArgs::default()
        };
        assert!(build_options(&args).is_err());
    }

    #[test]
    fn test_load_side_counts_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("A.cs"), "public class A { }").unwrap();
        std::fs::write(dir.path().join("B.cs"), "public class B { }").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not code").unwrap();

        let side = load_side(dir.path(), Some(1)).unwrap();
        assert_eq!(side.files, 2);
        assert_eq!(side.forest.type_count(), 2);
    }

    #[test]
    fn test_load_side_missing_path() {
        let dir = TempDir::new().unwrap();
        let error = load_side(&dir.path().join("missing"), None).err().unwrap();
        assert!(error.to_string().contains("Failed to scan"));
    }
}
