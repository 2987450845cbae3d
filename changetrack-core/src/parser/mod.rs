//! C# front-end.
//!
//! Parses source text with the tree-sitter C# grammar and assembles the
//! declarations of every file into one [`DeclarationForest`]. Files are
//! parsed concurrently; partial types split across files are merged when the
//! forest is built.

use rayon::prelude::*;
use tracing::debug;

use crate::error::ParseError;
use crate::model::{DeclarationForest, TypeBuilder};

pub mod csharp;

mod helpers;

/// One source file: its path and its text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeSource {
    pub path: String,
    pub contents: String,
}

impl CodeSource {
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Parse a single source into type builders.
pub fn parse_source(source: &CodeSource) -> Result<Vec<TypeBuilder>, ParseError> {
    csharp::parse(&source.contents, &source.path)
}

/// Build a forest from one piece of C# text.
pub fn build_forest(source: &str, file_path: Option<&str>) -> Result<DeclarationForest, ParseError> {
    let builders = csharp::parse(source, file_path.unwrap_or_default())?;
    Ok(DeclarationForest::from_builders(builders)?)
}

/// Parse many sources in parallel and build one forest.
///
/// `num_threads` sizes a dedicated pool; `None` or zero uses the global
/// rayon pool. The first parse failure aborts the whole build.
pub fn parse_sources(
    sources: &[CodeSource],
    num_threads: Option<usize>,
) -> Result<DeclarationForest, ParseError> {
    let pool = match num_threads {
        Some(n) if n > 0 => rayon::ThreadPoolBuilder::new().num_threads(n).build().ok(),
        _ => None,
    };

    let parse_all = || {
        sources
            .par_iter()
            .map(parse_source)
            .collect::<Result<Vec<_>, _>>()
    };
    let parsed = match pool {
        Some(pool) => pool.install(parse_all),
        None => parse_all(),
    }?;

    let builders: Vec<TypeBuilder> = parsed.into_iter().flatten().collect();
    debug!(
        files = sources.len(),
        types = builders.len(),
        "Parsed sources"
    );
    Ok(DeclarationForest::from_builders(builders)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_forest_without_path() {
        let forest = build_forest("public class Widget {}", None).unwrap();
        assert_eq!(forest.type_count(), 1);
        assert_eq!(forest.types[0].element.item.location.file_path, "");
    }

    #[test]
    fn test_parse_sources_merges_partials_across_files() {
        let sources = vec![
            CodeSource::new(
                "Widget.cs",
                "namespace Ui { public partial class Widget { public int Width; } }",
            ),
            CodeSource::new(
                "Widget.Height.cs",
                "namespace Ui { public partial class Widget { public int Height; } }",
            ),
            CodeSource::new("Theme.cs", "namespace Ui { public enum Theme { Light, Dark } }"),
        ];

        let forest = parse_sources(&sources, Some(2)).unwrap();
        assert_eq!(forest.type_count(), 2);
        let widget = forest.find_type("Ui.Widget").unwrap();
        assert_eq!(widget.fields.len(), 2);
    }

    #[test]
    fn test_empty_sources() {
        let forest = parse_sources(&[], None).unwrap();
        assert!(forest.is_empty());
    }
}
