//! changetrack core - semantic version impact engine for C# API surfaces.
//!
//! Given the declarations of an old and a new version of an API, the engine
//! pairs declarations that represent the same element, compares every pair
//! and classifies the overall change as `None`, `Feature` or `Breaking`,
//! with one explained result per change.
//!
//! # Features
//!
//! - **Matching**: types matched across namespace moves, overloads matched
//!   through a cascade of signature predicates
//! - **Classification**: modifier transition tables for access levels, type
//!   and member modifiers
//! - **Generic renames**: `Foo<T>` and `Foo<TValue>` compare equal
//! - **C# front-end**: tree-sitter based, with parallel parsing and partial
//!   type merging
//! - **Export formats**: JSON, Markdown
//!
//! # Usage
//!
//! ```no_run
//! use changetrack_core::{calculate_changes, parser, ComparerOptions};
//!
//! let old = parser::build_forest("public class Account { public int Id; }", None)?;
//! let new = parser::build_forest("public class Account { }", None)?;
//!
//! let result = calculate_changes(&old, &new, &ComparerOptions::default());
//! println!("{}", result.change_type);
//! # Ok::<(), changetrack_core::error::ParseError>(())
//! ```

pub mod calculator;
pub mod comparer;
pub mod error;
pub mod exporter;
pub mod matching;
pub mod message;
pub mod model;
pub mod parser;
pub mod results;
pub mod scanner;
pub mod tables;

pub use calculator::calculate_changes;
pub use comparer::{AttributeCompareOption, ComparerOptions};
pub use message::{DefaultMessageFormatter, MarkdownMessageFormatter, MessageFormatter};
pub use model::DeclarationForest;
pub use results::{ChangeCalculatorResult, ComparisonResult, SemVerChangeType};

/// Get the version of changetrack-core.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
