//! Error types for changetrack-core.

use thiserror::Error;

/// Errors raised while building a declaration forest from raw declarations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A declaration appears somewhere the model cannot represent it.
    #[error("Unsupported {kind} declaration inside {context}")]
    UnsupportedDeclaration {
        /// Kind of declaration being built (type, field, method, ...).
        kind: String,
        /// Full name of the declaring element.
        context: String,
    },
}

/// Errors raised by the C# front-end.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The tree-sitter grammar could not be loaded.
    #[error("Failed to load C# grammar: {message}")]
    Language {
        /// Description of the grammar error.
        message: String,
    },

    /// Tree-sitter produced no tree for the source.
    #[error("Failed to parse source: {path}")]
    Unparsable {
        /// Path of the source, empty for in-memory text.
        path: String,
    },

    /// Reading a source file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the unreadable file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The parsed declarations could not be assembled into a forest.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Errors raised while constructing comparer options.
#[derive(Error, Debug)]
pub enum OptionsError {
    /// An attribute name pattern is not a valid regular expression.
    #[error("Invalid attribute pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Regex compilation error.
        #[source]
        source: regex::Error,
    },
}

/// Errors raised while discovering source files.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The scan root does not exist.
    #[error("Path does not exist: {path}")]
    MissingRoot {
        /// The missing path.
        path: String,
    },

    /// Reading a discovered file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the unreadable file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
