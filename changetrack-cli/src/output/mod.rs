//! Output formatting for the changetrack CLI.
//!
//! Every command result can be rendered as a colored table for terminals,
//! JSON for machines, or Markdown for pull request comments.
//!
//! Colors are disabled automatically when stdout is not a TTY.

use clap::ValueEnum;
use serde::Serialize;
use std::io::IsTerminal;
use std::str::FromStr;

mod json;

pub use self::json::JsonOutput;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report (default)
    #[default]
    Table,
    /// JSON format for machine consumption
    Json,
    /// Markdown report
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Configuration for output rendering
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub no_color: bool,
    /// Minified JSON
    pub compact: bool,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            no_color: false,
            compact: false,
        }
    }

    /// Create an OutputConfig with automatic TTY detection.
    ///
    /// `color_override` forces colors on or off; `None` follows the TTY.
    pub fn auto_detect(format: OutputFormat, color_override: Option<bool>) -> Self {
        let use_color = color_override.unwrap_or_else(|| std::io::stdout().is_terminal());
        Self {
            format,
            no_color: !use_color,
            compact: false,
        }
    }

    pub fn use_colors(&self) -> bool {
        !self.no_color
    }
}

/// Types that can be rendered in every supported format.
pub trait TableDisplay: Serialize {
    fn to_table(&self) -> String;

    /// Defaults to the table rendering.
    fn to_markdown(&self) -> String {
        self.to_table()
    }

    fn render(&self, config: &OutputConfig) -> String {
        match config.format {
            OutputFormat::Table => self.to_table(),
            OutputFormat::Json => JsonOutput::format(self, config),
            OutputFormat::Markdown => self.to_markdown(),
        }
    }
}

/// Result wrapper for formatted output
pub struct Output<T> {
    data: T,
    config: OutputConfig,
}

impl<T: TableDisplay> Output<T> {
    pub fn new(data: T, format: OutputFormat) -> Self {
        Self {
            data,
            config: OutputConfig::auto_detect(format, None),
        }
    }

    pub fn with_config(data: T, config: OutputConfig) -> Self {
        Self { data, config }
    }

    /// Render the output to stdout
    pub fn render(&self) -> anyhow::Result<()> {
        if !self.config.use_colors() {
            colored::control::set_override(false);
        }
        println!("{}", self.render_to_string());
        Ok(())
    }

    pub fn render_to_string(&self) -> String {
        self.data.render(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Greeting {
        name: String,
    }

    impl TableDisplay for Greeting {
        fn to_table(&self) -> String {
            format!("Hello {}", self.name)
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_color_override() {
        let config = OutputConfig::auto_detect(OutputFormat::Table, Some(true));
        assert!(config.use_colors());
        let config = OutputConfig::auto_detect(OutputFormat::Table, Some(false));
        assert!(!config.use_colors());
    }

    #[test]
    fn test_render_dispatch() {
        let greeting = || Greeting {
            name: "api".to_string(),
        };
        let table = Output::with_config(greeting(), OutputConfig::new(OutputFormat::Table));
        assert_eq!(table.render_to_string(), "Hello api");

        let markdown = Output::with_config(greeting(), OutputConfig::new(OutputFormat::Markdown));
        assert_eq!(markdown.render_to_string(), "Hello api");

        let mut config = OutputConfig::new(OutputFormat::Json);
        config.compact = true;
        let json = Output::with_config(greeting(), config);
        assert_eq!(json.render_to_string(), r#"{"name":"api"}"#);
    }
}
