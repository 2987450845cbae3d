//! changetrack configuration loading from `.changetrack.toml`.
//!
//! The file is optional. Every setting has a default and command-line flags
//! override whatever the file says.
//!
//! # Example Configuration
//!
//! ```toml
//! [compare]
//! attributes = "by-expression"
//! attribute_patterns = ["^JsonPropertyName$", "^DataMember$"]
//! fail_on = "breaking"
//!
//! [output]
//! format = "markdown"
//! color = false
//! ```

use std::path::Path;

use changetrack_core::{AttributeCompareOption, SemVerChangeType};
use clap::ValueEnum;
use serde::Deserialize;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".changetrack.toml";

/// Root configuration structure loaded from `.changetrack.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct ChangetrackConfig {
    /// Comparison defaults.
    #[serde(default)]
    pub compare: CompareSettings,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// `[compare]` section.
#[derive(Debug, Deserialize, Default)]
pub struct CompareSettings {
    /// Attribute comparison mode: `skip`, `by-expression` or `all`.
    #[serde(default)]
    pub attributes: Option<String>,

    /// Regular expressions selecting the attributes compared in
    /// `by-expression` mode. Replaces the built-in serialization families.
    #[serde(default)]
    pub attribute_patterns: Vec<String>,

    /// Lowest verdict that makes `changetrack compare` exit with status 1.
    #[serde(default)]
    pub fail_on: Option<FailOn>,
}

/// `[output]` section.
///
/// Command-line flags (e.g. `--format json`) override these settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `table`, `json` or `markdown`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output. Unset means TTY auto-detection.
    #[serde(default)]
    pub color: Option<bool>,
}

/// Exit code policy for CI use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    /// Never fail on the verdict.
    #[default]
    None,
    /// Fail on features and breaking changes.
    Feature,
    /// Fail on breaking changes only.
    Breaking,
}

impl FailOn {
    /// Whether a verdict reaches this threshold.
    pub fn is_reached(self, verdict: SemVerChangeType) -> bool {
        match self {
            FailOn::None => false,
            FailOn::Feature => verdict >= SemVerChangeType::Feature,
            FailOn::Breaking => verdict == SemVerChangeType::Breaking,
        }
    }
}

impl ChangetrackConfig {
    /// Load configuration from `.changetrack.toml` in the given directory.
    ///
    /// A missing file yields defaults. Unreadable or invalid files are logged
    /// as warnings and also yield defaults.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE_NAME, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE_NAME, e);
                }
            }
        }
        Self::default()
    }

    /// Configured attribute mode. An unknown value is reported and ignored.
    pub fn attribute_mode(&self) -> Option<AttributeCompareOption> {
        let value = self.compare.attributes.as_deref()?;
        match value.parse() {
            Ok(mode) => Some(mode),
            Err(e) => {
                tracing::warn!("Ignoring [compare].attributes in {}: {}", CONFIG_FILE_NAME, e);
                None
            }
        }
    }

    pub fn attribute_patterns(&self) -> &[String] {
        &self.compare.attribute_patterns
    }

    pub fn fail_on(&self) -> Option<FailOn> {
        self.compare.fail_on
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Returns the configured value, or `None` to use auto-detection.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ChangetrackConfig::default();
        assert!(config.attribute_mode().is_none());
        assert!(config.attribute_patterns().is_empty());
        assert!(config.fail_on().is_none());
        assert!(config.default_format().is_none());
        assert!(config.use_color().is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[compare]
attributes = "all"
attribute_patterns = ["^Obsolete$"]
fail_on = "feature"

[output]
format = "json"
color = false
"#;
        let config: ChangetrackConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.attribute_mode(), Some(AttributeCompareOption::All));
        assert_eq!(config.attribute_patterns(), ["^Obsolete$".to_string()]);
        assert_eq!(config.fail_on(), Some(FailOn::Feature));
        assert_eq!(config.default_format(), Some("json"));
        assert_eq!(config.use_color(), Some(false));
    }

    #[test]
    fn test_unknown_attribute_mode_is_ignored() {
        let config: ChangetrackConfig = toml::from_str("[compare]\nattributes = \"some\"\n").unwrap();
        assert!(config.attribute_mode().is_none());
    }

    #[test]
    fn test_load_missing_and_invalid_files() {
        let dir = TempDir::new().unwrap();
        assert!(ChangetrackConfig::load(dir.path()).fail_on().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[compare\nfail_on = 3").unwrap();
        let config = ChangetrackConfig::load(dir.path());
        assert!(config.fail_on().is_none());
        assert!(config.default_format().is_none());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[compare]\nfail_on = \"breaking\"\n",
        )
        .unwrap();
        assert_eq!(ChangetrackConfig::load(dir.path()).fail_on(), Some(FailOn::Breaking));
    }

    #[test]
    fn test_fail_on_thresholds() {
        assert!(!FailOn::None.is_reached(SemVerChangeType::Breaking));
        assert!(FailOn::Feature.is_reached(SemVerChangeType::Feature));
        assert!(FailOn::Feature.is_reached(SemVerChangeType::Breaking));
        assert!(!FailOn::Feature.is_reached(SemVerChangeType::None));
        assert!(FailOn::Breaking.is_reached(SemVerChangeType::Breaking));
        assert!(!FailOn::Breaking.is_reached(SemVerChangeType::Feature));
    }
}
