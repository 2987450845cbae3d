//! Severity levels and comparison results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::message::{FormatArguments, MessageFormatter};
use crate::model::Declaration;

/// Semantic version impact of a change. Ordered `None < Feature < Breaking`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SemVerChangeType {
    #[default]
    None,
    Feature,
    Breaking,
}

impl SemVerChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemVerChangeType::None => "none",
            SemVerChangeType::Feature => "feature",
            SemVerChangeType::Breaking => "breaking",
        }
    }
}

impl fmt::Display for SemVerChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SemVerChangeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(SemVerChangeType::None),
            "feature" => Ok(SemVerChangeType::Feature),
            "breaking" => Ok(SemVerChangeType::Breaking),
            other => Err(format!(
                "Unknown change type: {}. Valid options: none, feature, breaking",
                other
            )),
        }
    }
}

/// One explained change between an old and a new declaration.
#[derive(Clone, Debug, Serialize)]
pub struct ComparisonResult<'a> {
    pub change_type: SemVerChangeType,
    pub old_item: Option<Declaration<'a>>,
    pub new_item: Option<Declaration<'a>>,
    pub message: String,
    pub definition_type: &'static str,
    pub arguments: FormatArguments,
}

impl<'a> ComparisonResult<'a> {
    fn new(
        change_type: SemVerChangeType,
        old_item: Option<Declaration<'a>>,
        new_item: Option<Declaration<'a>>,
        definition_type: &'static str,
        arguments: FormatArguments,
        formatter: &dyn MessageFormatter,
    ) -> Self {
        Self {
            change_type,
            old_item,
            new_item,
            message: formatter.format_item(definition_type, &arguments),
            definition_type,
            arguments,
        }
    }

    pub fn item_added(
        item: Declaration<'a>,
        change_type: SemVerChangeType,
        arguments: FormatArguments,
        formatter: &dyn MessageFormatter,
    ) -> Self {
        Self::new(
            change_type,
            None,
            Some(item),
            item.definition_type(),
            arguments,
            formatter,
        )
    }

    pub fn item_removed(
        item: Declaration<'a>,
        change_type: SemVerChangeType,
        arguments: FormatArguments,
        formatter: &dyn MessageFormatter,
    ) -> Self {
        Self::new(
            change_type,
            Some(item),
            None,
            item.definition_type(),
            arguments,
            formatter,
        )
    }

    pub fn item_changed(
        old_item: Declaration<'a>,
        new_item: Declaration<'a>,
        change_type: SemVerChangeType,
        arguments: FormatArguments,
        formatter: &dyn MessageFormatter,
    ) -> Self {
        Self::new(
            change_type,
            Some(old_item),
            Some(new_item),
            old_item.definition_type(),
            arguments,
            formatter,
        )
    }

    /// Re-render the message with another formatter.
    pub fn format_with(&self, formatter: &dyn MessageFormatter) -> String {
        formatter.format_item(self.definition_type, &self.arguments)
    }

    /// Location of the declaration the result is about, preferring the new side.
    pub fn file_path(&self) -> &'a str {
        self.new_item
            .or(self.old_item)
            .map(|d| d.location().file_path.as_str())
            .unwrap_or("")
    }
}

/// Collects results for one comparison and tracks the highest severity.
#[derive(Debug, Default)]
pub struct ChangeResultAggregator<'a> {
    results: Vec<ComparisonResult<'a>>,
    change_type: SemVerChangeType,
    exit_node_analysis: bool,
}

impl<'a> ChangeResultAggregator<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: ComparisonResult<'a>) {
        self.change_type = self.change_type.max(result.change_type);
        self.results.push(result);
    }

    pub fn add_results(&mut self, results: impl IntoIterator<Item = ComparisonResult<'a>>) {
        for result in results {
            self.add_result(result);
        }
    }

    pub fn overall_change_type(&self) -> SemVerChangeType {
        self.change_type
    }

    /// Stop further checks on the current pair.
    pub fn exit_node_analysis(&mut self) {
        self.exit_node_analysis = true;
    }

    pub fn should_exit(&self) -> bool {
        self.exit_node_analysis
    }

    pub fn results(&self) -> &[ComparisonResult<'a>] {
        &self.results
    }

    pub fn into_results(self) -> Vec<ComparisonResult<'a>> {
        self.results
    }
}

/// Count of results per severity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    pub breaking: usize,
    pub feature: usize,
    pub none: usize,
}

impl ChangeSummary {
    pub fn text(&self) -> String {
        let mut parts = Vec::new();
        if self.breaking > 0 {
            parts.push(format!("{} breaking", self.breaking));
        }
        if self.feature > 0 {
            parts.push(format!("{} feature", self.feature));
        }
        if self.none > 0 {
            parts.push(format!("{} informational", self.none));
        }
        if parts.is_empty() {
            "No changes".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Outcome of comparing two forests.
#[derive(Clone, Debug, Serialize)]
pub struct ChangeCalculatorResult<'a> {
    pub change_type: SemVerChangeType,
    pub results: Vec<ComparisonResult<'a>>,
    pub summary: ChangeSummary,
    pub duration_ms: f64,
}

impl<'a> ChangeCalculatorResult<'a> {
    pub fn new(aggregator: ChangeResultAggregator<'a>, duration_ms: f64) -> Self {
        let change_type = aggregator.overall_change_type();
        let results = aggregator.into_results();
        let mut summary = ChangeSummary::default();
        for result in &results {
            match result.change_type {
                SemVerChangeType::Breaking => summary.breaking += 1,
                SemVerChangeType::Feature => summary.feature += 1,
                SemVerChangeType::None => summary.none += 1,
            }
        }
        Self {
            change_type,
            results,
            summary,
            duration_ms,
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.results.is_empty()
    }

    pub fn results_of(
        &self,
        change_type: SemVerChangeType,
    ) -> impl Iterator<Item = &ComparisonResult<'a>> {
        self.results
            .iter()
            .filter(move |r| r.change_type == change_type)
    }
}
