//! Comparers for matched declaration pairs.
//!
//! Every comparer follows the same template: visibility and access first,
//! then kind specific checks, then attributes. A pair where both sides are
//! invisible produces nothing, and a pair whose visibility flips reports only
//! the flip.

mod attributes;
mod constraints;
pub(crate) mod generics;
mod members;
mod parameters;
mod types;

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::OptionsError;
use crate::matching::{ItemMatch, MatchResults};
use crate::message::{
    DefaultMessageFormatter, FormatArguments, MessageFormatter, ACCESS_CHANGED, ITEM_ADDED,
    ITEM_REMOVED,
};
use crate::model::{
    AttributeDefinition, ConstructorDefinition, Declaration, Element, EnumMemberDefinition,
    FieldDefinition, MethodDefinition, PropertyAccessorDefinition, PropertyDefinition,
    TypeDefinition,
};
use crate::results::{ChangeResultAggregator, ComparisonResult, SemVerChangeType};
use crate::tables::{ACCESS_MODIFIERS, PROPERTY_ACCESSOR_ACCESS_MODIFIERS};

pub use members::{
    ConstructorComparer, EnumMemberComparer, FieldComparer, MethodComparer,
    PropertyAccessorComparer, PropertyComparer,
};
pub use types::TypeComparer;

/// Which attributes take part in comparisons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeCompareOption {
    Skip,
    #[default]
    ByExpression,
    All,
}

impl AttributeCompareOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeCompareOption::Skip => "skip",
            AttributeCompareOption::ByExpression => "by-expression",
            AttributeCompareOption::All => "all",
        }
    }
}

impl std::str::FromStr for AttributeCompareOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(AttributeCompareOption::Skip),
            "by-expression" | "byexpression" => Ok(AttributeCompareOption::ByExpression),
            "all" => Ok(AttributeCompareOption::All),
            other => Err(format!(
                "Unknown attribute mode: {}. Valid options: skip, by-expression, all",
                other
            )),
        }
    }
}

/// Serialization attribute families compared by default.
pub const DEFAULT_ATTRIBUTE_PATTERNS: &[&str] = &[
    r"^(System\.Text\.Json\.Serialization\.)?Json\w*$",
    r"^(Newtonsoft\.Json\.)?Json\w*$",
    r"^(System\.Xml\.Serialization\.)?Xml\w*$",
    r"^(System\.Runtime\.Serialization\.)?(DataContract|CollectionDataContract|DataMember|IgnoreDataMember|EnumMember|KnownType)(Attribute)?$",
];

static DEFAULT_ATTRIBUTE_EXPRESSIONS: Lazy<Vec<Regex>> = Lazy::new(|| {
    DEFAULT_ATTRIBUTE_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect()
});

#[derive(Clone)]
pub struct ComparerOptions {
    pub compare_attributes: AttributeCompareOption,
    /// Consulted only in `ByExpression` mode. An attribute is compared when
    /// any expression matches its name as written or its short name.
    pub attribute_names_to_compare: Vec<Regex>,
    pub message_formatter: Arc<dyn MessageFormatter>,
}

impl Default for ComparerOptions {
    fn default() -> Self {
        Self {
            compare_attributes: AttributeCompareOption::ByExpression,
            attribute_names_to_compare: DEFAULT_ATTRIBUTE_EXPRESSIONS.clone(),
            message_formatter: Arc::new(DefaultMessageFormatter),
        }
    }
}

impl fmt::Debug for ComparerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparerOptions")
            .field("compare_attributes", &self.compare_attributes)
            .field(
                "attribute_names_to_compare",
                &self
                    .attribute_names_to_compare
                    .iter()
                    .map(Regex::as_str)
                    .collect::<Vec<_>>(),
            )
            .field("message_formatter", &self.message_formatter)
            .finish()
    }
}

impl ComparerOptions {
    pub fn with_compare_attributes(mut self, mode: AttributeCompareOption) -> Self {
        self.compare_attributes = mode;
        self
    }

    /// Replace the attribute expressions. Fails on the first invalid pattern.
    pub fn with_attribute_patterns<I, S>(mut self, patterns: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.attribute_names_to_compare = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|source| OptionsError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self)
    }

    pub fn with_formatter(mut self, formatter: Arc<dyn MessageFormatter>) -> Self {
        self.message_formatter = formatter;
        self
    }

    pub fn should_compare_attribute(&self, attribute: &AttributeDefinition) -> bool {
        match self.compare_attributes {
            AttributeCompareOption::Skip => false,
            AttributeCompareOption::All => true,
            AttributeCompareOption::ByExpression => {
                self.attribute_names_to_compare.iter().any(|expression| {
                    expression.is_match(&attribute.item.name)
                        || expression.is_match(attribute.short_name())
                })
            }
        }
    }
}

/// Compares one matched pair of declarations.
pub trait ItemComparer<T> {
    fn compare_match<'a>(
        &self,
        item: ItemMatch<'a, T>,
        options: &ComparerOptions,
    ) -> Vec<ComparisonResult<'a>>;
}

/// How a change of the effective access level is classified.
pub(crate) trait AccessChange: Element {
    fn access_change(old: &Self, new: &Self) -> SemVerChangeType {
        ACCESS_MODIFIERS.calculate_change(old.access_modifiers(), new.access_modifiers())
    }
}

impl AccessChange for TypeDefinition {}
impl AccessChange for FieldDefinition {}
impl AccessChange for PropertyDefinition {}
impl AccessChange for MethodDefinition {}
impl AccessChange for ConstructorDefinition {}
impl AccessChange for EnumMemberDefinition {}

impl AccessChange for PropertyAccessorDefinition {
    fn access_change(old: &Self, new: &Self) -> SemVerChangeType {
        PROPERTY_ACCESSOR_ACCESS_MODIFIERS
            .calculate_change(old.accessor_access_modifiers, new.accessor_access_modifiers)
    }
}

/// Accumulates results for one comparison, rendering messages with the
/// configured formatter.
pub(crate) struct ResultBuilder<'a, 'o> {
    options: &'o ComparerOptions,
    aggregator: ChangeResultAggregator<'a>,
}

impl<'a, 'o> ResultBuilder<'a, 'o> {
    pub(crate) fn new(options: &'o ComparerOptions) -> Self {
        Self {
            options,
            aggregator: ChangeResultAggregator::new(),
        }
    }

    pub(crate) fn options(&self) -> &'o ComparerOptions {
        self.options
    }

    /// Record a change between two declarations. `None` severities are dropped.
    pub(crate) fn changed(
        &mut self,
        old: Declaration<'a>,
        new: Declaration<'a>,
        change_type: SemVerChangeType,
        arguments: FormatArguments,
    ) {
        if change_type == SemVerChangeType::None {
            return;
        }
        self.aggregator.add_result(ComparisonResult::item_changed(
            old,
            new,
            change_type,
            arguments,
            &*self.options.message_formatter,
        ));
    }

    pub(crate) fn added(&mut self, item: Declaration<'a>, change_type: SemVerChangeType) {
        let arguments = FormatArguments::new(ITEM_ADDED, item.full_name());
        self.aggregator.add_result(ComparisonResult::item_added(
            item,
            change_type,
            arguments,
            &*self.options.message_formatter,
        ));
    }

    pub(crate) fn removed(&mut self, item: Declaration<'a>, change_type: SemVerChangeType) {
        let arguments = FormatArguments::new(ITEM_REMOVED, item.full_name());
        self.aggregator.add_result(ComparisonResult::item_removed(
            item,
            change_type,
            arguments,
            &*self.options.message_formatter,
        ));
    }

    /// Visible removals break consumers, visible additions are features.
    pub(crate) fn report_unmatched<T: Element>(&mut self, results: &MatchResults<'a, T>) {
        for item in results.items_removed.iter().filter(|i| i.is_visible()) {
            self.removed(item.declaration(), SemVerChangeType::Breaking);
        }
        for item in results.items_added.iter().filter(|i| i.is_visible()) {
            self.added(item.declaration(), SemVerChangeType::Feature);
        }
    }

    pub(crate) fn compare_matched<T, C>(&mut self, results: MatchResults<'a, T>, comparer: &C)
    where
        T: Element,
        C: ItemComparer<T>,
    {
        self.report_unmatched(&results);
        for item in results.matches {
            let results = comparer.compare_match(item, self.options);
            self.aggregator.add_results(results);
        }
    }

    pub(crate) fn extend(&mut self, results: Vec<ComparisonResult<'a>>) {
        self.aggregator.add_results(results);
    }

    pub(crate) fn exit_node_analysis(&mut self) {
        self.aggregator.exit_node_analysis();
    }

    pub(crate) fn should_exit(&self) -> bool {
        self.aggregator.should_exit()
    }

    pub(crate) fn into_aggregator(self) -> ChangeResultAggregator<'a> {
        self.aggregator
    }

    pub(crate) fn finish(self) -> Vec<ComparisonResult<'a>> {
        self.aggregator.into_results()
    }
}

/// Returns whether the comparison of the pair continues past visibility.
fn compare_visibility<'a, T: AccessChange>(
    item: ItemMatch<'a, T>,
    builder: &mut ResultBuilder<'a, '_>,
) -> bool {
    let (old, new) = (item.old, item.new);
    let arguments = || {
        FormatArguments::new(ACCESS_CHANGED, old.full_name()).with_values(
            old.access_modifiers().as_str(),
            new.access_modifiers().as_str(),
        )
    };
    match (old.is_visible(), new.is_visible()) {
        (false, false) => false,
        (true, false) => {
            builder.changed(
                old.declaration(),
                new.declaration(),
                SemVerChangeType::Breaking,
                arguments(),
            );
            false
        }
        (false, true) => {
            builder.changed(
                old.declaration(),
                new.declaration(),
                SemVerChangeType::Feature,
                arguments(),
            );
            false
        }
        (true, true) => {
            let change = T::access_change(old, new);
            builder.changed(old.declaration(), new.declaration(), change, arguments());
            true
        }
    }
}

/// The shared comparison template.
pub(crate) fn compare_element<'a, T: AccessChange>(
    item: ItemMatch<'a, T>,
    options: &ComparerOptions,
    evaluate: impl FnOnce(&mut ResultBuilder<'a, '_>),
) -> Vec<ComparisonResult<'a>> {
    let mut builder = ResultBuilder::new(options);
    if !compare_visibility(item, &mut builder) {
        return builder.finish();
    }
    evaluate(&mut builder);
    if !builder.should_exit() {
        attributes::compare_attributes(item.old.attributes(), item.new.attributes(), &mut builder);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttributeBuilder;

    fn attribute(name: &str) -> AttributeDefinition {
        AttributeBuilder::new(name).build("Ns.Type")
    }

    #[test]
    fn test_default_options_select_serialization_attributes() {
        let options = ComparerOptions::default();
        assert!(options.should_compare_attribute(&attribute("JsonPropertyName")));
        assert!(options.should_compare_attribute(&attribute(
            "System.Text.Json.Serialization.JsonIgnoreAttribute"
        )));
        assert!(options.should_compare_attribute(&attribute("XmlElement")));
        assert!(options.should_compare_attribute(&attribute("DataMember")));
        assert!(!options.should_compare_attribute(&attribute("Obsolete")));
    }

    #[test]
    fn test_skip_and_all_modes() {
        let skip = ComparerOptions::default().with_compare_attributes(AttributeCompareOption::Skip);
        assert!(!skip.should_compare_attribute(&attribute("JsonIgnore")));

        let all = ComparerOptions::default().with_compare_attributes(AttributeCompareOption::All);
        assert!(all.should_compare_attribute(&attribute("Obsolete")));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let error = ComparerOptions::default()
            .with_attribute_patterns(["^Valid$", "(unclosed"])
            .unwrap_err();
        match error {
            OptionsError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
        }
    }

    #[test]
    fn test_custom_patterns() {
        let options = ComparerOptions::default()
            .with_attribute_patterns(["^Obsolete$"])
            .unwrap();
        assert!(options.should_compare_attribute(&attribute("ObsoleteAttribute")));
        assert!(!options.should_compare_attribute(&attribute("JsonIgnore")));
    }

    #[test]
    fn test_attribute_mode_from_str() {
        assert_eq!(
            "by-expression".parse::<AttributeCompareOption>(),
            Ok(AttributeCompareOption::ByExpression)
        );
        assert!("some".parse::<AttributeCompareOption>().is_err());
    }
}
