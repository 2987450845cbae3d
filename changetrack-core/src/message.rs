//! Message templates and formatters.
//!
//! Comparers never build message text directly. They record a template with
//! `{DefinitionType}`, `{Identifier}`, `{OldValue}` and `{NewValue}`
//! placeholders plus the values to substitute, and a [`MessageFormatter`]
//! renders the final text. The structured arguments travel with every result
//! so callers can re-render with their own formatter.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

pub const ITEM_ADDED: &str = "{DefinitionType} {Identifier} has been added";
pub const ITEM_REMOVED: &str = "{DefinitionType} {Identifier} has been removed";
pub const ACCESS_CHANGED: &str =
    "{DefinitionType} {Identifier} has changed access modifiers from {OldValue} to {NewValue}";
pub const MODIFIERS_CHANGED: &str =
    "{DefinitionType} {Identifier} has changed modifiers from {OldValue} to {NewValue}";
pub const KIND_CHANGED: &str = "{DefinitionType} {Identifier} has changed from {OldValue} to {NewValue}";
pub const NAMESPACE_CHANGED: &str =
    "{DefinitionType} {Identifier} has moved from namespace {OldValue} to {NewValue}";
pub const TYPE_CHANGED: &str =
    "{DefinitionType} {Identifier} has changed type from {OldValue} to {NewValue}";
pub const RETURN_TYPE_CHANGED: &str =
    "{DefinitionType} {Identifier} has changed return type from {OldValue} to {NewValue}";
pub const RENAMED: &str = "{DefinitionType} {Identifier} has been renamed to {NewValue}";
pub const GENERIC_ARITY_CHANGED: &str = "{DefinitionType} {Identifier} has changed the number of generic type parameters from {OldValue} to {NewValue}";
pub const CONSTRAINT_ADDED: &str = "{DefinitionType} {Identifier} has added constraint {NewValue}";
pub const CONSTRAINT_REMOVED: &str =
    "{DefinitionType} {Identifier} has removed constraint {OldValue}";
pub const IMPLEMENTED_TYPE_ADDED: &str =
    "{DefinitionType} {Identifier} has added implemented type {NewValue}";
pub const IMPLEMENTED_TYPE_REMOVED: &str =
    "{DefinitionType} {Identifier} has removed implemented type {OldValue}";
pub const UNDERLYING_TYPE_CHANGED: &str =
    "{DefinitionType} {Identifier} has changed underlying type from {OldValue} to {NewValue}";
pub const VALUE_CHANGED: &str =
    "{DefinitionType} {Identifier} has changed value from {OldValue} to {NewValue}";
pub const PARAMETER_COUNT_CHANGED: &str =
    "{DefinitionType} {Identifier} has changed the number of parameters from {OldValue} to {NewValue}";
pub const PARAMETER_RENAMED: &str =
    "{DefinitionType} {Identifier} has been renamed from {OldValue} to {NewValue}";
pub const DEFAULT_VALUE_ADDED: &str =
    "{DefinitionType} {Identifier} has added the default value {NewValue}";
pub const DEFAULT_VALUE_REMOVED: &str =
    "{DefinitionType} {Identifier} has removed the default value {OldValue}";
pub const DEFAULT_VALUE_CHANGED: &str =
    "{DefinitionType} {Identifier} has changed the default value from {OldValue} to {NewValue}";
pub const BODY_ADDED: &str = "{DefinitionType} {Identifier} has added a default implementation";
pub const BODY_REMOVED: &str =
    "{DefinitionType} {Identifier} has removed its default implementation";
pub const ARGUMENT_COUNT_CHANGED: &str =
    "{DefinitionType} {Identifier} has changed the number of ordinal arguments from {OldValue} to {NewValue}";

/// Template plus the values a formatter substitutes into it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatArguments {
    pub message_format: String,
    pub identifier: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl FormatArguments {
    pub fn new(message_format: &str, identifier: impl Into<String>) -> Self {
        Self {
            message_format: message_format.to_string(),
            identifier: identifier.into(),
            old_value: None,
            new_value: None,
        }
    }

    pub fn with_old(mut self, value: impl Into<String>) -> Self {
        self.old_value = Some(value.into());
        self
    }

    pub fn with_new(mut self, value: impl Into<String>) -> Self {
        self.new_value = Some(value.into());
        self
    }

    pub fn with_values(self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.with_old(old).with_new(new)
    }
}

/// Renders [`FormatArguments`] into message text.
pub trait MessageFormatter: Send + Sync + Debug {
    fn format_item(&self, definition_type: &str, arguments: &FormatArguments) -> String;
}

fn render(
    definition_type: &str,
    arguments: &FormatArguments,
    decorate: impl Fn(&str) -> String,
) -> String {
    let value = |v: &Option<String>| match v.as_deref() {
        Some("") | None => decorate("(none)"),
        Some(text) => decorate(text),
    };
    arguments
        .message_format
        .replace("{DefinitionType}", definition_type)
        .replace("{Identifier}", &decorate(&arguments.identifier))
        .replace("{OldValue}", &value(&arguments.old_value))
        .replace("{NewValue}", &value(&arguments.new_value))
}

/// Plain text with values in single quotes.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultMessageFormatter;

impl MessageFormatter for DefaultMessageFormatter {
    fn format_item(&self, definition_type: &str, arguments: &FormatArguments) -> String {
        render(definition_type, arguments, |text| format!("'{}'", text))
    }
}

/// Markdown with identifiers and values as inline code.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownMessageFormatter;

impl MessageFormatter for MarkdownMessageFormatter {
    fn format_item(&self, definition_type: &str, arguments: &FormatArguments) -> String {
        render(definition_type, arguments, |text| format!("`{}`", text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formatter() {
        let arguments = FormatArguments::new(ACCESS_CHANGED, "Ns.Type.Value")
            .with_values("public", "private");
        assert_eq!(
            DefaultMessageFormatter.format_item("Field", &arguments),
            "Field 'Ns.Type.Value' has changed access modifiers from 'public' to 'private'"
        );
    }

    #[test]
    fn test_markdown_formatter() {
        let arguments = FormatArguments::new(ITEM_ADDED, "Ns.Type.Run()");
        assert_eq!(
            MarkdownMessageFormatter.format_item("Method", &arguments),
            "Method `Ns.Type.Run()` has been added"
        );
    }

    #[test]
    fn test_empty_value_renders_placeholder() {
        let arguments =
            FormatArguments::new(MODIFIERS_CHANGED, "Ns.Type").with_values("", "sealed");
        assert_eq!(
            DefaultMessageFormatter.format_item("Class", &arguments),
            "Class 'Ns.Type' has changed modifiers from '(none)' to 'sealed'"
        );
    }
}
