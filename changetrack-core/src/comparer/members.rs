use super::constraints::{compare_constraints, GenericSignature};
use super::generics::GenericRenames;
use super::parameters::compare_parameters;
use super::{compare_element, ComparerOptions, ItemComparer};
use crate::matching::{ItemMatch, MatchEvaluator, NameEvaluator};
use crate::message::{
    FormatArguments, BODY_ADDED, BODY_REMOVED, GENERIC_ARITY_CHANGED, MODIFIERS_CHANGED, RENAMED,
    RETURN_TYPE_CHANGED, TYPE_CHANGED, VALUE_CHANGED,
};
use crate::model::{
    ConstructorDefinition, EnumMemberDefinition, FieldDefinition, Item, MethodDefinition,
    PropertyAccessorDefinition, PropertyDefinition, TypeDefinition, TypeKind,
};
use crate::results::{ComparisonResult, SemVerChangeType};
use crate::tables::{FIELD_MODIFIERS, METHOD_MODIFIERS, PROPERTY_MODIFIERS};

#[derive(Clone, Copy, Debug, Default)]
pub struct FieldComparer;

impl ItemComparer<FieldDefinition> for FieldComparer {
    fn compare_match<'a>(
        &self,
        item: ItemMatch<'a, FieldDefinition>,
        options: &ComparerOptions,
    ) -> Vec<ComparisonResult<'a>> {
        let (old, new) = (item.old, item.new);
        compare_element(item, options, |builder| {
            let renames =
                GenericRenames::for_members(&old.element.item, &[], &new.element.item, &[]);
            if !renames.is_equivalent(&old.field_type, &new.field_type) {
                builder.changed(
                    old.declaration(),
                    new.declaration(),
                    SemVerChangeType::Breaking,
                    FormatArguments::new(TYPE_CHANGED, old.full_name())
                        .with_values(&old.field_type, &new.field_type),
                );
            }
            builder.changed(
                old.declaration(),
                new.declaration(),
                FIELD_MODIFIERS.calculate_change(old.modifiers, new.modifiers),
                FormatArguments::new(MODIFIERS_CHANGED, old.full_name())
                    .with_values(old.modifiers.as_str(), new.modifiers.as_str()),
            );
        })
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PropertyComparer;

impl ItemComparer<PropertyDefinition> for PropertyComparer {
    fn compare_match<'a>(
        &self,
        item: ItemMatch<'a, PropertyDefinition>,
        options: &ComparerOptions,
    ) -> Vec<ComparisonResult<'a>> {
        let (old, new) = (item.old, item.new);
        compare_element(item, options, |builder| {
            let renames =
                GenericRenames::for_members(&old.element.item, &[], &new.element.item, &[]);
            if !renames.is_equivalent(&old.property_type, &new.property_type) {
                builder.changed(
                    old.declaration(),
                    new.declaration(),
                    SemVerChangeType::Breaking,
                    FormatArguments::new(TYPE_CHANGED, old.full_name())
                        .with_values(&old.property_type, &new.property_type),
                );
            }
            builder.changed(
                old.declaration(),
                new.declaration(),
                PROPERTY_MODIFIERS.calculate_change(old.modifiers, new.modifiers),
                FormatArguments::new(MODIFIERS_CHANGED, old.full_name())
                    .with_values(old.modifiers.as_str(), new.modifiers.as_str()),
            );

            let accessors = NameEvaluator.match_items(&old.accessors, &new.accessors);
            builder.compare_matched(accessors, &PropertyAccessorComparer);
        })
    }
}

/// Accessor level changes are classified by the accessor table. Gaining or
/// losing visibility is handled by the shared template.
#[derive(Clone, Copy, Debug, Default)]
pub struct PropertyAccessorComparer;

impl ItemComparer<PropertyAccessorDefinition> for PropertyAccessorComparer {
    fn compare_match<'a>(
        &self,
        item: ItemMatch<'a, PropertyAccessorDefinition>,
        options: &ComparerOptions,
    ) -> Vec<ComparisonResult<'a>> {
        compare_element(item, options, |_| {})
    }
}

/// Compares methods. Methods declared in interfaces additionally report
/// gaining or losing a default implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct MethodComparer {
    in_interface: bool,
}

impl MethodComparer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_type(declaring_type: &TypeDefinition) -> Self {
        Self {
            in_interface: matches!(declaring_type.kind, TypeKind::Interface),
        }
    }
}

impl ItemComparer<MethodDefinition> for MethodComparer {
    fn compare_match<'a>(
        &self,
        item: ItemMatch<'a, MethodDefinition>,
        options: &ComparerOptions,
    ) -> Vec<ComparisonResult<'a>> {
        let (old, new) = (item.old, item.new);
        let (old_item, new_item) = (old.declaration(), new.declaration());
        let identifier = old.full_name();

        compare_element(item, options, |builder| {
            if old.element.item.raw_name != new.element.item.raw_name {
                builder.changed(
                    old_item,
                    new_item,
                    SemVerChangeType::Breaking,
                    FormatArguments::new(RENAMED, identifier).with_new(&new.element.item.raw_name),
                );
            }

            builder.changed(
                old_item,
                new_item,
                METHOD_MODIFIERS.calculate_change(old.modifiers, new.modifiers),
                FormatArguments::new(MODIFIERS_CHANGED, identifier)
                    .with_values(old.modifiers.as_str(), new.modifiers.as_str()),
            );

            let renames = GenericRenames::for_members(
                &old.element.item,
                &old.generic_type_parameters,
                &new.element.item,
                &new.generic_type_parameters,
            );
            if !renames.is_equivalent(&old.return_type, &new.return_type) {
                builder.changed(
                    old_item,
                    new_item,
                    SemVerChangeType::Breaking,
                    FormatArguments::new(RETURN_TYPE_CHANGED, identifier)
                        .with_values(&old.return_type, &new.return_type),
                );
            }

            if old.generic_type_parameters.len() != new.generic_type_parameters.len() {
                builder.changed(
                    old_item,
                    new_item,
                    SemVerChangeType::Breaking,
                    FormatArguments::new(GENERIC_ARITY_CHANGED, identifier).with_values(
                        old.generic_type_parameters.len().to_string(),
                        new.generic_type_parameters.len().to_string(),
                    ),
                );
            } else {
                compare_constraints(
                    GenericSignature {
                        parameters: &old.generic_type_parameters,
                        constraints: &old.generic_constraints,
                    },
                    GenericSignature {
                        parameters: &new.generic_type_parameters,
                        constraints: &new.generic_constraints,
                    },
                    &renames,
                    builder,
                );
            }

            compare_parameters(
                old_item,
                new_item,
                &old.parameters,
                &new.parameters,
                &renames,
                builder,
            );

            if self.in_interface && old.has_body != new.has_body {
                let (change, message) = if new.has_body {
                    (SemVerChangeType::Feature, BODY_ADDED)
                } else {
                    (SemVerChangeType::Breaking, BODY_REMOVED)
                };
                builder.changed(
                    old_item,
                    new_item,
                    change,
                    FormatArguments::new(message, identifier),
                );
            }
        })
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConstructorComparer;

impl ItemComparer<ConstructorDefinition> for ConstructorComparer {
    fn compare_match<'a>(
        &self,
        item: ItemMatch<'a, ConstructorDefinition>,
        options: &ComparerOptions,
    ) -> Vec<ComparisonResult<'a>> {
        let (old, new) = (item.old, item.new);
        compare_element(item, options, |builder| {
            let renames =
                GenericRenames::for_members(&old.element.item, &[], &new.element.item, &[]);
            compare_parameters(
                old.declaration(),
                new.declaration(),
                &old.parameters,
                &new.parameters,
                &renames,
                builder,
            );
        })
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EnumMemberComparer;

impl ItemComparer<EnumMemberDefinition> for EnumMemberComparer {
    fn compare_match<'a>(
        &self,
        item: ItemMatch<'a, EnumMemberDefinition>,
        options: &ComparerOptions,
    ) -> Vec<ComparisonResult<'a>> {
        let (old, new) = (item.old, item.new);
        compare_element(item, options, |builder| {
            if old.effective_value != new.effective_value {
                builder.changed(
                    old.declaration(),
                    new.declaration(),
                    SemVerChangeType::Breaking,
                    FormatArguments::new(VALUE_CHANGED, old.full_name())
                        .with_values(&old.effective_value, &new.effective_value),
                );
            }
        })
    }
}
