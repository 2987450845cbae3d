use super::attributes::compare_attributes;
use super::generics::GenericRenames;
use super::ResultBuilder;
use crate::message::{
    FormatArguments, DEFAULT_VALUE_ADDED, DEFAULT_VALUE_CHANGED, DEFAULT_VALUE_REMOVED,
    MODIFIERS_CHANGED, PARAMETER_COUNT_CHANGED, PARAMETER_RENAMED, TYPE_CHANGED,
};
use crate::model::{Declaration, Item, ParameterDefinition};
use crate::results::SemVerChangeType;
use crate::tables::PARAMETER_MODIFIERS;

/// Compare parameter lists position by position.
pub(crate) fn compare_parameters<'a>(
    old_owner: Declaration<'a>,
    new_owner: Declaration<'a>,
    old: &'a [ParameterDefinition],
    new: &'a [ParameterDefinition],
    renames: &GenericRenames<'_>,
    builder: &mut ResultBuilder<'a, '_>,
) {
    if old.len() != new.len() {
        builder.changed(
            old_owner,
            new_owner,
            SemVerChangeType::Breaking,
            FormatArguments::new(PARAMETER_COUNT_CHANGED, old_owner.full_name())
                .with_values(old.len().to_string(), new.len().to_string()),
        );
    }

    for (old, new) in old.iter().zip(new) {
        compare_parameter(old, new, renames, builder);
    }
}

fn compare_parameter<'a>(
    old: &'a ParameterDefinition,
    new: &'a ParameterDefinition,
    renames: &GenericRenames<'_>,
    builder: &mut ResultBuilder<'a, '_>,
) {
    let (old_item, new_item) = (old.declaration(), new.declaration());
    let identifier = old.full_name();

    if !renames.is_equivalent(&old.parameter_type, &new.parameter_type) {
        builder.changed(
            old_item,
            new_item,
            SemVerChangeType::Breaking,
            FormatArguments::new(TYPE_CHANGED, identifier)
                .with_values(&old.parameter_type, &new.parameter_type),
        );
    }

    // Callers using named arguments bind to the parameter name.
    if old.item.name != new.item.name {
        builder.changed(
            old_item,
            new_item,
            SemVerChangeType::Breaking,
            FormatArguments::new(PARAMETER_RENAMED, identifier)
                .with_values(&old.item.name, &new.item.name),
        );
    }

    builder.changed(
        old_item,
        new_item,
        PARAMETER_MODIFIERS.calculate_change(old.modifier, new.modifier),
        FormatArguments::new(MODIFIERS_CHANGED, identifier)
            .with_values(old.modifier.as_str(), new.modifier.as_str()),
    );

    match (&old.default_value, &new.default_value) {
        (None, Some(value)) => builder.changed(
            old_item,
            new_item,
            SemVerChangeType::Feature,
            FormatArguments::new(DEFAULT_VALUE_ADDED, identifier).with_new(value.trim()),
        ),
        (Some(value), None) => builder.changed(
            old_item,
            new_item,
            SemVerChangeType::Breaking,
            FormatArguments::new(DEFAULT_VALUE_REMOVED, identifier).with_old(value.trim()),
        ),
        (Some(old_value), Some(new_value)) if old_value.trim() != new_value.trim() => builder
            .changed(
                old_item,
                new_item,
                SemVerChangeType::Breaking,
                FormatArguments::new(DEFAULT_VALUE_CHANGED, identifier)
                    .with_values(old_value.trim(), new_value.trim()),
            ),
        _ => {}
    }

    compare_attributes(&old.attributes, &new.attributes, builder);
}
