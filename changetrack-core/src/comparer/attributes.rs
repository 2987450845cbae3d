use super::ResultBuilder;
use crate::matching::{ItemMatch, MatchEvaluator, NameEvaluator};
use crate::message::{FormatArguments, ARGUMENT_COUNT_CHANGED, VALUE_CHANGED};
use crate::model::{AttributeDefinition, Item};
use crate::results::SemVerChangeType;

/// Compare the attributes selected by the options. Any difference in a
/// selected attribute changes how the element behaves at runtime, so every
/// difference is breaking.
pub(crate) fn compare_attributes<'a>(
    old: &'a [AttributeDefinition],
    new: &'a [AttributeDefinition],
    builder: &mut ResultBuilder<'a, '_>,
) {
    let options = builder.options();
    let selected = |attributes: &'a [AttributeDefinition]| -> Vec<&'a AttributeDefinition> {
        attributes
            .iter()
            .filter(|a| options.should_compare_attribute(a))
            .collect()
    };

    let results = NameEvaluator.find_matches(selected(old), selected(new));
    for attribute in results.items_removed {
        builder.removed(attribute.declaration(), SemVerChangeType::Breaking);
    }
    for attribute in results.items_added {
        builder.added(attribute.declaration(), SemVerChangeType::Breaking);
    }
    for item in results.matches {
        compare_arguments(item, builder);
    }
}

fn compare_arguments<'a>(item: ItemMatch<'a, AttributeDefinition>, builder: &mut ResultBuilder<'a, '_>) {
    let old_ordinal: Vec<_> = item.old.ordinal_arguments().collect();
    let new_ordinal: Vec<_> = item.new.ordinal_arguments().collect();

    if old_ordinal.len() != new_ordinal.len() {
        builder.changed(
            item.old.declaration(),
            item.new.declaration(),
            SemVerChangeType::Breaking,
            FormatArguments::new(ARGUMENT_COUNT_CHANGED, item.old.full_name())
                .with_values(old_ordinal.len().to_string(), new_ordinal.len().to_string()),
        );
    } else {
        for (old, new) in old_ordinal.into_iter().zip(new_ordinal) {
            if old.value.trim() != new.value.trim() {
                builder.changed(
                    old.declaration(),
                    new.declaration(),
                    SemVerChangeType::Breaking,
                    FormatArguments::new(VALUE_CHANGED, old.full_name())
                        .with_values(old.value.trim(), new.value.trim()),
                );
            }
        }
    }

    let named = NameEvaluator.find_matches(
        item.old.named_arguments().collect(),
        item.new.named_arguments().collect(),
    );
    for argument in named.items_removed {
        builder.removed(argument.declaration(), SemVerChangeType::Breaking);
    }
    for argument in named.items_added {
        builder.added(argument.declaration(), SemVerChangeType::Breaking);
    }
    for pair in named.matches {
        if pair.old.value.trim() != pair.new.value.trim() {
            builder.changed(
                pair.old.declaration(),
                pair.new.declaration(),
                SemVerChangeType::Breaking,
                FormatArguments::new(VALUE_CHANGED, pair.old.full_name())
                    .with_values(pair.old.value.trim(), pair.new.value.trim()),
            );
        }
    }
}
