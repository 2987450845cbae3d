use super::generics::{compact, GenericRenames};
use super::ResultBuilder;
use crate::message::{FormatArguments, CONSTRAINT_ADDED, CONSTRAINT_REMOVED};
use crate::model::{ConstraintListDefinition, Item};
use crate::results::SemVerChangeType;

/// Generic parameter lists and constraint lists of a matched pair.
pub(crate) struct GenericSignature<'a> {
    pub(crate) parameters: &'a [String],
    pub(crate) constraints: &'a [ConstraintListDefinition],
}

/// Compare constraint lists parameter by parameter. Lists are paired through
/// the position of their parameter, so renaming `T` keeps its constraints
/// paired. Callers only compare signatures with equal generic arity.
pub(crate) fn compare_constraints<'a>(
    old: GenericSignature<'a>,
    new: GenericSignature<'a>,
    renames: &GenericRenames<'_>,
    builder: &mut ResultBuilder<'a, '_>,
) {
    let mut paired_new = Vec::new();

    for old_list in old.constraints {
        let counterpart = old
            .parameters
            .iter()
            .position(|p| *p == old_list.item.name)
            .and_then(|position| new.parameters.get(position))
            .and_then(|name| {
                new.constraints
                    .iter()
                    .enumerate()
                    .find(|(_, list)| list.item.name == *name)
            });

        let Some((new_index, new_list)) = counterpart else {
            builder.removed(old_list.declaration(), SemVerChangeType::Breaking);
            continue;
        };
        paired_new.push(new_index);

        let old_constraints: Vec<String> = old_list
            .constraints
            .iter()
            .map(|c| compact(&renames.map_type(c)))
            .collect();
        let new_constraints: Vec<String> = new_list.constraints.iter().map(|c| compact(c)).collect();

        for (constraint, key) in new_list.constraints.iter().zip(&new_constraints) {
            if !old_constraints.contains(key) {
                builder.changed(
                    old_list.declaration(),
                    new_list.declaration(),
                    SemVerChangeType::Breaking,
                    FormatArguments::new(CONSTRAINT_ADDED, old_list.full_name()).with_new(constraint),
                );
            }
        }
        for (constraint, key) in old_list.constraints.iter().zip(&old_constraints) {
            if !new_constraints.contains(key) {
                builder.changed(
                    old_list.declaration(),
                    new_list.declaration(),
                    SemVerChangeType::Feature,
                    FormatArguments::new(CONSTRAINT_REMOVED, old_list.full_name())
                        .with_old(constraint),
                );
            }
        }
    }

    for (index, new_list) in new.constraints.iter().enumerate() {
        if !paired_new.contains(&index) {
            builder.added(new_list.declaration(), SemVerChangeType::Breaking);
        }
    }
}
