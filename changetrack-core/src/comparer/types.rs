use super::constraints::{compare_constraints, GenericSignature};
use super::generics::{compact, GenericRenames};
use super::members::{
    ConstructorComparer, EnumMemberComparer, FieldComparer, MethodComparer, PropertyComparer,
};
use super::{compare_element, ComparerOptions, ItemComparer, ResultBuilder};
use crate::matching::{ItemMatch, MatchEvaluator, MethodEvaluator, NameEvaluator, TypeEvaluator};
use crate::message::{
    FormatArguments, GENERIC_ARITY_CHANGED, IMPLEMENTED_TYPE_ADDED, IMPLEMENTED_TYPE_REMOVED,
    KIND_CHANGED, MODIFIERS_CHANGED, NAMESPACE_CHANGED, UNDERLYING_TYPE_CHANGED,
};
use crate::model::{Item, TypeDefinition, TypeKind};
use crate::results::{ComparisonResult, SemVerChangeType};
use crate::tables::{CLASS_MODIFIERS, STRUCT_MODIFIERS};

const DEFAULT_ENUM_UNDERLYING_TYPE: &str = "int";

/// Compares two matched types and recurses into their members and nested
/// types.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeComparer;

impl ItemComparer<TypeDefinition> for TypeComparer {
    fn compare_match<'a>(
        &self,
        item: ItemMatch<'a, TypeDefinition>,
        options: &ComparerOptions,
    ) -> Vec<ComparisonResult<'a>> {
        let (old, new) = (item.old, item.new);
        let mut descend = false;

        let mut results = compare_element(item, options, |builder| {
            compare_namespace(old, new, builder);
            if !old.kind.same_kind(&new.kind) {
                builder.changed(
                    old.declaration(),
                    new.declaration(),
                    SemVerChangeType::Breaking,
                    FormatArguments::new(KIND_CHANGED, old.full_name())
                        .with_values(old.kind.keyword(), new.kind.keyword()),
                );
                builder.exit_node_analysis();
                return;
            }
            compare_type(old, new, builder);
            descend = true;
        });

        if descend {
            let mut builder = ResultBuilder::new(options);
            compare_members(old, new, &mut builder);
            results.extend(builder.finish());
        }
        results
    }
}

/// Nested types follow their enclosing type, so only a top-level type can
/// move between namespaces.
fn compare_namespace<'a>(
    old: &'a TypeDefinition,
    new: &'a TypeDefinition,
    builder: &mut ResultBuilder<'a, '_>,
) {
    if !old.is_top_level() || old.namespace == new.namespace {
        return;
    }
    builder.changed(
        old.declaration(),
        new.declaration(),
        SemVerChangeType::Breaking,
        FormatArguments::new(NAMESPACE_CHANGED, old.full_name())
            .with_values(&old.namespace, &new.namespace),
    );
}

fn compare_type<'a>(
    old: &'a TypeDefinition,
    new: &'a TypeDefinition,
    builder: &mut ResultBuilder<'a, '_>,
) {
    let (old_item, new_item) = (old.declaration(), new.declaration());
    let identifier = old.full_name();

    match (&old.kind, &new.kind) {
        (TypeKind::Class(before), TypeKind::Class(after)) => builder.changed(
            old_item,
            new_item,
            CLASS_MODIFIERS.calculate_change(*before, *after),
            FormatArguments::new(MODIFIERS_CHANGED, identifier)
                .with_values(before.as_str(), after.as_str()),
        ),
        (TypeKind::Struct(before), TypeKind::Struct(after)) => builder.changed(
            old_item,
            new_item,
            STRUCT_MODIFIERS.calculate_change(*before, *after),
            FormatArguments::new(MODIFIERS_CHANGED, identifier)
                .with_values(before.as_str(), after.as_str()),
        ),
        (
            TypeKind::Enum {
                underlying_type: before,
            },
            TypeKind::Enum {
                underlying_type: after,
            },
        ) => {
            let before = before.as_deref().unwrap_or(DEFAULT_ENUM_UNDERLYING_TYPE);
            let after = after.as_deref().unwrap_or(DEFAULT_ENUM_UNDERLYING_TYPE);
            if compact(before) != compact(after) {
                builder.changed(
                    old_item,
                    new_item,
                    SemVerChangeType::Breaking,
                    FormatArguments::new(UNDERLYING_TYPE_CHANGED, identifier)
                        .with_values(before, after),
                );
            }
        }
        _ => {}
    }

    let renames = GenericRenames::for_types(old, new);
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

    let old_implemented: Vec<String> = old
        .implemented_types
        .iter()
        .map(|t| compact(&renames.map_type(t)))
        .collect();
    let new_implemented: Vec<String> = new.implemented_types.iter().map(|t| compact(t)).collect();

    for (text, key) in old.implemented_types.iter().zip(&old_implemented) {
        if !new_implemented.contains(key) {
            builder.changed(
                old_item,
                new_item,
                SemVerChangeType::Breaking,
                FormatArguments::new(IMPLEMENTED_TYPE_REMOVED, identifier).with_old(text),
            );
        }
    }
    for (text, key) in new.implemented_types.iter().zip(&new_implemented) {
        if !old_implemented.contains(key) {
            builder.changed(
                old_item,
                new_item,
                SemVerChangeType::Breaking,
                FormatArguments::new(IMPLEMENTED_TYPE_ADDED, identifier).with_new(text),
            );
        }
    }
}

fn compare_members<'a>(
    old: &'a TypeDefinition,
    new: &'a TypeDefinition,
    builder: &mut ResultBuilder<'a, '_>,
) {
    builder.compare_matched(NameEvaluator.match_items(&old.fields, &new.fields), &FieldComparer);
    builder.compare_matched(
        NameEvaluator.match_items(&old.properties, &new.properties),
        &PropertyComparer,
    );
    builder.compare_matched(
        MethodEvaluator.match_items(&old.constructors, &new.constructors),
        &ConstructorComparer,
    );
    builder.compare_matched(
        MethodEvaluator.match_items(&old.methods, &new.methods),
        &MethodComparer::for_type(new),
    );
    builder.compare_matched(
        NameEvaluator.match_items(&old.enum_members, &new.enum_members),
        &EnumMemberComparer,
    );
    builder.compare_matched(
        TypeEvaluator::nested().match_items(&old.child_types, &new.child_types),
        &TypeComparer,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DeclarationForest, EnumMemberBuilder, FieldBuilder, MethodBuilder, TypeBuilder,
    };

    fn forest(builder: TypeBuilder) -> DeclarationForest {
        DeclarationForest::from_builders(vec![builder]).unwrap()
    }

    fn compare<'a>(old: &'a DeclarationForest, new: &'a DeclarationForest) -> Vec<ComparisonResult<'a>> {
        TypeComparer.compare_match(
            ItemMatch::new(&old.types[0], &new.types[0]),
            &ComparerOptions::default(),
        )
    }

    fn kinds(results: &[ComparisonResult<'_>]) -> Vec<SemVerChangeType> {
        results.iter().map(|r| r.change_type).collect()
    }

    #[test]
    fn test_kind_change_stops_analysis() {
        let old = forest(
            TypeBuilder::class("Point")
                .in_namespace("Geo")
                .modifiers(["public"])
                .field(FieldBuilder::new("int", "X").modifiers(["public"])),
        );
        let new = forest(TypeBuilder::struct_type("Point").in_namespace("Geo").modifiers(["public"]));

        let results = compare(&old, &new);
        assert_eq!(kinds(&results), vec![SemVerChangeType::Breaking]);
        assert_eq!(
            results[0].message,
            "Class 'Geo.Point' has changed from 'class' to 'struct'"
        );
    }

    #[test]
    fn test_move_reported_before_kind_change() {
        let old = forest(TypeBuilder::class("Point").in_namespace("Geo").modifiers(["public"]));
        let new = forest(TypeBuilder::struct_type("Point").in_namespace("Maps").modifiers(["public"]));

        let results = compare(&old, &new);
        let messages: Vec<_> = results.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Class 'Geo.Point' has moved from namespace 'Geo' to 'Maps'",
                "Class 'Geo.Point' has changed from 'class' to 'struct'",
            ]
        );
    }

    #[test]
    fn test_sealed_added() {
        let old = forest(TypeBuilder::class("Service").modifiers(["public"]));
        let new = forest(TypeBuilder::class("Service").modifiers(["public", "sealed"]));
        assert_eq!(kinds(&compare(&old, &new)), vec![SemVerChangeType::Breaking]);
    }

    #[test]
    fn test_member_changes_are_reported() {
        let old = forest(
            TypeBuilder::class("Service")
                .in_namespace("App")
                .modifiers(["public"])
                .method(MethodBuilder::new("void", "Start").modifiers(["public"])),
        );
        let new = forest(
            TypeBuilder::class("Service")
                .in_namespace("App")
                .modifiers(["public"])
                .method(MethodBuilder::new("void", "Start").modifiers(["public"]))
                .method(MethodBuilder::new("void", "Stop").modifiers(["public"])),
        );

        let results = compare(&old, &new);
        assert_eq!(kinds(&results), vec![SemVerChangeType::Feature]);
        assert_eq!(results[0].message, "Method 'App.Service.Stop' has been added");
    }

    #[test]
    fn test_internal_types_are_ignored() {
        let old = forest(TypeBuilder::class("Helper").field(FieldBuilder::new("int", "Count")));
        let new = forest(TypeBuilder::class("Helper"));
        assert!(compare(&old, &new).is_empty());
    }

    #[test]
    fn test_implemented_type_rename_aware() {
        let old = forest(
            TypeBuilder::class("Repository")
                .modifiers(["public"])
                .generic_parameters(["T"])
                .implements("IRepository<T>"),
        );
        let new = forest(
            TypeBuilder::class("Repository")
                .modifiers(["public"])
                .generic_parameters(["TEntity"])
                .implements("IRepository<TEntity>")
                .implements("IDisposable"),
        );

        let results = compare(&old, &new);
        assert_eq!(kinds(&results), vec![SemVerChangeType::Breaking]);
        assert!(results[0].message.contains("'IDisposable'"));
    }

    #[test]
    fn test_enum_value_and_underlying_type() {
        let old = forest(
            TypeBuilder::enum_type("Color")
                .modifiers(["public"])
                .enum_member(EnumMemberBuilder::new("Red"))
                .enum_member(EnumMemberBuilder::new("Green")),
        );
        let new = forest(
            TypeBuilder::enum_type("Color")
                .modifiers(["public"])
                .underlying_type("byte")
                .enum_member(EnumMemberBuilder::new("Green"))
                .enum_member(EnumMemberBuilder::new("Red")),
        );

        let results = compare(&old, &new);
        assert_eq!(
            kinds(&results),
            vec![
                SemVerChangeType::Breaking,
                SemVerChangeType::Breaking,
                SemVerChangeType::Breaking
            ]
        );
        assert!(results[0].message.contains("from 'int' to 'byte'"));
    }

    #[test]
    fn test_nested_type_removed() {
        let old = forest(
            TypeBuilder::class("Outer")
                .modifiers(["public"])
                .child(TypeBuilder::class("Inner").modifiers(["public"])),
        );
        let new = forest(TypeBuilder::class("Outer").modifiers(["public"]));

        let results = compare(&old, &new);
        assert_eq!(kinds(&results), vec![SemVerChangeType::Breaking]);
        assert_eq!(results[0].message, "Class 'Outer+Inner' has been removed");
    }
}
