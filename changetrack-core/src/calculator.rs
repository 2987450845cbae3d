//! Entry point comparing two declaration forests.

use std::time::Instant;

use tracing::{debug, info};

use crate::comparer::{ComparerOptions, ResultBuilder, TypeComparer};
use crate::matching::{MatchEvaluator, TypeEvaluator};
use crate::model::DeclarationForest;
use crate::results::ChangeCalculatorResult;

/// Compare an old and a new API surface.
///
/// Top-level types are paired by identity and namespace moves, and every pair
/// is compared recursively. The result carries every explained change and the
/// highest severity among them. Comparing a forest with itself yields no
/// results.
pub fn calculate_changes<'a>(
    old: &'a DeclarationForest,
    new: &'a DeclarationForest,
    options: &ComparerOptions,
) -> ChangeCalculatorResult<'a> {
    let start = Instant::now();
    debug!(
        old_types = old.type_count(),
        new_types = new.type_count(),
        "Calculating changes"
    );

    let mut builder = ResultBuilder::new(options);
    let matches = TypeEvaluator::top_level().match_items(&old.types, &new.types);
    builder.compare_matched(matches, &TypeComparer);

    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    let result = ChangeCalculatorResult::new(builder.into_aggregator(), duration_ms);
    info!(
        change_type = %result.change_type,
        summary = %result.summary.text(),
        duration_ms,
        "Calculated changes"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        FieldBuilder, MethodBuilder, ParameterBuilder, PropertyBuilder, TypeBuilder,
    };
    use crate::results::SemVerChangeType;

    fn service() -> TypeBuilder {
        TypeBuilder::class("OrderService")
            .in_namespace("Shop")
            .modifiers(["public"])
            .field(FieldBuilder::new("int", "MaxItems").modifiers(["public", "const"]))
            .property(PropertyBuilder::new("string", "Name").modifiers(["public"]).get_set())
            .method(
                MethodBuilder::new("Order", "Find")
                    .modifiers(["public"])
                    .parameter(ParameterBuilder::new("int", "id")),
            )
    }

    fn forest(builders: Vec<TypeBuilder>) -> DeclarationForest {
        DeclarationForest::from_builders(builders).unwrap()
    }

    #[test]
    fn test_identical_forests_have_no_changes() {
        let old = forest(vec![service()]);
        let new = forest(vec![service()]);

        let result = calculate_changes(&old, &new, &ComparerOptions::default());
        assert_eq!(result.change_type, SemVerChangeType::None);
        assert!(!result.has_changes());
    }

    #[test]
    fn test_forest_compared_with_itself() {
        let old = forest(vec![service(), TypeBuilder::interface("IClock").modifiers(["public"])]);
        let result = calculate_changes(&old, &old, &ComparerOptions::default());
        assert!(result.results.is_empty());
    }

    #[test]
    fn test_type_added_and_removed() {
        let old = forest(vec![
            service(),
            TypeBuilder::class("Legacy").in_namespace("Shop").modifiers(["public"]),
        ]);
        let new = forest(vec![
            service(),
            TypeBuilder::class("Basket").in_namespace("Shop").modifiers(["public"]),
        ]);

        let result = calculate_changes(&old, &new, &ComparerOptions::default());
        assert_eq!(result.change_type, SemVerChangeType::Breaking);
        assert_eq!(result.summary.breaking, 1);
        assert_eq!(result.summary.feature, 1);
        assert_eq!(result.results[0].message, "Class 'Shop.Legacy' has been removed");
        assert_eq!(result.results[1].message, "Class 'Shop.Basket' has been added");
    }

    #[test]
    fn test_moved_type() {
        let old = forest(vec![service()]);
        let new = forest(vec![service().in_namespace("Shop.Orders")]);

        let result = calculate_changes(&old, &new, &ComparerOptions::default());
        assert_eq!(result.change_type, SemVerChangeType::Breaking);
        assert_eq!(result.results.len(), 1);
        assert_eq!(
            result.results[0].message,
            "Class 'Shop.OrderService' has moved from namespace 'Shop' to 'Shop.Orders'"
        );
    }

    #[test]
    fn test_feature_only() {
        let old = forest(vec![service()]);
        let new = forest(vec![service().method(
            MethodBuilder::new("void", "Cancel")
                .modifiers(["public"])
                .parameter(ParameterBuilder::new("int", "id")),
        )]);

        let result = calculate_changes(&old, &new, &ComparerOptions::default());
        assert_eq!(result.change_type, SemVerChangeType::Feature);
        assert_eq!(result.summary.feature, 1);
    }
}
