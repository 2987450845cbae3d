use tracing::debug;

use super::{MatchEvaluator, MatchResults, Pairing};
use crate::model::TypeDefinition;

/// Pairs types by identity, then looks for types moved to another namespace.
#[derive(Clone, Copy, Debug)]
pub struct TypeEvaluator {
    nested: bool,
}

impl TypeEvaluator {
    /// For namespace-level types, where the namespace is part of identity.
    pub fn top_level() -> Self {
        Self { nested: false }
    }

    /// For the child types of two already matched parents.
    pub fn nested() -> Self {
        Self { nested: true }
    }
}

fn moved(old: &TypeDefinition, new: &TypeDefinition) -> bool {
    old.element.item.raw_name == new.element.item.raw_name
        && old.generic_type_parameters.len() == new.generic_type_parameters.len()
        && old.namespace != new.namespace
}

impl MatchEvaluator<TypeDefinition> for TypeEvaluator {
    fn find_matches<'a>(
        &self,
        old: Vec<&'a TypeDefinition>,
        new: Vec<&'a TypeDefinition>,
    ) -> MatchResults<'a, TypeDefinition> {
        // Nested types are only compared within matched parents, so their
        // enclosing chain already agrees.
        let mut pairing = Pairing::new(old, new);
        pairing.pair_first_by(|t| {
            (
                t.element.item.raw_name.clone(),
                t.generic_type_parameters.len(),
                if self.nested { String::new() } else { t.namespace.clone() },
            )
        });

        if !self.nested {
            let moved_types = pairing.pair_unique_by(moved);
            if moved_types > 0 {
                debug!(moved_types, "Matched types across namespaces");
            }
        }
        pairing.finish()
    }
}
