use tracing::debug;

use super::{MatchEvaluator, MatchResults, Pairing};
use crate::model::Item;

/// Pairs items with equal names. Used for fields, properties, accessors, enum
/// members, attributes and attribute arguments.
#[derive(Clone, Copy, Debug, Default)]
pub struct NameEvaluator;

impl<T: Item> MatchEvaluator<T> for NameEvaluator {
    fn find_matches<'a>(&self, old: Vec<&'a T>, new: Vec<&'a T>) -> MatchResults<'a, T> {
        let mut pairing = Pairing::new(old, new);
        pairing.pair_first_by(|item| item.match_name().to_string());
        let results = pairing.finish();
        debug!(
            matched = results.matches.len(),
            added = results.items_added.len(),
            removed = results.items_removed.len(),
            "Matched items by name"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeBuilder, AttributeDefinition};

    fn attributes(names: &[&str]) -> Vec<AttributeDefinition> {
        names
            .iter()
            .map(|n| AttributeBuilder::new(*n).build("Ns.Type"))
            .collect()
    }

    #[test]
    fn test_attribute_names_ignore_suffix_and_namespace() {
        let old = attributes(&["Obsolete", "DataMember"]);
        let new = attributes(&["System.Runtime.Serialization.DataMemberAttribute", "Serializable"]);

        let results = NameEvaluator.match_items(&old, &new);
        assert_eq!(results.matches.len(), 1);
        assert_eq!(results.matches[0].old.item.name, "DataMember");
        assert_eq!(results.items_removed[0].item.name, "Obsolete");
        assert_eq!(results.items_added[0].item.name, "Serializable");
    }

    #[test]
    fn test_duplicates_pair_first_come() {
        let old = attributes(&["Flag", "Flag"]);
        let new = attributes(&["Flag"]);

        let results = NameEvaluator.match_items(&old, &new);
        assert_eq!(results.matches.len(), 1);
        assert!(std::ptr::eq(results.matches[0].old, &old[0]));
        assert!(std::ptr::eq(results.items_removed[0], &old[1]));
    }
}
