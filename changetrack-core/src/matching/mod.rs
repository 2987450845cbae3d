//! Match evaluators.
//!
//! An evaluator pairs declarations of the same kind from the old and new
//! forest. Paired items are compared structurally; unpaired old items were
//! removed and unpaired new items were added.

mod methods;
mod names;
mod types;

pub use methods::{MethodEvaluator, Signature};
pub use names::NameEvaluator;
pub use types::TypeEvaluator;

/// An old declaration and the new declaration it corresponds to.
#[derive(Debug)]
pub struct ItemMatch<'a, T> {
    pub old: &'a T,
    pub new: &'a T,
}

impl<T> Clone for ItemMatch<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ItemMatch<'_, T> {}

impl<'a, T> ItemMatch<'a, T> {
    pub fn new(old: &'a T, new: &'a T) -> Self {
        Self { old, new }
    }
}

/// Outcome of pairing two lists, each part in source order.
#[derive(Debug)]
pub struct MatchResults<'a, T> {
    pub matches: Vec<ItemMatch<'a, T>>,
    pub items_added: Vec<&'a T>,
    pub items_removed: Vec<&'a T>,
}

impl<T> Default for MatchResults<'_, T> {
    fn default() -> Self {
        Self {
            matches: Vec::new(),
            items_added: Vec::new(),
            items_removed: Vec::new(),
        }
    }
}

pub trait MatchEvaluator<T> {
    fn find_matches<'a>(&self, old: Vec<&'a T>, new: Vec<&'a T>) -> MatchResults<'a, T>;

    fn match_items<'a>(&self, old: &'a [T], new: &'a [T]) -> MatchResults<'a, T> {
        self.find_matches(old.iter().collect(), new.iter().collect())
    }
}

/// Working state of a multi-pass evaluator.
///
/// Unmatched items keep their source order; matches are reported in the order
/// of the old items they pair.
pub(crate) struct Pairing<'a, T> {
    old: Vec<Option<&'a T>>,
    new: Vec<Option<&'a T>>,
    matched: Vec<(usize, &'a T, &'a T)>,
}

impl<'a, T> Pairing<'a, T> {
    pub(crate) fn new(old: Vec<&'a T>, new: Vec<&'a T>) -> Self {
        Self {
            old: old.into_iter().map(Some).collect(),
            new: new.into_iter().map(Some).collect(),
            matched: Vec::new(),
        }
    }

    pub(crate) fn remaining_old(&self) -> impl Iterator<Item = (usize, &'a T)> + '_ {
        self.old
            .iter()
            .enumerate()
            .filter_map(|(index, item)| item.map(|item| (index, item)))
    }

    pub(crate) fn remaining_new(&self) -> impl Iterator<Item = (usize, &'a T)> + '_ {
        self.new
            .iter()
            .enumerate()
            .filter_map(|(index, item)| item.map(|item| (index, item)))
    }

    pub(crate) fn pair(&mut self, old_index: usize, new_index: usize) {
        if let (Some(old), Some(new)) = (self.old[old_index].take(), self.new[new_index].take()) {
            self.matched.push((old_index, old, new));
        }
    }

    /// Pair first-come on a key, ignoring ambiguity.
    pub(crate) fn pair_first_by<K: PartialEq>(&mut self, key: impl Fn(&T) -> K) {
        for old_index in 0..self.old.len() {
            let Some(old) = self.old[old_index] else {
                continue;
            };
            let old_key = key(old);
            let found = self
                .remaining_new()
                .find(|(_, new)| key(new) == old_key)
                .map(|(index, _)| index);
            if let Some(new_index) = found {
                self.pair(old_index, new_index);
            }
        }
    }

    /// Pair items for which `predicate` singles out exactly one candidate on
    /// each side, repeating until no further pair is found. Returns the number
    /// of pairs made.
    pub(crate) fn pair_unique_by(&mut self, predicate: impl Fn(&T, &T) -> bool) -> usize {
        let mut paired = 0;
        loop {
            let mut candidate = None;
            for (old_index, old) in self.remaining_old() {
                let mut news = self
                    .remaining_new()
                    .filter(|(_, new)| predicate(old, new));
                let Some((new_index, new)) = news.next() else {
                    continue;
                };
                if news.next().is_some() {
                    continue;
                }
                let olds = self
                    .remaining_old()
                    .filter(|(_, other)| predicate(other, new))
                    .count();
                if olds == 1 {
                    candidate = Some((old_index, new_index));
                    break;
                }
            }
            match candidate {
                Some((old_index, new_index)) => {
                    self.pair(old_index, new_index);
                    paired += 1;
                }
                None => return paired,
            }
        }
    }

    pub(crate) fn finish(mut self) -> MatchResults<'a, T> {
        self.matched.sort_by_key(|(index, _, _)| *index);
        MatchResults {
            matches: self
                .matched
                .into_iter()
                .map(|(_, old, new)| ItemMatch::new(old, new))
                .collect(),
            items_added: self.new.into_iter().flatten().collect(),
            items_removed: self.old.into_iter().flatten().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_pairing_skips_ambiguous_items() {
        let old = vec!["a1", "a2", "b1"];
        let new = vec!["a9", "b9"];
        let mut pairing = Pairing::new(old.iter().collect(), new.iter().collect());
        let paired = pairing.pair_unique_by(|o, n| o.as_bytes()[0] == n.as_bytes()[0]);
        assert_eq!(paired, 1);

        let results = pairing.finish();
        assert_eq!(results.matches.len(), 1);
        assert_eq!(*results.matches[0].old, "b1");
        assert_eq!(results.items_removed.len(), 2);
        assert_eq!(*results.items_added[0], "a9");
    }
}
