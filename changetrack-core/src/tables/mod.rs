//! Modifier transition tables.
//!
//! Each table maps an `(old, new)` pair of modifier states to the semantic
//! version impact of moving from one to the other. Tables are authored as
//! literal square matrices over the ordered list of states, built once on
//! first use and shared read-only afterwards.

mod access;
mod members;
mod types;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::results::SemVerChangeType;

pub use access::{ACCESS_MODIFIERS, PROPERTY_ACCESSOR_ACCESS_MODIFIERS};
pub use members::{
    FIELD_MODIFIERS, METHOD_MODIFIERS, PARAMETER_MODIFIERS, PROPERTY_MODIFIERS,
};
pub use types::{CLASS_MODIFIERS, STRUCT_MODIFIERS};

/// Classification of modifier transitions for one state type.
#[derive(Debug)]
pub struct ChangeTable<S> {
    name: &'static str,
    entries: HashMap<(S, S), SemVerChangeType>,
}

impl<S> ChangeTable<S>
where
    S: Copy + Eq + Hash + Debug,
{
    /// Build from a matrix where `matrix[i][j]` classifies `states[i] -> states[j]`.
    pub fn from_matrix<const N: usize>(
        name: &'static str,
        states: [S; N],
        matrix: [[SemVerChangeType; N]; N],
    ) -> Self {
        let mut entries = HashMap::with_capacity(N * N);
        for (row, old) in states.iter().enumerate() {
            for (column, new) in states.iter().enumerate() {
                entries.insert((*old, *new), matrix[row][column]);
            }
        }
        Self { name, entries }
    }

    #[cfg(test)]
    pub(crate) fn from_entries(name: &'static str, entries: &[(S, S, SemVerChangeType)]) -> Self {
        Self {
            name,
            entries: entries
                .iter()
                .map(|(old, new, change)| ((*old, *new), *change))
                .collect(),
        }
    }

    /// Severity of moving from `old` to `new`. Unknown pairs classify as `None`.
    pub fn calculate_change(&self, old: S, new: S) -> SemVerChangeType {
        match self.entries.get(&(old, new)) {
            Some(change) => *change,
            None => {
                debug!(table = self.name, ?old, ?new, "No classification for modifier change");
                SemVerChangeType::None
            }
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
