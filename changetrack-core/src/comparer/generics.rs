//! Generic type parameter rename resolution.
//!
//! Renaming `T` to `TValue` on `Repository<T>` changes the text of every type
//! that mentions it without changing what the type means. Before comparing an
//! old type text with the new one, each identifier naming a generic parameter
//! is rewritten to the parameter at the same position on the new side.

use crate::model::{ItemInfo, TypeDefinition, TypeScope};

/// Generic parameter lists of two matched declarations, innermost scope first.
pub(crate) struct GenericRenames<'s> {
    old: Vec<&'s [String]>,
    new: Vec<&'s [String]>,
}

fn levels<'s>(own: &'s [String], ancestors: &'s [TypeScope]) -> Vec<&'s [String]> {
    std::iter::once(own)
        .chain(
            ancestors
                .iter()
                .rev()
                .map(|scope| scope.generic_type_parameters.as_slice()),
        )
        .collect()
}

impl<'s> GenericRenames<'s> {
    pub(crate) fn new(
        old_own: &'s [String],
        old_ancestors: &'s [TypeScope],
        new_own: &'s [String],
        new_ancestors: &'s [TypeScope],
    ) -> Self {
        Self {
            old: levels(old_own, old_ancestors),
            new: levels(new_own, new_ancestors),
        }
    }

    pub(crate) fn for_types(old: &'s TypeDefinition, new: &'s TypeDefinition) -> Self {
        Self::new(
            &old.generic_type_parameters,
            &old.element.item.ancestors,
            &new.generic_type_parameters,
            &new.element.item.ancestors,
        )
    }

    /// For a member, `own` holds the member's generic parameters (empty for
    /// fields and properties).
    pub(crate) fn for_members(
        old: &'s ItemInfo,
        old_own: &'s [String],
        new: &'s ItemInfo,
        new_own: &'s [String],
    ) -> Self {
        Self::new(old_own, &old.ancestors, new_own, &new.ancestors)
    }

    /// The new name of an old generic parameter, `None` when no enclosing
    /// scope declares it or the new scope has no parameter at that position.
    pub(crate) fn map_name(&self, name: &str) -> Option<&'s str> {
        for (depth, level) in self.old.iter().enumerate() {
            if let Some(position) = level.iter().position(|p| p == name) {
                return self
                    .new
                    .get(depth)
                    .copied()
                    .and_then(|level| level.get(position))
                    .map(String::as_str);
            }
        }
        None
    }

    /// Rewrite every generic parameter identifier in an old type text.
    /// Identifiers after a `.` are member or namespace names and are kept.
    pub(crate) fn map_type(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut output = String::with_capacity(text.len());
        let mut previous: Option<char> = None;
        let mut index = 0;

        while index < chars.len() {
            let c = chars[index];
            if c.is_alphabetic() || c == '_' {
                let start = index;
                while index < chars.len() && (chars[index].is_alphanumeric() || chars[index] == '_')
                {
                    index += 1;
                }
                let token: String = chars[start..index].iter().collect();
                match self.map_name(&token) {
                    Some(mapped) if previous != Some('.') => output.push_str(mapped),
                    _ => output.push_str(&token),
                }
                previous = Some('a');
            } else {
                output.push(c);
                if !c.is_whitespace() {
                    previous = Some(c);
                }
                index += 1;
            }
        }
        output
    }

    /// Whether two type texts name the same type once renames are applied.
    pub(crate) fn is_equivalent(&self, old: &str, new: &str) -> bool {
        compact(&self.map_type(old)) == compact(new)
    }
}

/// Type text without whitespace.
pub(crate) fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(parameters: &[&str]) -> TypeScope {
        TypeScope {
            full_name: String::new(),
            raw_name: String::new(),
            generic_type_parameters: parameters.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_type_parameter_rename() {
        let old_chain = vec![scope(&["T"])];
        let new_chain = vec![scope(&["TValue"])];
        let renames = GenericRenames::new(&[], &old_chain, &[], &new_chain);

        assert!(renames.is_equivalent("T", "TValue"));
        assert!(renames.is_equivalent("List<T>", "List< TValue >"));
        assert!(renames.is_equivalent("Dictionary<string, T[]>", "Dictionary<string,TValue[]>"));
        assert!(!renames.is_equivalent("T", "T"));
    }

    #[test]
    fn test_innermost_scope_wins() {
        let old_own = strings(&["T"]);
        let new_own = strings(&["TItem"]);
        let old_chain = vec![scope(&["T", "U"])];
        let new_chain = vec![scope(&["TOuter", "UOuter"])];
        let renames = GenericRenames::new(&old_own, &old_chain, &new_own, &new_chain);

        assert_eq!(renames.map_name("T"), Some("TItem"));
        assert_eq!(renames.map_name("U"), Some("UOuter"));
        assert_eq!(renames.map_type("Func<T, U>"), "Func<TItem, UOuter>");
    }

    #[test]
    fn test_outer_scopes_are_searched() {
        let old_chain = vec![scope(&["TKey"]), scope(&[])];
        let new_chain = vec![scope(&["K"]), scope(&[])];
        let renames = GenericRenames::new(&[], &old_chain, &[], &new_chain);
        assert!(renames.is_equivalent("IEnumerable<TKey>", "IEnumerable<K>"));
    }

    #[test]
    fn test_unknown_names_and_qualified_members_are_literal() {
        let old_chain = vec![scope(&["T"])];
        let new_chain = vec![scope(&["TValue"])];
        let renames = GenericRenames::new(&[], &old_chain, &[], &new_chain);

        assert_eq!(renames.map_type("Outer.T"), "Outer.T");
        assert_eq!(renames.map_type("string"), "string");
    }

    #[test]
    fn test_arity_change_keeps_literal() {
        let old_chain = vec![scope(&["T", "U"])];
        let new_chain = vec![scope(&["T"])];
        let renames = GenericRenames::new(&[], &old_chain, &[], &new_chain);
        assert_eq!(renames.map_name("U"), None);
        assert!(!renames.is_equivalent("U", "T"));
    }
}
