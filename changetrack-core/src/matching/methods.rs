use tracing::debug;

use super::{MatchEvaluator, MatchResults, Pairing};
use crate::model::{ConstructorDefinition, Item, MethodDefinition, ParameterDefinition};

/// Shape of an invocable member used to pair overloads.
pub trait Signature: Item {
    fn generic_arity(&self) -> usize;

    fn parameters(&self) -> &[ParameterDefinition];
}

impl Signature for MethodDefinition {
    fn generic_arity(&self) -> usize {
        self.generic_type_parameters.len()
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }
}

impl Signature for ConstructorDefinition {
    fn generic_arity(&self) -> usize {
        0
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }
}

fn same_name<T: Signature>(old: &T, new: &T) -> bool {
    old.info().raw_name == new.info().raw_name
}

fn same_arity<T: Signature>(old: &T, new: &T) -> bool {
    old.generic_arity() == new.generic_arity()
}

fn same_count<T: Signature>(old: &T, new: &T) -> bool {
    old.parameters().len() == new.parameters().len()
}

/// Parameters agree on passing mode and type, so `M(int)` and `M(ref int)`
/// stay distinct overloads.
fn same_parameter_types<T: Signature>(old: &T, new: &T) -> bool {
    fn compact(text: &str) -> String {
        text.chars().filter(|c| !c.is_whitespace()).collect()
    }
    same_count(old, new)
        && old.parameters().iter().zip(new.parameters()).all(|(o, n)| {
            (o.modifier, compact(&o.parameter_type)) == (n.modifier, compact(&n.parameter_type))
        })
}

fn exact_signature<T: Signature>(o: &T, n: &T) -> bool {
    same_name(o, n) && same_arity(o, n) && same_parameter_types(o, n)
}

fn name_arity_count<T: Signature>(o: &T, n: &T) -> bool {
    same_name(o, n) && same_arity(o, n) && same_count(o, n)
}

fn name_count<T: Signature>(o: &T, n: &T) -> bool {
    same_name(o, n) && same_count(o, n)
}

fn name_arity<T: Signature>(o: &T, n: &T) -> bool {
    same_name(o, n) && same_arity(o, n)
}

fn renamed<T: Signature>(o: &T, n: &T) -> bool {
    !same_name(o, n) && same_arity(o, n) && same_parameter_types(o, n)
}

type Predicate<T> = fn(&T, &T) -> bool;

/// Pairs methods and constructors through a cascade of progressively looser
/// predicates. Each pass only accepts pairs that are unique on both sides
/// among the items still unmatched, so unrelated overloads never steal each
/// other's counterpart.
#[derive(Clone, Copy, Debug, Default)]
pub struct MethodEvaluator;

impl MethodEvaluator {
    fn passes<T: Signature>() -> [(&'static str, Predicate<T>); 6] {
        [
            ("signature", exact_signature::<T>),
            ("name, arity and parameter count", name_arity_count::<T>),
            ("name and parameter count", name_count::<T>),
            ("name and arity", name_arity::<T>),
            ("name", same_name::<T>),
            ("renamed", renamed::<T>),
        ]
    }
}

impl<T: Signature> MatchEvaluator<T> for MethodEvaluator {
    fn find_matches<'a>(&self, old: Vec<&'a T>, new: Vec<&'a T>) -> MatchResults<'a, T> {
        let mut pairing = Pairing::new(old, new);
        for (pass, predicate) in Self::passes::<T>() {
            let paired = pairing.pair_unique_by(predicate);
            if paired > 0 {
                debug!(pass, paired, "Matched methods");
            }
        }
        pairing.finish()
    }
}
