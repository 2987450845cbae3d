use once_cell::sync::Lazy;

use super::ChangeTable;
use crate::model::{ClassModifiers, StructModifiers};
use crate::results::SemVerChangeType::{Breaking as B, Feature as F, None as N};

/// `partial` carries no compatibility meaning. A static class is implicitly
/// abstract and sealed, so dropping `static` for either is a relaxation.
pub static CLASS_MODIFIERS: Lazy<ChangeTable<ClassModifiers>> = Lazy::new(|| {
    ChangeTable::from_matrix(
        "class modifiers",
        ClassModifiers::ALL,
        [
            [N, B, N, B, B, B, B, B], // None
            [F, N, F, B, B, N, B, B], // Abstract
            [N, B, N, B, B, B, B, B], // Partial
            [F, B, F, N, B, B, N, B], // Sealed
            [F, F, F, F, N, F, F, N], // Static
            [F, N, F, B, B, N, B, B], // AbstractPartial
            [F, B, F, N, B, B, N, B], // SealedPartial
            [F, F, F, F, N, F, F, N], // StaticPartial
        ],
    )
});

/// Adding `readonly` is a new guarantee, removing it withdraws one. Adding
/// `ref` restricts where the struct may live.
pub static STRUCT_MODIFIERS: Lazy<ChangeTable<StructModifiers>> = Lazy::new(|| {
    ChangeTable::from_matrix(
        "struct modifiers",
        StructModifiers::ALL,
        [
            [N, F, B, N, B, F, B, B], // None
            [B, N, B, B, B, N, B, B], // ReadOnly
            [F, F, N, F, F, F, N, F], // Ref
            [N, F, B, N, B, F, B, B], // Partial
            [B, F, B, B, N, F, B, N], // ReadOnlyRef
            [B, N, B, B, B, N, B, B], // ReadOnlyPartial
            [F, F, N, F, F, F, N, F], // RefPartial
            [B, F, B, B, N, F, B, N], // ReadOnlyRefPartial
        ],
    )
});
