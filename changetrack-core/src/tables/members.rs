use once_cell::sync::Lazy;

use super::ChangeTable;
use crate::model::{FieldModifiers, MemberModifiers, ParameterModifiers};
use crate::results::SemVerChangeType::{self, Breaking as B, Feature as F, None as N};

/// `new` only hides an inherited member and is ignored.
pub static FIELD_MODIFIERS: Lazy<ChangeTable<FieldModifiers>> = Lazy::new(|| {
    ChangeTable::from_matrix(
        "field modifiers",
        FieldModifiers::ALL,
        [
            [N, N, B, B, B, B, B, B], // None
            [N, N, B, B, B, B, B, B], // New
            [F, F, N, B, N, B, B, B], // ReadOnly
            [B, B, B, N, B, N, B, B], // Static
            [F, F, N, B, N, B, B, B], // NewReadOnly
            [B, B, B, N, B, N, B, B], // NewStatic
            [B, B, B, F, B, F, N, N], // StaticReadOnly
            [B, B, B, F, B, F, N, N], // NewStaticReadOnly
        ],
    )
});

/// Shared by methods and properties. Changing `static` always breaks, losing
/// overridability breaks, gaining `abstract` breaks, and moving from
/// `override` back to `virtual` relaxes.
const MEMBER_MATRIX: [[SemVerChangeType; 11]; 11] = [
    [N, B, N, F, B, F, B, B, B, F, N], // None
    [B, N, B, B, B, F, B, N, B, F, B], // Abstract
    [N, B, N, F, B, F, B, B, B, F, N], // New
    [B, B, B, N, B, F, B, B, B, F, B], // Override
    [B, B, B, B, N, B, B, B, N, B, B], // Static
    [B, B, B, B, B, N, B, B, B, N, B], // Virtual
    [B, F, B, F, B, F, N, F, B, F, B], // AbstractOverride
    [B, N, B, B, B, F, B, N, B, F, B], // NewAbstract
    [B, B, B, B, N, B, B, B, N, B, B], // NewStatic
    [B, B, B, B, B, N, B, B, B, N, B], // NewVirtual
    [N, B, N, F, B, F, B, B, B, F, N], // SealedOverride
];

pub static PROPERTY_MODIFIERS: Lazy<ChangeTable<MemberModifiers>> = Lazy::new(|| {
    ChangeTable::from_matrix("property modifiers", MemberModifiers::ALL, MEMBER_MATRIX)
});

pub static METHOD_MODIFIERS: Lazy<ChangeTable<MemberModifiers>> = Lazy::new(|| {
    ChangeTable::from_matrix("method modifiers", MemberModifiers::ALL, MEMBER_MATRIX)
});

/// Rows and columns: None, Ref, Out, Params, This.
pub static PARAMETER_MODIFIERS: Lazy<ChangeTable<ParameterModifiers>> = Lazy::new(|| {
    ChangeTable::from_matrix(
        "parameter modifiers",
        ParameterModifiers::ALL,
        [
            [N, B, B, F, F], // None
            [B, N, B, B, B], // Ref
            [B, B, N, B, B], // Out
            [B, B, B, N, B], // Params
            [B, B, B, B, N], // This
        ],
    )
});
