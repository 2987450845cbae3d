use once_cell::sync::Lazy;

use super::ChangeTable;
use crate::model::{AccessModifiers, PropertyAccessorAccessModifiers};
use crate::results::SemVerChangeType::{Breaking as B, Feature as F, None as N};

/// Columns and rows: Private, Internal, Protected, Public, ProtectedInternal,
/// ProtectedPrivate.
pub static ACCESS_MODIFIERS: Lazy<ChangeTable<AccessModifiers>> = Lazy::new(|| {
    ChangeTable::from_matrix(
        "access modifiers",
        AccessModifiers::ALL,
        [
            [N, N, F, F, F, F], // Private
            [N, N, F, F, F, F], // Internal
            [B, B, N, F, N, N], // Protected
            [B, B, B, N, B, B], // Public
            [B, B, N, F, N, N], // ProtectedInternal
            [B, B, N, F, N, N], // ProtectedPrivate
        ],
    )
});

/// Accessor levels narrow the property's own level. `None` means the accessor
/// is as visible as its property.
pub static PROPERTY_ACCESSOR_ACCESS_MODIFIERS: Lazy<ChangeTable<PropertyAccessorAccessModifiers>> =
    Lazy::new(|| {
        ChangeTable::from_matrix(
            "property accessor access modifiers",
            PropertyAccessorAccessModifiers::ALL,
            [
                [N, B, B, B, B], // None
                [F, N, F, F, N], // Internal
                [F, B, N, N, B], // Protected
                [F, B, N, N, B], // ProtectedInternal
                [F, N, F, F, N], // Private
            ],
        )
    });
