//! Normalized modifier states.
//!
//! Each enum collapses the raw keyword list of a declaration into the set of
//! states that matter for compatibility. Keywords with no compatibility
//! meaning (`partial` on members, `async`, `extern`, `unsafe`) are dropped.

use serde::{Deserialize, Serialize};

fn has(keywords: &[String], keyword: &str) -> bool {
    keywords.iter().any(|k| k == keyword)
}

/// Declared access level of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessModifiers {
    Private,
    Internal,
    Protected,
    Public,
    ProtectedInternal,
    ProtectedPrivate,
}

impl AccessModifiers {
    pub const ALL: [AccessModifiers; 6] = [
        AccessModifiers::Private,
        AccessModifiers::Internal,
        AccessModifiers::Protected,
        AccessModifiers::Public,
        AccessModifiers::ProtectedInternal,
        AccessModifiers::ProtectedPrivate,
    ];

    /// Read the access level from declared keywords, `None` when the
    /// declaration relies on the default for its context.
    pub fn from_keywords(keywords: &[String]) -> Option<Self> {
        let protected = has(keywords, "protected");
        if has(keywords, "public") {
            Some(AccessModifiers::Public)
        } else if protected && has(keywords, "internal") {
            Some(AccessModifiers::ProtectedInternal)
        } else if protected && has(keywords, "private") {
            Some(AccessModifiers::ProtectedPrivate)
        } else if protected {
            Some(AccessModifiers::Protected)
        } else if has(keywords, "internal") {
            Some(AccessModifiers::Internal)
        } else if has(keywords, "private") || has(keywords, "file") {
            Some(AccessModifiers::Private)
        } else {
            None
        }
    }

    /// Whether consumers outside the assembly can observe the element.
    pub fn is_externally_visible(&self) -> bool {
        matches!(
            self,
            AccessModifiers::Public | AccessModifiers::Protected | AccessModifiers::ProtectedInternal
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessModifiers::Private => "private",
            AccessModifiers::Internal => "internal",
            AccessModifiers::Protected => "protected",
            AccessModifiers::Public => "public",
            AccessModifiers::ProtectedInternal => "protected internal",
            AccessModifiers::ProtectedPrivate => "private protected",
        }
    }
}

/// Access level declared on a property accessor, relative to its property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyAccessorAccessModifiers {
    #[default]
    None,
    Internal,
    Protected,
    ProtectedInternal,
    Private,
}

impl PropertyAccessorAccessModifiers {
    pub const ALL: [PropertyAccessorAccessModifiers; 5] = [
        PropertyAccessorAccessModifiers::None,
        PropertyAccessorAccessModifiers::Internal,
        PropertyAccessorAccessModifiers::Protected,
        PropertyAccessorAccessModifiers::ProtectedInternal,
        PropertyAccessorAccessModifiers::Private,
    ];

    pub fn from_keywords(keywords: &[String]) -> Self {
        match AccessModifiers::from_keywords(keywords) {
            None | Some(AccessModifiers::Public) => PropertyAccessorAccessModifiers::None,
            Some(AccessModifiers::Internal) => PropertyAccessorAccessModifiers::Internal,
            Some(AccessModifiers::Protected) => PropertyAccessorAccessModifiers::Protected,
            Some(AccessModifiers::ProtectedInternal) => {
                PropertyAccessorAccessModifiers::ProtectedInternal
            }
            Some(AccessModifiers::Private) | Some(AccessModifiers::ProtectedPrivate) => {
                PropertyAccessorAccessModifiers::Private
            }
        }
    }

    /// The effective access level of the accessor given its property's level.
    pub fn effective_access(&self, property: AccessModifiers) -> AccessModifiers {
        match self {
            PropertyAccessorAccessModifiers::None => property,
            PropertyAccessorAccessModifiers::Internal => AccessModifiers::Internal,
            PropertyAccessorAccessModifiers::Protected => AccessModifiers::Protected,
            PropertyAccessorAccessModifiers::ProtectedInternal => AccessModifiers::ProtectedInternal,
            PropertyAccessorAccessModifiers::Private => AccessModifiers::Private,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyAccessorAccessModifiers::None => "",
            PropertyAccessorAccessModifiers::Internal => "internal",
            PropertyAccessorAccessModifiers::Protected => "protected",
            PropertyAccessorAccessModifiers::ProtectedInternal => "protected internal",
            PropertyAccessorAccessModifiers::Private => "private",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassModifiers {
    #[default]
    None,
    Abstract,
    Partial,
    Sealed,
    Static,
    AbstractPartial,
    SealedPartial,
    StaticPartial,
}

impl ClassModifiers {
    pub const ALL: [ClassModifiers; 8] = [
        ClassModifiers::None,
        ClassModifiers::Abstract,
        ClassModifiers::Partial,
        ClassModifiers::Sealed,
        ClassModifiers::Static,
        ClassModifiers::AbstractPartial,
        ClassModifiers::SealedPartial,
        ClassModifiers::StaticPartial,
    ];

    pub fn from_keywords(keywords: &[String]) -> Self {
        let partial = has(keywords, "partial");
        match (
            has(keywords, "abstract"),
            has(keywords, "sealed"),
            has(keywords, "static"),
            partial,
        ) {
            (_, _, true, false) => ClassModifiers::Static,
            (_, _, true, true) => ClassModifiers::StaticPartial,
            (true, _, _, false) => ClassModifiers::Abstract,
            (true, _, _, true) => ClassModifiers::AbstractPartial,
            (_, true, _, false) => ClassModifiers::Sealed,
            (_, true, _, true) => ClassModifiers::SealedPartial,
            (_, _, _, true) => ClassModifiers::Partial,
            _ => ClassModifiers::None,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            ClassModifiers::Partial
                | ClassModifiers::AbstractPartial
                | ClassModifiers::SealedPartial
                | ClassModifiers::StaticPartial
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassModifiers::None => "",
            ClassModifiers::Abstract => "abstract",
            ClassModifiers::Partial => "partial",
            ClassModifiers::Sealed => "sealed",
            ClassModifiers::Static => "static",
            ClassModifiers::AbstractPartial => "abstract partial",
            ClassModifiers::SealedPartial => "sealed partial",
            ClassModifiers::StaticPartial => "static partial",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructModifiers {
    #[default]
    None,
    ReadOnly,
    Ref,
    Partial,
    ReadOnlyRef,
    ReadOnlyPartial,
    RefPartial,
    ReadOnlyRefPartial,
}

impl StructModifiers {
    pub const ALL: [StructModifiers; 8] = [
        StructModifiers::None,
        StructModifiers::ReadOnly,
        StructModifiers::Ref,
        StructModifiers::Partial,
        StructModifiers::ReadOnlyRef,
        StructModifiers::ReadOnlyPartial,
        StructModifiers::RefPartial,
        StructModifiers::ReadOnlyRefPartial,
    ];

    pub fn from_keywords(keywords: &[String]) -> Self {
        match (
            has(keywords, "readonly"),
            has(keywords, "ref"),
            has(keywords, "partial"),
        ) {
            (false, false, false) => StructModifiers::None,
            (true, false, false) => StructModifiers::ReadOnly,
            (false, true, false) => StructModifiers::Ref,
            (false, false, true) => StructModifiers::Partial,
            (true, true, false) => StructModifiers::ReadOnlyRef,
            (true, false, true) => StructModifiers::ReadOnlyPartial,
            (false, true, true) => StructModifiers::RefPartial,
            (true, true, true) => StructModifiers::ReadOnlyRefPartial,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            StructModifiers::Partial
                | StructModifiers::ReadOnlyPartial
                | StructModifiers::RefPartial
                | StructModifiers::ReadOnlyRefPartial
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StructModifiers::None => "",
            StructModifiers::ReadOnly => "readonly",
            StructModifiers::Ref => "ref",
            StructModifiers::Partial => "partial",
            StructModifiers::ReadOnlyRef => "readonly ref",
            StructModifiers::ReadOnlyPartial => "readonly partial",
            StructModifiers::RefPartial => "ref partial",
            StructModifiers::ReadOnlyRefPartial => "readonly ref partial",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldModifiers {
    #[default]
    None,
    New,
    ReadOnly,
    Static,
    NewReadOnly,
    NewStatic,
    StaticReadOnly,
    NewStaticReadOnly,
}

impl FieldModifiers {
    pub const ALL: [FieldModifiers; 8] = [
        FieldModifiers::None,
        FieldModifiers::New,
        FieldModifiers::ReadOnly,
        FieldModifiers::Static,
        FieldModifiers::NewReadOnly,
        FieldModifiers::NewStatic,
        FieldModifiers::StaticReadOnly,
        FieldModifiers::NewStaticReadOnly,
    ];

    /// `const` fields are treated as static readonly.
    pub fn from_keywords(keywords: &[String]) -> Self {
        let constant = has(keywords, "const");
        match (
            has(keywords, "new"),
            has(keywords, "static") || constant,
            has(keywords, "readonly") || constant,
        ) {
            (false, false, false) => FieldModifiers::None,
            (true, false, false) => FieldModifiers::New,
            (false, false, true) => FieldModifiers::ReadOnly,
            (false, true, false) => FieldModifiers::Static,
            (true, false, true) => FieldModifiers::NewReadOnly,
            (true, true, false) => FieldModifiers::NewStatic,
            (false, true, true) => FieldModifiers::StaticReadOnly,
            (true, true, true) => FieldModifiers::NewStaticReadOnly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldModifiers::None => "",
            FieldModifiers::New => "new",
            FieldModifiers::ReadOnly => "readonly",
            FieldModifiers::Static => "static",
            FieldModifiers::NewReadOnly => "new readonly",
            FieldModifiers::NewStatic => "new static",
            FieldModifiers::StaticReadOnly => "static readonly",
            FieldModifiers::NewStaticReadOnly => "new static readonly",
        }
    }
}

/// Inheritance modifiers shared by methods and properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberModifiers {
    #[default]
    None,
    Abstract,
    New,
    Override,
    Static,
    Virtual,
    AbstractOverride,
    NewAbstract,
    NewStatic,
    NewVirtual,
    SealedOverride,
}

pub type MethodModifiers = MemberModifiers;
pub type PropertyModifiers = MemberModifiers;

impl MemberModifiers {
    pub const ALL: [MemberModifiers; 11] = [
        MemberModifiers::None,
        MemberModifiers::Abstract,
        MemberModifiers::New,
        MemberModifiers::Override,
        MemberModifiers::Static,
        MemberModifiers::Virtual,
        MemberModifiers::AbstractOverride,
        MemberModifiers::NewAbstract,
        MemberModifiers::NewStatic,
        MemberModifiers::NewVirtual,
        MemberModifiers::SealedOverride,
    ];

    pub fn from_keywords(keywords: &[String]) -> Self {
        let new = has(keywords, "new");
        let abstract_ = has(keywords, "abstract");
        let override_ = has(keywords, "override");
        if has(keywords, "static") {
            return if new {
                MemberModifiers::NewStatic
            } else {
                MemberModifiers::Static
            };
        }
        if override_ {
            return if abstract_ {
                MemberModifiers::AbstractOverride
            } else if has(keywords, "sealed") {
                MemberModifiers::SealedOverride
            } else {
                MemberModifiers::Override
            };
        }
        match (new, abstract_, has(keywords, "virtual")) {
            (true, true, _) => MemberModifiers::NewAbstract,
            (false, true, _) => MemberModifiers::Abstract,
            (true, false, true) => MemberModifiers::NewVirtual,
            (false, false, true) => MemberModifiers::Virtual,
            (true, false, false) => MemberModifiers::New,
            (false, false, false) => MemberModifiers::None,
        }
    }

    /// Derived types may override the member.
    pub fn is_overridable(&self) -> bool {
        matches!(
            self,
            MemberModifiers::Abstract
                | MemberModifiers::Virtual
                | MemberModifiers::Override
                | MemberModifiers::AbstractOverride
                | MemberModifiers::NewAbstract
                | MemberModifiers::NewVirtual
        )
    }

    /// Derived types must override the member.
    pub fn is_abstract(&self) -> bool {
        matches!(
            self,
            MemberModifiers::Abstract
                | MemberModifiers::AbstractOverride
                | MemberModifiers::NewAbstract
        )
    }

    pub fn is_static(&self) -> bool {
        matches!(self, MemberModifiers::Static | MemberModifiers::NewStatic)
    }

    pub fn is_override(&self) -> bool {
        matches!(
            self,
            MemberModifiers::Override
                | MemberModifiers::AbstractOverride
                | MemberModifiers::SealedOverride
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberModifiers::None => "",
            MemberModifiers::Abstract => "abstract",
            MemberModifiers::New => "new",
            MemberModifiers::Override => "override",
            MemberModifiers::Static => "static",
            MemberModifiers::Virtual => "virtual",
            MemberModifiers::AbstractOverride => "abstract override",
            MemberModifiers::NewAbstract => "new abstract",
            MemberModifiers::NewStatic => "new static",
            MemberModifiers::NewVirtual => "new virtual",
            MemberModifiers::SealedOverride => "sealed override",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterModifiers {
    #[default]
    None,
    Ref,
    Out,
    Params,
    This,
}

impl ParameterModifiers {
    pub const ALL: [ParameterModifiers; 5] = [
        ParameterModifiers::None,
        ParameterModifiers::Ref,
        ParameterModifiers::Out,
        ParameterModifiers::Params,
        ParameterModifiers::This,
    ];

    /// `in` and `ref readonly` parameters are passed by reference and map to `Ref`.
    pub fn from_keywords(keywords: &[String]) -> Self {
        if has(keywords, "this") {
            ParameterModifiers::This
        } else if has(keywords, "params") {
            ParameterModifiers::Params
        } else if has(keywords, "out") {
            ParameterModifiers::Out
        } else if has(keywords, "ref") || has(keywords, "in") {
            ParameterModifiers::Ref
        } else {
            ParameterModifiers::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterModifiers::None => "",
            ParameterModifiers::Ref => "ref",
            ParameterModifiers::Out => "out",
            ParameterModifiers::Params => "params",
            ParameterModifiers::This => "this",
        }
    }
}
