//! Owned declaration structs.

use serde::{Deserialize, Serialize};

use super::modifiers::{
    AccessModifiers, ClassModifiers, FieldModifiers, MemberModifiers, ParameterModifiers,
    PropertyAccessorAccessModifiers, StructModifiers,
};

/// Source position of a declaration. Lines and characters are 1-based.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file_path: String,
    pub line: u32,
    pub character: u32,
}

impl Location {
    pub fn new(file_path: impl Into<String>, line: u32, character: u32) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            character,
        }
    }
}

/// An enclosing type as seen from a nested declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeScope {
    pub full_name: String,
    pub raw_name: String,
    pub generic_type_parameters: Vec<String>,
}

/// Fields shared by every declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub name: String,
    pub raw_name: String,
    pub full_name: String,
    pub full_raw_name: String,
    pub location: Location,
    /// Enclosing types, outermost first.
    pub ancestors: Vec<TypeScope>,
}

impl ItemInfo {
    /// The innermost enclosing type.
    pub fn declaring_type(&self) -> Option<&TypeScope> {
        self.ancestors.last()
    }
}

/// Fields shared by declarations that carry modifiers and attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub item: ItemInfo,
    pub declared_modifiers: Vec<String>,
    pub access_modifiers: AccessModifiers,
    pub is_visible: bool,
    pub attributes: Vec<AttributeDefinition>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgumentType {
    Ordinal(usize),
    Named(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDefinition {
    pub item: ItemInfo,
    pub value: String,
    pub argument_type: ArgumentType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub item: ItemInfo,
    pub arguments: Vec<ArgumentDefinition>,
}

impl AttributeDefinition {
    /// The attribute name with namespace qualification and the `Attribute`
    /// suffix removed, so `[Serializable]` and `[System.SerializableAttribute]`
    /// compare equal.
    pub fn short_name(&self) -> &str {
        let raw = self.item.raw_name.as_str();
        let unqualified = raw.rsplit('.').next().unwrap_or(raw);
        match unqualified.strip_suffix("Attribute") {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => unqualified,
        }
    }

    pub fn ordinal_arguments(&self) -> impl Iterator<Item = &ArgumentDefinition> {
        self.arguments
            .iter()
            .filter(|a| matches!(a.argument_type, ArgumentType::Ordinal(_)))
    }

    pub fn named_arguments(&self) -> impl Iterator<Item = &ArgumentDefinition> {
        self.arguments
            .iter()
            .filter(|a| matches!(a.argument_type, ArgumentType::Named(_)))
    }
}

/// Constraints declared for one generic type parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintListDefinition {
    pub item: ItemInfo,
    pub constraints: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    Class(ClassModifiers),
    Struct(StructModifiers),
    Interface,
    Enum { underlying_type: Option<String> },
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Class(_) => "class",
            TypeKind::Struct(_) => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum { .. } => "enum",
        }
    }

    pub fn definition_type(&self) -> &'static str {
        match self {
            TypeKind::Class(_) => "Class",
            TypeKind::Struct(_) => "Struct",
            TypeKind::Interface => "Interface",
            TypeKind::Enum { .. } => "Enum",
        }
    }

    pub fn same_kind(&self, other: &TypeKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn is_partial(&self) -> bool {
        match self {
            TypeKind::Class(modifiers) => modifiers.is_partial(),
            TypeKind::Struct(modifiers) => modifiers.is_partial(),
            TypeKind::Interface | TypeKind::Enum { .. } => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub element: ElementInfo,
    pub kind: TypeKind,
    pub namespace: String,
    pub generic_type_parameters: Vec<String>,
    pub generic_constraints: Vec<ConstraintListDefinition>,
    pub implemented_types: Vec<String>,
    pub child_types: Vec<TypeDefinition>,
    pub fields: Vec<FieldDefinition>,
    pub properties: Vec<PropertyDefinition>,
    pub constructors: Vec<ConstructorDefinition>,
    pub methods: Vec<MethodDefinition>,
    pub enum_members: Vec<EnumMemberDefinition>,
}

impl TypeDefinition {
    fn children_of(&self, keyword: &'static str) -> impl Iterator<Item = &TypeDefinition> {
        self.child_types
            .iter()
            .filter(move |t| t.kind.keyword() == keyword)
    }

    pub fn child_classes(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.children_of("class")
    }

    pub fn child_interfaces(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.children_of("interface")
    }

    pub fn child_structs(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.children_of("struct")
    }

    pub fn child_enums(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.children_of("enum")
    }

    /// Whether the type is declared at namespace level.
    pub fn is_top_level(&self) -> bool {
        self.element.item.ancestors.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub element: ElementInfo,
    pub field_type: String,
    pub modifiers: FieldModifiers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessorKind {
    Get,
    Set,
    Init,
}

impl AccessorKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            AccessorKind::Get => "get",
            AccessorKind::Set => "set",
            AccessorKind::Init => "init",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "get" => Some(AccessorKind::Get),
            "set" => Some(AccessorKind::Set),
            "init" => Some(AccessorKind::Init),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAccessorDefinition {
    pub element: ElementInfo,
    pub accessor_kind: AccessorKind,
    pub accessor_access_modifiers: PropertyAccessorAccessModifiers,
    pub has_body: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub element: ElementInfo,
    pub property_type: String,
    pub modifiers: MemberModifiers,
    pub accessors: Vec<PropertyAccessorDefinition>,
}

impl PropertyDefinition {
    fn accessor(&self, kind: AccessorKind) -> Option<&PropertyAccessorDefinition> {
        self.accessors.iter().find(|a| a.accessor_kind == kind)
    }

    pub fn get_accessor(&self) -> Option<&PropertyAccessorDefinition> {
        self.accessor(AccessorKind::Get)
    }

    pub fn set_accessor(&self) -> Option<&PropertyAccessorDefinition> {
        self.accessor(AccessorKind::Set)
    }

    pub fn init_accessor(&self) -> Option<&PropertyAccessorDefinition> {
        self.accessor(AccessorKind::Init)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub item: ItemInfo,
    pub parameter_type: String,
    pub declared_index: usize,
    pub modifier: ParameterModifiers,
    pub default_value: Option<String>,
    pub attributes: Vec<AttributeDefinition>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub element: ElementInfo,
    pub return_type: String,
    pub modifiers: MemberModifiers,
    pub parameters: Vec<ParameterDefinition>,
    pub generic_type_parameters: Vec<String>,
    pub generic_constraints: Vec<ConstraintListDefinition>,
    pub has_body: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDefinition {
    pub element: ElementInfo,
    pub parameters: Vec<ParameterDefinition>,
    pub is_static: bool,
    pub has_body: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMemberDefinition {
    pub element: ElementInfo,
    pub index: usize,
    /// Declared initializer text, if any.
    pub value: Option<String>,
    /// The value the member resolves to, following implicit numbering.
    pub effective_value: String,
}
