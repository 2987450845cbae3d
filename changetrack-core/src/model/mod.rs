//! Declaration model.
//!
//! A forest of owned, immutable declarations per API version. Declarations are
//! assembled with the builders in [`builder`], which derive full names,
//! visibility and enclosing scopes from the parent of each node. Comparers
//! address any node through the borrowed [`Declaration`] view.

pub mod builder;
mod definitions;
mod modifiers;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ModelError;

pub use builder::{
    AttributeBuilder, ConstructorBuilder, EnumMemberBuilder, FieldBuilder, MethodBuilder,
    ParameterBuilder, PropertyAccessorBuilder, PropertyBuilder, TypeBuilder, TypeKeyword,
};
pub use definitions::*;
pub use modifiers::*;

/// Anything addressable by name.
pub trait Item {
    fn info(&self) -> &ItemInfo;

    fn declaration(&self) -> Declaration<'_>;

    fn name(&self) -> &str {
        &self.info().name
    }

    /// Unique per forest except across overloads: methods and constructors
    /// carry no parameter list, so overloads (and their parameters) share it.
    /// Those are paired by signature, never by this name.
    fn full_name(&self) -> &str {
        &self.info().full_name
    }

    /// Key used when pairing items by name.
    fn match_name(&self) -> &str {
        &self.info().name
    }
}

/// Items that carry access modifiers, visibility and attributes.
pub trait Element: Item {
    fn element(&self) -> &ElementInfo;

    fn is_visible(&self) -> bool {
        self.element().is_visible
    }

    fn access_modifiers(&self) -> AccessModifiers {
        self.element().access_modifiers
    }

    fn attributes(&self) -> &[AttributeDefinition] {
        &self.element().attributes
    }
}

macro_rules! impl_element {
    ($ty:ty, $variant:ident) => {
        impl Item for $ty {
            fn info(&self) -> &ItemInfo {
                &self.element.item
            }

            fn declaration(&self) -> Declaration<'_> {
                Declaration::$variant(self)
            }
        }

        impl Element for $ty {
            fn element(&self) -> &ElementInfo {
                &self.element
            }
        }
    };
}

impl_element!(TypeDefinition, Type);
impl_element!(FieldDefinition, Field);
impl_element!(PropertyDefinition, Property);
impl_element!(PropertyAccessorDefinition, PropertyAccessor);
impl_element!(MethodDefinition, Method);
impl_element!(ConstructorDefinition, Constructor);
impl_element!(EnumMemberDefinition, EnumMember);

impl Item for ParameterDefinition {
    fn info(&self) -> &ItemInfo {
        &self.item
    }

    fn declaration(&self) -> Declaration<'_> {
        Declaration::Parameter(self)
    }
}

impl Item for AttributeDefinition {
    fn info(&self) -> &ItemInfo {
        &self.item
    }

    fn declaration(&self) -> Declaration<'_> {
        Declaration::Attribute(self)
    }

    fn match_name(&self) -> &str {
        self.short_name()
    }
}

impl Item for ArgumentDefinition {
    fn info(&self) -> &ItemInfo {
        &self.item
    }

    fn declaration(&self) -> Declaration<'_> {
        Declaration::Argument(self)
    }
}

impl Item for ConstraintListDefinition {
    fn info(&self) -> &ItemInfo {
        &self.item
    }

    fn declaration(&self) -> Declaration<'_> {
        Declaration::ConstraintList(self)
    }
}

/// Borrowed view over any node of a forest.
#[derive(Clone, Copy, Debug)]
pub enum Declaration<'a> {
    Type(&'a TypeDefinition),
    Field(&'a FieldDefinition),
    Property(&'a PropertyDefinition),
    PropertyAccessor(&'a PropertyAccessorDefinition),
    Method(&'a MethodDefinition),
    Constructor(&'a ConstructorDefinition),
    Parameter(&'a ParameterDefinition),
    EnumMember(&'a EnumMemberDefinition),
    Attribute(&'a AttributeDefinition),
    Argument(&'a ArgumentDefinition),
    ConstraintList(&'a ConstraintListDefinition),
}

impl<'a> Declaration<'a> {
    pub fn info(&self) -> &'a ItemInfo {
        match *self {
            Declaration::Type(d) => &d.element.item,
            Declaration::Field(d) => &d.element.item,
            Declaration::Property(d) => &d.element.item,
            Declaration::PropertyAccessor(d) => &d.element.item,
            Declaration::Method(d) => &d.element.item,
            Declaration::Constructor(d) => &d.element.item,
            Declaration::Parameter(d) => &d.item,
            Declaration::EnumMember(d) => &d.element.item,
            Declaration::Attribute(d) => &d.item,
            Declaration::Argument(d) => &d.item,
            Declaration::ConstraintList(d) => &d.item,
        }
    }

    /// Human readable kind, used as `{DefinitionType}` in messages.
    pub fn definition_type(&self) -> &'static str {
        match self {
            Declaration::Type(d) => d.kind.definition_type(),
            Declaration::Field(_) => "Field",
            Declaration::Property(_) => "Property",
            Declaration::PropertyAccessor(_) => "Property accessor",
            Declaration::Method(_) => "Method",
            Declaration::Constructor(_) => "Constructor",
            Declaration::Parameter(_) => "Parameter",
            Declaration::EnumMember(_) => "Enum member",
            Declaration::Attribute(_) => "Attribute",
            Declaration::Argument(_) => "Attribute argument",
            Declaration::ConstraintList(_) => "Generic constraint",
        }
    }

    pub fn full_name(&self) -> &'a str {
        &self.info().full_name
    }

    pub fn location(&self) -> &'a Location {
        &self.info().location
    }
}

impl Serialize for Declaration<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let info = self.info();
        let mut state = serializer.serialize_struct("Declaration", 4)?;
        state.serialize_field("definition_type", self.definition_type())?;
        state.serialize_field("name", &info.name)?;
        state.serialize_field("full_name", &info.full_name)?;
        state.serialize_field("location", &info.location)?;
        state.end()
    }
}

/// The top-level types of one API version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationForest {
    pub types: Vec<TypeDefinition>,
}

impl DeclarationForest {
    pub fn new(types: Vec<TypeDefinition>) -> Self {
        Self { types }
    }

    /// Merge partial declarations and build every type.
    pub fn from_builders(builders: Vec<TypeBuilder>) -> Result<Self, ModelError> {
        let types = builder::merge_partial_types(builders)
            .into_iter()
            .map(TypeBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { types })
    }

    /// Find a type, nested or not, by full name.
    pub fn find_type(&self, full_name: &str) -> Option<&TypeDefinition> {
        fn search<'a>(types: &'a [TypeDefinition], full_name: &str) -> Option<&'a TypeDefinition> {
            types.iter().find_map(|t| {
                if t.element.item.full_name == full_name {
                    Some(t)
                } else {
                    search(&t.child_types, full_name)
                }
            })
        }
        search(&self.types, full_name)
    }

    /// Number of types including nested ones.
    pub fn type_count(&self) -> usize {
        fn count(types: &[TypeDefinition]) -> usize {
            types.iter().map(|t| 1 + count(&t.child_types)).sum()
        }
        count(&self.types)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_short_name() {
        let attribute = AttributeBuilder::new("System.Text.Json.Serialization.JsonIgnoreAttribute")
            .build("Ns.Type");
        assert_eq!(attribute.short_name(), "JsonIgnore");

        let bare = AttributeBuilder::new("Attribute").build("Ns.Type");
        assert_eq!(bare.short_name(), "Attribute");
    }

    #[test]
    fn test_find_nested_type() {
        let forest = DeclarationForest::from_builders(vec![TypeBuilder::class("Outer")
            .in_namespace("Ns")
            .modifiers(["public"])
            .child(TypeBuilder::class("Inner").modifiers(["public"]))])
        .unwrap();

        assert_eq!(forest.type_count(), 2);
        let inner = forest.find_type("Ns.Outer+Inner").unwrap();
        assert_eq!(inner.element.item.name, "Inner");
        assert!(!inner.is_top_level());
    }

    #[test]
    fn test_overloads_share_full_name() {
        let forest = DeclarationForest::from_builders(vec![TypeBuilder::class("Numbers")
            .in_namespace("Ns")
            .modifiers(["public"])
            .method(MethodBuilder::new("void", "Swap").parameter(ParameterBuilder::new("int", "x")))
            .method(
                MethodBuilder::new("void", "Swap")
                    .parameter(ParameterBuilder::new("int", "x").modifiers(["ref"])),
            )])
        .unwrap();

        let methods = &forest.types[0].methods;
        assert_eq!(methods[0].full_name(), "Ns.Numbers.Swap");
        assert_eq!(methods[0].full_name(), methods[1].full_name());
        assert_eq!(methods[0].parameters[0].full_name(), methods[1].parameters[0].full_name());
        assert_ne!(methods[0].parameters[0].modifier, methods[1].parameters[0].modifier);
    }

    #[test]
    fn test_declaration_serializes_summary() {
        let forest = DeclarationForest::from_builders(vec![TypeBuilder::class("Widget")
            .in_namespace("Ns")
            .modifiers(["public"])])
        .unwrap();
        let json = serde_json::to_value(forest.types[0].declaration()).unwrap();
        assert_eq!(json["definition_type"], "Class");
        assert_eq!(json["full_name"], "Ns.Widget");
    }
}
