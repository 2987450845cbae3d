//! Builders for declaration forests.
//!
//! Builders hold the declared facts of a declaration (name, keywords,
//! attributes, members) and derive everything else on `build`: generic
//! display names, full names, the effective access level, visibility and the
//! chain of enclosing types. Both the C# front-end and hand-written tests
//! assemble forests through these builders.

use super::definitions::*;
use super::modifiers::*;
use crate::error::ModelError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKeyword {
    Class,
    Struct,
    Interface,
    Enum,
}

impl TypeKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKeyword::Class => "class",
            TypeKeyword::Struct => "struct",
            TypeKeyword::Interface => "interface",
            TypeKeyword::Enum => "enum",
        }
    }
}

fn to_strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

/// `Name<T, U>` for generic declarations, `Name` otherwise.
fn generic_name(raw_name: &str, parameters: &[String]) -> String {
    if parameters.is_empty() {
        raw_name.to_string()
    } else {
        format!("{}<{}>", raw_name, parameters.join(", "))
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}

/// The already-built type a member is declared in.
struct Scope {
    full_name: String,
    full_raw_name: String,
    raw_name: String,
    namespace: String,
    keyword: TypeKeyword,
    access: AccessModifiers,
    is_visible: bool,
    /// Enclosing types including this one.
    ancestors: Vec<TypeScope>,
}

impl Scope {
    fn unsupported(&self, kind: &str) -> ModelError {
        ModelError::UnsupportedDeclaration {
            kind: kind.to_string(),
            context: self.full_name.clone(),
        }
    }

    fn default_access(&self, kind: &str) -> Result<AccessModifiers, ModelError> {
        match self.keyword {
            TypeKeyword::Class | TypeKeyword::Struct => Ok(AccessModifiers::Private),
            TypeKeyword::Interface => Ok(AccessModifiers::Public),
            TypeKeyword::Enum => Err(self.unsupported(kind)),
        }
    }

    fn member_element(
        &self,
        kind: &str,
        name: String,
        raw_name: &str,
        modifiers: Vec<String>,
        attributes: Vec<AttributeBuilder>,
        location: Location,
    ) -> Result<ElementInfo, ModelError> {
        let access = match AccessModifiers::from_keywords(&modifiers) {
            Some(access) if self.keyword != TypeKeyword::Enum => access,
            _ => self.default_access(kind)?,
        };
        let full_name = format!("{}.{}", self.full_name, name);
        let full_raw_name = format!("{}.{}", self.full_raw_name, raw_name);
        let attributes = build_attributes(attributes, &full_name);

        Ok(ElementInfo {
            item: ItemInfo {
                name,
                raw_name: raw_name.to_string(),
                full_name,
                full_raw_name,
                location,
                ancestors: self.ancestors.clone(),
            },
            declared_modifiers: modifiers,
            access_modifiers: access,
            is_visible: self.is_visible && access.is_externally_visible(),
            attributes,
        })
    }
}

fn build_attributes(attributes: Vec<AttributeBuilder>, owner: &str) -> Vec<AttributeDefinition> {
    attributes.into_iter().map(|a| a.build(owner)).collect()
}

fn build_constraints(
    constraints: Vec<(String, Vec<String>)>,
    owner: &str,
    ancestors: &[TypeScope],
) -> Vec<ConstraintListDefinition> {
    constraints
        .into_iter()
        .map(|(name, constraints)| ConstraintListDefinition {
            item: ItemInfo {
                full_name: format!("{} where {}", owner, name),
                full_raw_name: format!("{} where {}", owner, name),
                raw_name: name.clone(),
                name,
                location: Location::default(),
                ancestors: ancestors.to_vec(),
            },
            constraints,
        })
        .collect()
}

fn build_parameters(
    parameters: Vec<ParameterBuilder>,
    owner: &str,
    ancestors: &[TypeScope],
) -> Vec<ParameterDefinition> {
    parameters
        .into_iter()
        .enumerate()
        .map(|(index, p)| p.build(owner, index, ancestors))
        .collect()
}

/// A type declaration and everything declared inside it.
#[derive(Clone, Debug)]
pub struct TypeBuilder {
    keyword: TypeKeyword,
    name: String,
    namespace: String,
    modifiers: Vec<String>,
    location: Location,
    attributes: Vec<AttributeBuilder>,
    generic_type_parameters: Vec<String>,
    generic_constraints: Vec<(String, Vec<String>)>,
    implemented_types: Vec<String>,
    underlying_type: Option<String>,
    child_types: Vec<TypeBuilder>,
    fields: Vec<FieldBuilder>,
    properties: Vec<PropertyBuilder>,
    constructors: Vec<ConstructorBuilder>,
    methods: Vec<MethodBuilder>,
    enum_members: Vec<EnumMemberBuilder>,
}

impl TypeBuilder {
    pub fn new(keyword: TypeKeyword, name: impl Into<String>) -> Self {
        Self {
            keyword,
            name: name.into(),
            namespace: String::new(),
            modifiers: Vec::new(),
            location: Location::default(),
            attributes: Vec::new(),
            generic_type_parameters: Vec::new(),
            generic_constraints: Vec::new(),
            implemented_types: Vec::new(),
            underlying_type: None,
            child_types: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            enum_members: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeKeyword::Class, name)
    }

    pub fn struct_type(name: impl Into<String>) -> Self {
        Self::new(TypeKeyword::Struct, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeKeyword::Interface, name)
    }

    pub fn enum_type(name: impl Into<String>) -> Self {
        Self::new(TypeKeyword::Enum, name)
    }

    /// Namespace of a top-level type. Nested types take their parent's.
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = to_strings(modifiers);
        self
    }

    pub fn located(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn generic_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generic_type_parameters = to_strings(parameters);
        self
    }

    pub fn constraint<I, S>(mut self, parameter: impl Into<String>, constraints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generic_constraints
            .push((parameter.into(), to_strings(constraints)));
        self
    }

    pub fn implements(mut self, type_name: impl Into<String>) -> Self {
        self.implemented_types.push(type_name.into());
        self
    }

    pub fn underlying_type(mut self, type_name: impl Into<String>) -> Self {
        self.underlying_type = Some(type_name.into());
        self
    }

    pub fn child(mut self, child: TypeBuilder) -> Self {
        self.child_types.push(child);
        self
    }

    pub fn field(mut self, field: FieldBuilder) -> Self {
        self.fields.push(field);
        self
    }

    pub fn property(mut self, property: PropertyBuilder) -> Self {
        self.properties.push(property);
        self
    }

    pub fn constructor(mut self, constructor: ConstructorBuilder) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn method(mut self, method: MethodBuilder) -> Self {
        self.methods.push(method);
        self
    }

    pub fn enum_member(mut self, member: EnumMemberBuilder) -> Self {
        self.enum_members.push(member);
        self
    }

    pub fn keyword(&self) -> TypeKeyword {
        self.keyword
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_partial(&self) -> bool {
        self.modifiers.iter().any(|m| m == "partial")
    }

    fn same_declaration(&self, other: &TypeBuilder) -> bool {
        self.keyword == other.keyword
            && self.name == other.name
            && self.namespace == other.namespace
            && self.generic_type_parameters.len() == other.generic_type_parameters.len()
    }

    /// Fold another part of a partial type into this one.
    fn absorb(&mut self, other: TypeBuilder) {
        for modifier in other.modifiers {
            if !self.modifiers.contains(&modifier) {
                self.modifiers.push(modifier);
            }
        }
        for implemented in other.implemented_types {
            if !self.implemented_types.contains(&implemented) {
                self.implemented_types.push(implemented);
            }
        }
        for (parameter, constraints) in other.generic_constraints {
            match self
                .generic_constraints
                .iter_mut()
                .find(|(name, _)| *name == parameter)
            {
                Some((_, existing)) => {
                    for constraint in constraints {
                        if !existing.contains(&constraint) {
                            existing.push(constraint);
                        }
                    }
                }
                None => self.generic_constraints.push((parameter, constraints)),
            }
        }
        self.attributes.extend(other.attributes);
        self.child_types.extend(other.child_types);
        self.fields.extend(other.fields);
        self.properties.extend(other.properties);
        self.constructors.extend(other.constructors);
        self.methods.extend(other.methods);
    }

    pub fn build(self) -> Result<TypeDefinition, ModelError> {
        self.build_in(None)
    }

    fn build_in(self, parent: Option<&Scope>) -> Result<TypeDefinition, ModelError> {
        let name = generic_name(&self.name, &self.generic_type_parameters);
        let (full_name, full_raw_name, namespace, ancestors) = match parent {
            Some(scope) => (
                format!("{}+{}", scope.full_name, name),
                format!("{}+{}", scope.full_raw_name, self.name),
                scope.namespace.clone(),
                scope.ancestors.clone(),
            ),
            None => (
                qualify(&self.namespace, &name),
                qualify(&self.namespace, &self.name),
                self.namespace.clone(),
                Vec::new(),
            ),
        };

        let access = match (AccessModifiers::from_keywords(&self.modifiers), parent) {
            (_, Some(scope)) if scope.keyword == TypeKeyword::Enum => {
                return Err(scope.unsupported(self.keyword.as_str()))
            }
            (Some(access), _) => access,
            (None, Some(scope)) => scope.default_access(self.keyword.as_str())?,
            (None, None) => AccessModifiers::Internal,
        };
        let is_visible = access.is_externally_visible() && parent.map_or(true, |p| p.is_visible);

        let kind = match self.keyword {
            TypeKeyword::Class => TypeKind::Class(ClassModifiers::from_keywords(&self.modifiers)),
            TypeKeyword::Struct => {
                TypeKind::Struct(StructModifiers::from_keywords(&self.modifiers))
            }
            TypeKeyword::Interface => TypeKind::Interface,
            TypeKeyword::Enum => TypeKind::Enum {
                underlying_type: self.underlying_type,
            },
        };

        let mut scope_ancestors = ancestors.clone();
        scope_ancestors.push(TypeScope {
            full_name: full_name.clone(),
            raw_name: self.name.clone(),
            generic_type_parameters: self.generic_type_parameters.clone(),
        });
        let scope = Scope {
            full_name: full_name.clone(),
            full_raw_name: full_raw_name.clone(),
            raw_name: self.name.clone(),
            namespace: namespace.clone(),
            keyword: self.keyword,
            access,
            is_visible,
            ancestors: scope_ancestors,
        };

        let attributes = build_attributes(self.attributes, &full_name);
        let generic_constraints =
            build_constraints(self.generic_constraints, &full_name, &scope.ancestors);

        let child_types = self
            .child_types
            .into_iter()
            .map(|child| child.build_in(Some(&scope)))
            .collect::<Result<Vec<_>, _>>()?;
        let fields = self
            .fields
            .into_iter()
            .map(|f| f.build(&scope))
            .collect::<Result<Vec<_>, _>>()?;
        let properties = self
            .properties
            .into_iter()
            .map(|p| p.build(&scope))
            .collect::<Result<Vec<_>, _>>()?;
        let constructors = self
            .constructors
            .into_iter()
            .map(|c| c.build(&scope))
            .collect::<Result<Vec<_>, _>>()?;
        let methods = self
            .methods
            .into_iter()
            .map(|m| m.build(&scope))
            .collect::<Result<Vec<_>, _>>()?;
        let enum_members = build_enum_members(self.enum_members, &scope)?;

        Ok(TypeDefinition {
            element: ElementInfo {
                item: ItemInfo {
                    name,
                    raw_name: self.name,
                    full_name,
                    full_raw_name,
                    location: self.location,
                    ancestors,
                },
                declared_modifiers: self.modifiers,
                access_modifiers: access,
                is_visible,
                attributes,
            },
            kind,
            namespace,
            generic_type_parameters: self.generic_type_parameters,
            generic_constraints,
            implemented_types: self.implemented_types,
            child_types,
            fields,
            properties,
            constructors,
            methods,
            enum_members,
        })
    }
}

/// Merge `partial` declarations of the same type, recursively through nested
/// types. The first declaration keeps its position and location.
pub(crate) fn merge_partial_types(types: Vec<TypeBuilder>) -> Vec<TypeBuilder> {
    let mut merged: Vec<TypeBuilder> = Vec::with_capacity(types.len());
    for builder in types {
        if builder.is_partial() {
            if let Some(existing) = merged
                .iter_mut()
                .find(|existing| existing.is_partial() && existing.same_declaration(&builder))
            {
                existing.absorb(builder);
                continue;
            }
        }
        merged.push(builder);
    }
    for builder in &mut merged {
        builder.child_types = merge_partial_types(std::mem::take(&mut builder.child_types));
    }
    merged
}

#[derive(Clone, Debug)]
pub struct FieldBuilder {
    field_type: String,
    name: String,
    modifiers: Vec<String>,
    attributes: Vec<AttributeBuilder>,
    location: Location,
}

impl FieldBuilder {
    pub fn new(field_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            name: name.into(),
            modifiers: Vec::new(),
            attributes: Vec::new(),
            location: Location::default(),
        }
    }

    pub fn modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = to_strings(modifiers);
        self
    }

    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn located(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    fn build(self, scope: &Scope) -> Result<FieldDefinition, ModelError> {
        let modifiers = FieldModifiers::from_keywords(&self.modifiers);
        let element = scope.member_element(
            "field",
            self.name.clone(),
            &self.name,
            self.modifiers,
            self.attributes,
            self.location,
        )?;
        Ok(FieldDefinition {
            element,
            field_type: self.field_type,
            modifiers,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PropertyAccessorBuilder {
    kind: AccessorKind,
    modifiers: Vec<String>,
    attributes: Vec<AttributeBuilder>,
    location: Location,
    has_body: bool,
}

impl PropertyAccessorBuilder {
    pub fn new(kind: AccessorKind) -> Self {
        Self {
            kind,
            modifiers: Vec::new(),
            attributes: Vec::new(),
            location: Location::default(),
            has_body: false,
        }
    }

    pub fn get() -> Self {
        Self::new(AccessorKind::Get)
    }

    pub fn set() -> Self {
        Self::new(AccessorKind::Set)
    }

    pub fn init() -> Self {
        Self::new(AccessorKind::Init)
    }

    pub fn modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = to_strings(modifiers);
        self
    }

    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn located(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_body(mut self, has_body: bool) -> Self {
        self.has_body = has_body;
        self
    }

    fn build(self, property: &ElementInfo) -> PropertyAccessorDefinition {
        let accessor_access = PropertyAccessorAccessModifiers::from_keywords(&self.modifiers);
        let access = accessor_access.effective_access(property.access_modifiers);
        let keyword = self.kind.keyword();
        let full_name = format!("{}.{}", property.item.full_name, keyword);

        PropertyAccessorDefinition {
            element: ElementInfo {
                item: ItemInfo {
                    name: keyword.to_string(),
                    raw_name: keyword.to_string(),
                    full_raw_name: format!("{}.{}", property.item.full_raw_name, keyword),
                    location: self.location,
                    ancestors: property.item.ancestors.clone(),
                    full_name: full_name.clone(),
                },
                declared_modifiers: self.modifiers,
                access_modifiers: access,
                is_visible: property.is_visible && access.is_externally_visible(),
                attributes: build_attributes(self.attributes, &full_name),
            },
            accessor_kind: self.kind,
            accessor_access_modifiers: accessor_access,
            has_body: self.has_body,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PropertyBuilder {
    property_type: String,
    name: String,
    modifiers: Vec<String>,
    attributes: Vec<AttributeBuilder>,
    location: Location,
    accessors: Vec<PropertyAccessorBuilder>,
}

impl PropertyBuilder {
    pub fn new(property_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            property_type: property_type.into(),
            name: name.into(),
            modifiers: Vec::new(),
            attributes: Vec::new(),
            location: Location::default(),
            accessors: Vec::new(),
        }
    }

    pub fn modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = to_strings(modifiers);
        self
    }

    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn located(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn accessor(mut self, accessor: PropertyAccessorBuilder) -> Self {
        self.accessors.push(accessor);
        self
    }

    /// Shorthand for `{ get; set; }`.
    pub fn get_set(self) -> Self {
        self.accessor(PropertyAccessorBuilder::get())
            .accessor(PropertyAccessorBuilder::set())
    }

    fn build(self, scope: &Scope) -> Result<PropertyDefinition, ModelError> {
        let modifiers = MemberModifiers::from_keywords(&self.modifiers);
        let element = scope.member_element(
            "property",
            self.name.clone(),
            &self.name,
            self.modifiers,
            self.attributes,
            self.location,
        )?;
        let accessors = self
            .accessors
            .into_iter()
            .map(|a| a.build(&element))
            .collect();
        Ok(PropertyDefinition {
            element,
            property_type: self.property_type,
            modifiers,
            accessors,
        })
    }
}

#[derive(Clone, Debug)]
pub struct ParameterBuilder {
    parameter_type: String,
    name: String,
    modifiers: Vec<String>,
    default_value: Option<String>,
    attributes: Vec<AttributeBuilder>,
    location: Location,
}

impl ParameterBuilder {
    pub fn new(parameter_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            parameter_type: parameter_type.into(),
            name: name.into(),
            modifiers: Vec::new(),
            default_value: None,
            attributes: Vec::new(),
            location: Location::default(),
        }
    }

    pub fn modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = to_strings(modifiers);
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn located(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_type(&self) -> &str {
        &self.parameter_type
    }

    fn build(self, owner: &str, index: usize, ancestors: &[TypeScope]) -> ParameterDefinition {
        let full_name = format!("{}({})", owner, self.name);
        ParameterDefinition {
            item: ItemInfo {
                raw_name: self.name.clone(),
                full_raw_name: full_name.clone(),
                name: self.name,
                location: self.location,
                ancestors: ancestors.to_vec(),
                full_name: full_name.clone(),
            },
            parameter_type: self.parameter_type,
            declared_index: index,
            modifier: ParameterModifiers::from_keywords(&self.modifiers),
            default_value: self.default_value,
            attributes: build_attributes(self.attributes, &full_name),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MethodBuilder {
    return_type: String,
    name: String,
    modifiers: Vec<String>,
    attributes: Vec<AttributeBuilder>,
    location: Location,
    parameters: Vec<ParameterBuilder>,
    generic_type_parameters: Vec<String>,
    generic_constraints: Vec<(String, Vec<String>)>,
    has_body: Option<bool>,
}

impl MethodBuilder {
    pub fn new(return_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            return_type: return_type.into(),
            name: name.into(),
            modifiers: Vec::new(),
            attributes: Vec::new(),
            location: Location::default(),
            parameters: Vec::new(),
            generic_type_parameters: Vec::new(),
            generic_constraints: Vec::new(),
            has_body: None,
        }
    }

    pub fn modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = to_strings(modifiers);
        self
    }

    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn located(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn parameter(mut self, parameter: ParameterBuilder) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn generic_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generic_type_parameters = to_strings(parameters);
        self
    }

    pub fn constraint<I, S>(mut self, parameter: impl Into<String>, constraints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generic_constraints
            .push((parameter.into(), to_strings(constraints)));
        self
    }

    /// Without an explicit value, interface and abstract methods have no body.
    pub fn with_body(mut self, has_body: bool) -> Self {
        self.has_body = Some(has_body);
        self
    }

    fn build(self, scope: &Scope) -> Result<MethodDefinition, ModelError> {
        let modifiers = MemberModifiers::from_keywords(&self.modifiers);
        let has_body = self.has_body.unwrap_or_else(|| {
            scope.keyword != TypeKeyword::Interface
                && !modifiers.is_abstract()
                && !self.modifiers.iter().any(|m| m == "extern")
        });
        let name = generic_name(&self.name, &self.generic_type_parameters);
        let element = scope.member_element(
            "method",
            name,
            &self.name,
            self.modifiers,
            self.attributes,
            self.location,
        )?;
        let parameters = build_parameters(
            self.parameters,
            &element.item.full_name,
            &scope.ancestors,
        );
        let generic_constraints = build_constraints(
            self.generic_constraints,
            &element.item.full_name,
            &scope.ancestors,
        );
        Ok(MethodDefinition {
            element,
            return_type: self.return_type,
            modifiers,
            parameters,
            generic_type_parameters: self.generic_type_parameters,
            generic_constraints,
            has_body,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConstructorBuilder {
    modifiers: Vec<String>,
    attributes: Vec<AttributeBuilder>,
    location: Location,
    parameters: Vec<ParameterBuilder>,
    has_body: Option<bool>,
}

impl ConstructorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = to_strings(modifiers);
        self
    }

    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn located(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn parameter(mut self, parameter: ParameterBuilder) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_body(mut self, has_body: bool) -> Self {
        self.has_body = Some(has_body);
        self
    }

    fn build(self, scope: &Scope) -> Result<ConstructorDefinition, ModelError> {
        let is_static = self.modifiers.iter().any(|m| m == "static");
        let has_body = self.has_body.unwrap_or(true);
        let element = scope.member_element(
            "constructor",
            scope.raw_name.clone(),
            &scope.raw_name,
            self.modifiers,
            self.attributes,
            self.location,
        )?;
        let parameters = build_parameters(
            self.parameters,
            &element.item.full_name,
            &scope.ancestors,
        );
        Ok(ConstructorDefinition {
            element,
            parameters,
            is_static,
            has_body,
        })
    }
}

#[derive(Clone, Debug)]
pub struct EnumMemberBuilder {
    name: String,
    value: Option<String>,
    attributes: Vec<AttributeBuilder>,
    location: Location,
}

impl EnumMemberBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            attributes: Vec::new(),
            location: Location::default(),
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn located(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

/// Running value of implicitly numbered enum members.
enum EnumCounter {
    Numeric(i128),
    Expression(String, u64),
}

impl EnumCounter {
    fn from_declared(value: &str) -> Self {
        match parse_integer(value) {
            Some(number) => EnumCounter::Numeric(number),
            None => EnumCounter::Expression(value.to_string(), 0),
        }
    }

    fn render(&self) -> String {
        match self {
            EnumCounter::Numeric(number) => number.to_string(),
            EnumCounter::Expression(expression, 0) => expression.clone(),
            EnumCounter::Expression(expression, offset) => format!("{} + {}", expression, offset),
        }
    }

    fn successor(self) -> Self {
        match self {
            EnumCounter::Numeric(number) => EnumCounter::Numeric(number.saturating_add(1)),
            EnumCounter::Expression(expression, offset) => {
                EnumCounter::Expression(expression, offset + 1)
            }
        }
    }
}

/// Parse a C# integer literal: decimal, hex or binary, with optional digit
/// separators, sign and type suffix.
fn parse_integer(text: &str) -> Option<i128> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits = digits.replace('_', "");
    let (radix, body) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex.to_string())
    } else if let Some(binary) = digits
        .strip_prefix("0b")
        .or_else(|| digits.strip_prefix("0B"))
    {
        (2, binary.to_string())
    } else {
        (10, digits.clone())
    };
    let body = body.trim_end_matches(['u', 'U', 'l', 'L']);
    if body.is_empty() {
        return None;
    }
    let value = i128::from_str_radix(body, radix).ok()?;
    Some(if negative { -value } else { value })
}

fn build_enum_members(
    members: Vec<EnumMemberBuilder>,
    scope: &Scope,
) -> Result<Vec<EnumMemberDefinition>, ModelError> {
    if members.is_empty() {
        return Ok(Vec::new());
    }
    if scope.keyword != TypeKeyword::Enum {
        return Err(scope.unsupported("enum member"));
    }

    let mut counter = EnumCounter::Numeric(0);
    let mut built = Vec::with_capacity(members.len());
    for (index, member) in members.into_iter().enumerate() {
        if let Some(declared) = &member.value {
            counter = EnumCounter::from_declared(declared.trim());
        }
        let effective_value = counter.render();
        counter = counter.successor();

        let full_name = format!("{}.{}", scope.full_name, member.name);
        built.push(EnumMemberDefinition {
            element: ElementInfo {
                item: ItemInfo {
                    raw_name: member.name.clone(),
                    full_raw_name: format!("{}.{}", scope.full_raw_name, member.name),
                    name: member.name,
                    location: member.location,
                    ancestors: scope.ancestors.clone(),
                    full_name: full_name.clone(),
                },
                declared_modifiers: Vec::new(),
                access_modifiers: scope.access,
                is_visible: scope.is_visible,
                attributes: build_attributes(member.attributes, &full_name),
            },
            index,
            value: member.value,
            effective_value,
        });
    }
    Ok(built)
}

#[derive(Clone, Debug)]
pub struct AttributeBuilder {
    name: String,
    arguments: Vec<(Option<String>, String)>,
    location: Location,
}

impl AttributeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            location: Location::default(),
        }
    }

    pub fn argument(mut self, value: impl Into<String>) -> Self {
        self.arguments.push((None, value.into()));
        self
    }

    pub fn named_argument(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.push((Some(name.into()), value.into()));
        self
    }

    pub fn located(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn build(self, owner: &str) -> AttributeDefinition {
        let raw_name = match self.name.find('<') {
            Some(index) => self.name[..index].to_string(),
            None => self.name.clone(),
        };
        let full_name = format!("{}[{}]", owner, self.name);

        let mut ordinal = 0;
        let arguments = self
            .arguments
            .into_iter()
            .map(|(name, value)| {
                let argument_type = match name {
                    Some(name) => ArgumentType::Named(name),
                    None => {
                        ordinal += 1;
                        ArgumentType::Ordinal(ordinal - 1)
                    }
                };
                let name = match &argument_type {
                    ArgumentType::Named(name) => name.clone(),
                    ArgumentType::Ordinal(index) => index.to_string(),
                };
                ArgumentDefinition {
                    item: ItemInfo {
                        full_name: format!("{}({})", full_name, name),
                        full_raw_name: format!("{}({})", full_name, name),
                        raw_name: name.clone(),
                        name,
                        location: self.location.clone(),
                        ancestors: Vec::new(),
                    },
                    value,
                    argument_type,
                }
            })
            .collect();

        AttributeDefinition {
            item: ItemInfo {
                name: self.name,
                raw_name,
                full_raw_name: full_name.clone(),
                full_name,
                location: self.location,
                ancestors: Vec::new(),
            },
            arguments,
        }
    }
}
