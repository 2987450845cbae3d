//! C# declaration extractor using tree-sitter.
//!
//! Walks namespaces and type declarations and turns every declaration the
//! model knows about into builders. Method bodies, events, indexers,
//! operators and delegates are skipped.

use tracing::trace;
use tree_sitter::{Node, Parser};

use super::helpers::{
    find_child_by_type, find_children_by_type, get_location, get_name, get_node_text,
    has_child_of_type, normalize_text,
};
use crate::error::ParseError;
use crate::model::{
    AccessorKind, AttributeBuilder, ConstructorBuilder, EnumMemberBuilder, FieldBuilder,
    MethodBuilder, ParameterBuilder, PropertyAccessorBuilder, PropertyBuilder, TypeBuilder,
    TypeKeyword,
};

const PARAMETER_MODIFIER_TOKENS: &[&str] = &["ref", "out", "in", "params", "this"];

/// Parse C# source code into top-level type builders.
pub fn parse(source: &str, file_path: &str) -> Result<Vec<TypeBuilder>, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
        .map_err(|e| ParseError::Language {
            message: e.to_string(),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::Unparsable {
            path: file_path.to_string(),
        })?;
    let root = tree.root_node();
    if root.has_error() {
        trace!(path = file_path, "Source contains syntax errors");
    }

    let extractor = Extractor { source, file_path };
    let mut types = Vec::new();
    extractor.process_container(&root, "", &mut types);
    Ok(types)
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}

fn type_keyword(node: &Node) -> Option<TypeKeyword> {
    match node.kind() {
        "class_declaration" => Some(TypeKeyword::Class),
        "struct_declaration" | "record_struct_declaration" => Some(TypeKeyword::Struct),
        "interface_declaration" => Some(TypeKeyword::Interface),
        "enum_declaration" => Some(TypeKeyword::Enum),
        "record_declaration" if has_child_of_type(node, "struct") => Some(TypeKeyword::Struct),
        "record_declaration" => Some(TypeKeyword::Class),
        _ => None,
    }
}

fn is_record(node: &Node) -> bool {
    matches!(node.kind(), "record_declaration" | "record_struct_declaration")
}

fn has_body(node: &Node) -> bool {
    has_child_of_type(node, "block") || has_child_of_type(node, "arrow_expression_clause")
}

struct Extractor<'s> {
    source: &'s str,
    file_path: &'s str,
}

impl<'s> Extractor<'s> {
    fn text(&self, node: &Node) -> &'s str {
        get_node_text(node, self.source)
    }

    /// Type text with insignificant whitespace removed.
    fn type_text(&self, node: &Node) -> String {
        normalize_text(self.text(node))
    }

    fn process_container(&self, node: &Node, namespace: &str, types: &mut Vec<TypeBuilder>) {
        // A file scoped namespace applies to every following sibling.
        let mut current = namespace.to_string();

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "namespace_declaration" => {
                    let nested = match child.child_by_field_name("name") {
                        Some(name) => qualify(namespace, self.text(&name)),
                        None => namespace.to_string(),
                    };
                    let body = child
                        .child_by_field_name("body")
                        .or_else(|| find_child_by_type(&child, "declaration_list"));
                    if let Some(body) = body {
                        self.process_container(&body, &nested, types);
                    }
                }
                "file_scoped_namespace_declaration" => {
                    if let Some(name) = child.child_by_field_name("name") {
                        current = qualify(namespace, self.text(&name));
                    }
                    self.process_container(&child, &current, types);
                }
                "declaration_list" => self.process_container(&child, &current, types),
                _ => {
                    if let Some(builder) = self.extract_type(&child) {
                        types.push(builder.in_namespace(current.as_str()));
                    }
                }
            }
        }
    }

    fn extract_type(&self, node: &Node) -> Option<TypeBuilder> {
        let keyword = type_keyword(node)?;
        let name = get_name(node, self.source)?;
        let modifiers = self.modifiers(node);
        let readonly = modifiers.iter().any(|m| m == "readonly");

        let mut builder = TypeBuilder::new(keyword, name)
            .modifiers(modifiers)
            .located(get_location(node, self.file_path));
        for attribute in self.attributes(node) {
            builder = builder.attribute(attribute);
        }

        let mut primary_parameters = None;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "type_parameter_list" => {
                    builder = builder.generic_parameters(self.type_parameters(&child));
                }
                "base_list" => {
                    for base in self.base_types(&child) {
                        builder = if keyword == TypeKeyword::Enum {
                            builder.underlying_type(base)
                        } else {
                            builder.implements(base)
                        };
                    }
                }
                "type_parameter_constraints_clause" => {
                    if let Some((parameter, constraints)) = self.constraint_clause(&child) {
                        builder = builder.constraint(parameter, constraints);
                    }
                }
                "parameter_list" => primary_parameters = Some(child),
                "declaration_list" => builder = self.extract_members(&child, builder),
                "enum_member_declaration_list" => {
                    for member in find_children_by_type(&child, "enum_member_declaration") {
                        if let Some(member) = self.enum_member(&member) {
                            builder = builder.enum_member(member);
                        }
                    }
                }
                _ => {}
            }
        }

        if let Some(parameters) = primary_parameters {
            builder = self.primary_constructor(&parameters, builder, is_record(node), readonly);
        }
        Some(builder)
    }

    /// Positional record parameters become public properties. Every primary
    /// constructor is a public constructor.
    fn primary_constructor(
        &self,
        parameters: &Node,
        mut builder: TypeBuilder,
        record: bool,
        readonly: bool,
    ) -> TypeBuilder {
        let parameters = self.parameters(parameters);
        if record {
            let mutable_struct = builder.keyword() == TypeKeyword::Struct && !readonly;
            for parameter in &parameters {
                let setter = if mutable_struct {
                    PropertyAccessorBuilder::set()
                } else {
                    PropertyAccessorBuilder::init()
                };
                builder = builder.property(
                    PropertyBuilder::new(parameter.parameter_type(), parameter.name())
                        .modifiers(["public"])
                        .accessor(PropertyAccessorBuilder::get())
                        .accessor(setter),
                );
            }
        }

        let mut constructor = ConstructorBuilder::new().modifiers(["public"]).with_body(true);
        for parameter in parameters {
            constructor = constructor.parameter(parameter);
        }
        builder.constructor(constructor)
    }

    fn extract_members(&self, body: &Node, mut builder: TypeBuilder) -> TypeBuilder {
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            match child.kind() {
                "field_declaration" => {
                    for field in self.fields(&child) {
                        builder = builder.field(field);
                    }
                }
                "property_declaration" => {
                    if let Some(property) = self.property(&child) {
                        builder = builder.property(property);
                    }
                }
                "method_declaration" => {
                    if let Some(method) = self.method(&child) {
                        builder = builder.method(method);
                    }
                }
                "constructor_declaration" => builder = builder.constructor(self.constructor(&child)),
                kind => match self.extract_type(&child) {
                    Some(nested) => builder = builder.child(nested),
                    None if child.is_named() && kind != "comment" => {
                        trace!(kind, "Skipping member declaration");
                    }
                    None => {}
                },
            }
        }
        builder
    }

    fn modifiers(&self, node: &Node) -> Vec<String> {
        find_children_by_type(node, "modifier")
            .iter()
            .map(|m| self.text(m).to_string())
            .collect()
    }

    fn attributes(&self, node: &Node) -> Vec<AttributeBuilder> {
        let mut attributes = Vec::new();
        for list in find_children_by_type(node, "attribute_list") {
            // `[return: ...]` and similar target other declarations.
            if has_child_of_type(&list, "attribute_target_specifier") {
                continue;
            }
            for attribute in find_children_by_type(&list, "attribute") {
                let name = attribute
                    .child_by_field_name("name")
                    .or_else(|| attribute.named_child(0))
                    .map(|n| self.text(&n))
                    .unwrap_or_default();
                let mut builder =
                    AttributeBuilder::new(name).located(get_location(&attribute, self.file_path));
                if let Some(arguments) = find_child_by_type(&attribute, "attribute_argument_list")
                {
                    builder = self.attribute_arguments(&arguments, builder);
                }
                attributes.push(builder);
            }
        }
        attributes
    }

    fn attribute_arguments(&self, arguments: &Node, mut builder: AttributeBuilder) -> AttributeBuilder {
        for argument in find_children_by_type(arguments, "attribute_argument") {
            let label = find_child_by_type(&argument, "name_equals")
                .or_else(|| find_child_by_type(&argument, "name_colon"))
                .and_then(|l| find_child_by_type(&l, "identifier"))
                .or_else(|| {
                    // `Name = value` written without a wrapper node.
                    let first = argument.child(0)?;
                    let separator = argument.child(1)?;
                    (first.kind() == "identifier" && matches!(separator.kind(), "=" | ":"))
                        .then_some(first)
                });
            let mut cursor = argument.walk();
            let value = argument
                .named_children(&mut cursor)
                .filter(|n| !matches!(n.kind(), "name_equals" | "name_colon"))
                .filter(|n| Some(n.id()) != label.map(|l| l.id()))
                .last()
                .map(|n| self.text(&n).trim().to_string())
                .unwrap_or_default();

            builder = match label {
                Some(name) => builder.named_argument(self.text(&name), value),
                None => builder.argument(value),
            };
        }
        builder
    }

    fn type_parameters(&self, list: &Node) -> Vec<String> {
        find_children_by_type(list, "type_parameter")
            .iter()
            .filter_map(|p| get_name(p, self.source))
            .map(str::to_string)
            .collect()
    }

    fn base_types(&self, list: &Node) -> Vec<String> {
        let mut cursor = list.walk();
        list.named_children(&mut cursor)
            .filter(|n| !matches!(n.kind(), "comment" | "argument_list"))
            .map(|n| {
                // `record Derived(int X) : Base(X)` passes arguments to the base.
                if n.kind() == "primary_constructor_base_type" {
                    let base = n.child_by_field_name("type").or_else(|| n.named_child(0));
                    base.map(|b| self.type_text(&b)).unwrap_or_default()
                } else {
                    self.type_text(&n)
                }
            })
            .filter(|t| !t.is_empty())
            .collect()
    }

    fn constraint_clause(&self, clause: &Node) -> Option<(String, Vec<String>)> {
        let mut parameter = None;
        let mut constraints = Vec::new();
        let mut cursor = clause.walk();
        for child in clause.named_children(&mut cursor) {
            match child.kind() {
                "comment" => {}
                "identifier" if parameter.is_none() => {
                    parameter = Some(self.text(&child).to_string());
                }
                _ => constraints.push(self.type_text(&child)),
            }
        }
        parameter.map(|p| (p, constraints))
    }

    fn explicit_implementation(node: &Node) -> bool {
        has_child_of_type(node, "explicit_interface_specifier")
    }

    fn fields(&self, node: &Node) -> Vec<FieldBuilder> {
        let Some(declaration) = find_child_by_type(node, "variable_declaration") else {
            return Vec::new();
        };
        let field_type = declaration
            .child_by_field_name("type")
            .or_else(|| declaration.named_child(0))
            .map(|t| self.type_text(&t))
            .unwrap_or_default();
        let modifiers = self.modifiers(node);
        let attributes = self.attributes(node);

        find_children_by_type(&declaration, "variable_declarator")
            .iter()
            .filter_map(|declarator| {
                let name = get_name(declarator, self.source)?;
                let mut field = FieldBuilder::new(field_type.as_str(), name)
                    .modifiers(modifiers.iter().cloned())
                    .located(get_location(declarator, self.file_path));
                for attribute in attributes.iter().cloned() {
                    field = field.attribute(attribute);
                }
                Some(field)
            })
            .collect()
    }

    fn property(&self, node: &Node) -> Option<PropertyBuilder> {
        if Self::explicit_implementation(node) {
            return None;
        }
        let name = get_name(node, self.source)?;
        let property_type = node
            .child_by_field_name("type")
            .map(|t| self.type_text(&t))
            .unwrap_or_default();

        let mut property = PropertyBuilder::new(property_type, name)
            .modifiers(self.modifiers(node))
            .located(get_location(node, self.file_path));
        for attribute in self.attributes(node) {
            property = property.attribute(attribute);
        }

        match find_child_by_type(node, "accessor_list") {
            Some(list) => {
                for accessor in find_children_by_type(&list, "accessor_declaration") {
                    if let Some(accessor) = self.accessor(&accessor) {
                        property = property.accessor(accessor);
                    }
                }
            }
            // Expression bodied: `public int Count => items.Count;`
            None => {
                property = property.accessor(
                    PropertyAccessorBuilder::get()
                        .located(get_location(node, self.file_path))
                        .with_body(true),
                );
            }
        }
        Some(property)
    }

    fn accessor(&self, node: &Node) -> Option<PropertyAccessorBuilder> {
        let keyword = match node.child_by_field_name("name") {
            Some(name) => self.text(&name),
            None => {
                let mut cursor = node.walk();
                let token = node
                    .children(&mut cursor)
                    .find(|c| AccessorKind::from_keyword(c.kind()).is_some());
                token.map(|t| t.kind())?
            }
        };
        // `add` and `remove` belong to events.
        let kind = AccessorKind::from_keyword(keyword)?;

        let mut accessor = PropertyAccessorBuilder::new(kind)
            .modifiers(self.modifiers(node))
            .located(get_location(node, self.file_path))
            .with_body(has_body(node));
        for attribute in self.attributes(node) {
            accessor = accessor.attribute(attribute);
        }
        Some(accessor)
    }

    fn method(&self, node: &Node) -> Option<MethodBuilder> {
        if Self::explicit_implementation(node) {
            return None;
        }
        let name = get_name(node, self.source)?;
        let return_type = node
            .child_by_field_name("returns")
            .or_else(|| node.child_by_field_name("type"))
            .map(|t| self.type_text(&t))
            .unwrap_or_default();

        let mut method = MethodBuilder::new(return_type, name)
            .modifiers(self.modifiers(node))
            .located(get_location(node, self.file_path))
            .with_body(has_body(node));
        for attribute in self.attributes(node) {
            method = method.attribute(attribute);
        }
        if let Some(list) = find_child_by_type(node, "type_parameter_list") {
            method = method.generic_parameters(self.type_parameters(&list));
        }
        for clause in find_children_by_type(node, "type_parameter_constraints_clause") {
            if let Some((parameter, constraints)) = self.constraint_clause(&clause) {
                method = method.constraint(parameter, constraints);
            }
        }
        if let Some(list) = find_child_by_type(node, "parameter_list") {
            for parameter in self.parameters(&list) {
                method = method.parameter(parameter);
            }
        }
        Some(method)
    }

    fn constructor(&self, node: &Node) -> ConstructorBuilder {
        let mut constructor = ConstructorBuilder::new()
            .modifiers(self.modifiers(node))
            .located(get_location(node, self.file_path))
            .with_body(has_body(node));
        for attribute in self.attributes(node) {
            constructor = constructor.attribute(attribute);
        }
        if let Some(list) = find_child_by_type(node, "parameter_list") {
            for parameter in self.parameters(&list) {
                constructor = constructor.parameter(parameter);
            }
        }
        constructor
    }

    fn parameters(&self, list: &Node) -> Vec<ParameterBuilder> {
        let mut cursor = list.walk();
        let children: Vec<Node> = list.children(&mut cursor).collect();
        let mut parameters = Vec::new();

        let mut index = 0;
        while index < children.len() {
            let child = children[index];
            match child.kind() {
                "parameter" | "parameter_array" => parameters.extend(self.parameter(&child)),
                // Some grammar versions inline `params T[] name` into the list.
                "params" if !child.is_named() => {
                    let rest: Vec<(usize, Node)> = children[index + 1..]
                        .iter()
                        .enumerate()
                        .filter(|(_, n)| n.is_named() && n.kind() != "attribute_list")
                        .take(2)
                        .map(|(offset, n)| (index + 1 + offset, *n))
                        .collect();
                    if let [(_, parameter_type), (name_index, name)] = rest[..] {
                        parameters.push(
                            ParameterBuilder::new(self.type_text(&parameter_type), self.text(&name))
                                .modifiers(["params"])
                                .located(get_location(&child, self.file_path)),
                        );
                        index = name_index;
                    }
                }
                _ => {}
            }
            index += 1;
        }
        parameters
    }

    fn parameter(&self, node: &Node) -> Option<ParameterBuilder> {
        let name_node = node
            .child_by_field_name("name")
            .or_else(|| find_child_by_type(node, "identifier"))?;

        let mut modifiers = Vec::new();
        let mut parameter_type = node.child_by_field_name("type").map(|t| self.type_text(&t));
        let mut default_value = None;
        let mut after_equals = false;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "modifier" | "parameter_modifier" => {
                    modifiers.extend(self.text(&child).split_whitespace().map(str::to_string));
                }
                "=" if !child.is_named() => after_equals = true,
                kind if !child.is_named() && PARAMETER_MODIFIER_TOKENS.contains(&kind) => {
                    modifiers.push(kind.to_string());
                }
                "equals_value_clause" => {
                    default_value = child.named_child(0).map(|v| self.text(&v).trim().to_string());
                }
                "attribute_list" | "comment" => {}
                _ if child.is_named() && after_equals && default_value.is_none() => {
                    default_value = Some(self.text(&child).trim().to_string());
                }
                _ if child.is_named()
                    && parameter_type.is_none()
                    && child.start_byte() < name_node.start_byte() =>
                {
                    parameter_type = Some(self.type_text(&child));
                }
                _ => {}
            }
        }
        if node.kind() == "parameter_array" && !modifiers.iter().any(|m| m == "params") {
            modifiers.push("params".to_string());
        }

        let mut parameter =
            ParameterBuilder::new(parameter_type.unwrap_or_default(), self.text(&name_node))
                .modifiers(modifiers)
                .located(get_location(node, self.file_path));
        if let Some(value) = default_value {
            parameter = parameter.default_value(value);
        }
        for attribute in self.attributes(node) {
            parameter = parameter.attribute(attribute);
        }
        Some(parameter)
    }

    fn enum_member(&self, node: &Node) -> Option<EnumMemberBuilder> {
        let name = get_name(node, self.source)?;
        let mut member = EnumMemberBuilder::new(name).located(get_location(node, self.file_path));

        let value = node.child_by_field_name("value").or_else(|| {
            find_child_by_type(node, "equals_value_clause").and_then(|c| c.named_child(0))
        });
        if let Some(value) = value {
            member = member.value(self.text(&value).trim());
        }
        for attribute in self.attributes(node) {
            member = member.attribute(attribute);
        }
        Some(member)
    }
}
