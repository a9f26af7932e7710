//! Conversion from the parser's AST to the owned [TypeGraph]. Kept apart so that the rest of
//! the crate never sees parser types.

mod directives;
mod fields;

use cynic_parser::type_system as ast;
use indexmap::{map::Entry, IndexMap};

use self::{directives::*, fields::*};
use crate::{OperationType, SchemaDefinition, TypeDefinition, TypeGraph, TypeKind, ValidationError};

pub(crate) fn ingest_document(document: &ast::TypeSystemDocument) -> Result<TypeGraph, ValidationError> {
    let mut graph = TypeGraph::default();

    for definition in document.definitions() {
        match definition {
            ast::Definition::Type(type_definition) => ingest_type_definition(type_definition, &mut graph)?,
            ast::Definition::Directive(directive_definition) => {
                ingest_directive_definition(directive_definition, &mut graph)?
            }
            ast::Definition::Schema(_) | ast::Definition::SchemaExtension(_) | ast::Definition::TypeExtension(_) => (),
        }
    }

    // Extensions may come before the definition they extend.
    for definition in document.definitions() {
        match definition {
            ast::Definition::TypeExtension(type_extension) => ingest_type_extension(type_extension, &mut graph)?,
            ast::Definition::Schema(schema) => ingest_schema_definition(schema, &mut graph),
            _ => (),
        }
    }

    for definition in document.definitions() {
        if let ast::Definition::SchemaExtension(schema) = definition {
            ingest_schema_extension(schema, &mut graph);
        }
    }

    Ok(graph)
}

/// Without a `schema` definition, the extension extends the implicit one made of the default
/// root types.
fn ingest_schema_extension(schema: ast::SchemaDefinition<'_>, graph: &mut TypeGraph) {
    if graph.schema_definition.is_none() {
        let mut implicit = SchemaDefinition::default();

        for operation in OperationType::ALL {
            let name = operation.default_type_name();

            if graph.types.contains_key(name) {
                *implicit.root_mut(operation) = Some(name.to_owned());
            }
        }

        graph.schema_definition = Some(implicit);
    }

    ingest_schema_definition(schema, graph);
}

fn ingest_schema_definition(schema: ast::SchemaDefinition<'_>, graph: &mut TypeGraph) {
    let definition = graph.schema_definition.get_or_insert_with(SchemaDefinition::default);

    let roots = [
        (OperationType::Query, schema.query_type()),
        (OperationType::Mutation, schema.mutation_type()),
        (OperationType::Subscription, schema.subscription_type()),
    ];

    for (operation, root) in roots {
        if let Some(root) = root {
            *definition.root_mut(operation) = Some(root.named_type().to_owned());
        }
    }

    definition.directives.extend(ingest_directives(schema.directives()));
}

fn ingest_type_definition(type_definition: ast::TypeDefinition<'_>, graph: &mut TypeGraph) -> Result<(), ValidationError> {
    let type_name = type_definition.name();

    let kind = match type_definition {
        ast::TypeDefinition::Scalar(_) => TypeKind::Scalar,
        ast::TypeDefinition::Object(_) => TypeKind::Object {
            implements: Vec::new(),
            fields: IndexMap::new(),
        },
        ast::TypeDefinition::Interface(_) => TypeKind::Interface {
            implements: Vec::new(),
            fields: IndexMap::new(),
        },
        ast::TypeDefinition::Union(_) => TypeKind::Union { members: Vec::new() },
        ast::TypeDefinition::Enum(_) => TypeKind::Enum { values: IndexMap::new() },
        ast::TypeDefinition::InputObject(_) => TypeKind::InputObject { fields: IndexMap::new() },
    };

    let definition = match graph.types.entry(type_name.to_owned()) {
        Entry::Occupied(_) => return Err(ValidationError::DuplicateType(type_name.to_owned())),
        Entry::Vacant(entry) => entry.insert(TypeDefinition {
            name: type_name.to_owned(),
            description: type_definition
                .description()
                .map(|description| description.to_cow().into_owned()),
            directives: Vec::new(),
            kind,
        }),
    };

    ingest_type_body(type_definition, definition)
}

fn ingest_type_extension(type_extension: ast::TypeDefinition<'_>, graph: &mut TypeGraph) -> Result<(), ValidationError> {
    let type_name = type_extension.name();

    let Some(definition) = graph.types.get_mut(type_name) else {
        return Err(ValidationError::ExtendedUndefinedType(type_name.to_owned()));
    };

    ingest_type_body(type_extension, definition)
}

/// Add the directives and members of a definition or extension to `target`.
fn ingest_type_body(type_definition: ast::TypeDefinition<'_>, target: &mut TypeDefinition) -> Result<(), ValidationError> {
    let type_name = type_definition.name();

    target.directives.extend(ingest_directives(type_definition.directives()));

    match (type_definition, &mut target.kind) {
        (ast::TypeDefinition::Scalar(_), TypeKind::Scalar) => (),
        (ast::TypeDefinition::Object(object), TypeKind::Object { implements, fields }) => {
            push_unique(implements, object.implements_interfaces());
            ingest_fields(type_name, object.fields(), fields)?;
        }
        (ast::TypeDefinition::Interface(interface), TypeKind::Interface { implements, fields }) => {
            push_unique(implements, interface.implements_interfaces());
            ingest_fields(type_name, interface.fields(), fields)?;
        }
        (ast::TypeDefinition::Union(union), TypeKind::Union { members }) => {
            push_unique(members, union.members().map(|member| member.name()));
        }
        (ast::TypeDefinition::Enum(enm), TypeKind::Enum { values }) => {
            ingest_enum_values(type_name, enm.values(), values)?;
        }
        (ast::TypeDefinition::InputObject(input_object), TypeKind::InputObject { fields }) => {
            ingest_input_values(type_name, input_object.fields(), fields, ValidationError::DuplicateField)?;
        }
        (type_definition, kind) => {
            return Err(ValidationError::ExtensionKindMismatch {
                name: type_name.to_owned(),
                expected: kind.name(),
                found: ast_kind_name(&type_definition),
            })
        }
    }

    Ok(())
}

fn ast_kind_name(type_definition: &ast::TypeDefinition<'_>) -> &'static str {
    match type_definition {
        ast::TypeDefinition::Scalar(_) => "scalar",
        ast::TypeDefinition::Object(_) => "object type",
        ast::TypeDefinition::Interface(_) => "interface",
        ast::TypeDefinition::Union(_) => "union",
        ast::TypeDefinition::Enum(_) => "enum",
        ast::TypeDefinition::InputObject(_) => "input object type",
    }
}

fn push_unique<'a>(names: &mut Vec<String>, new_names: impl Iterator<Item = &'a str>) {
    for name in new_names {
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_owned());
        }
    }
}
