use std::collections::{BTreeMap, BTreeSet};

use graphql_type_graph::{Directive, OperationType, SchemaDefinition, TypeDefinition, TypeGraph, TypeKind};
use itertools::Itertools;

use crate::{subschemas::Subschema, StitchError};

pub(crate) struct Composition {
    pub(crate) graph: TypeGraph,
    /// Type name -> indexes of the subschemas defining the type, in input order.
    pub(crate) type_owners: BTreeMap<String, Vec<usize>>,
    /// Type name -> field name -> names of the subschemas able to resolve the field.
    pub(crate) field_ownership: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

pub(crate) fn compose(subschemas: &[Subschema<'_>]) -> Result<Composition, StitchError> {
    let mut composition = Composition {
        graph: TypeGraph::default(),
        type_owners: BTreeMap::new(),
        field_ownership: BTreeMap::new(),
    };

    for (idx, subschema) in subschemas.iter().enumerate() {
        compose_schema_definition(&mut composition.graph, subschema);

        for (name, directive_definition) in &subschema.graph.directive_definitions {
            if !composition.graph.directive_definitions.contains_key(name) {
                composition
                    .graph
                    .directive_definitions
                    .insert(name.clone(), directive_definition.clone());
            }
        }

        for definition in subschema.graph.types.values() {
            compose_type(&mut composition, subschemas, idx, definition)?;
        }
    }

    composition.graph.normalize_schema_definition();

    Ok(composition)
}

fn compose_schema_definition(graph: &mut TypeGraph, subschema: &Subschema<'_>) {
    let composed = graph.schema_definition.get_or_insert_with(SchemaDefinition::default);

    // Roots were renamed to the defaults, so a root is either absent or named like the default.
    for operation in OperationType::ALL {
        let root = composed.root_mut(operation);

        if root.is_none() {
            *root = subschema.graph.root_type_name(operation).map(str::to_owned);
        }
    }

    if let Some(schema_definition) = &subschema.graph.schema_definition {
        union_directives(&mut composed.directives, &schema_definition.directives);
    }
}

fn compose_type(
    composition: &mut Composition,
    subschemas: &[Subschema<'_>],
    idx: usize,
    definition: &TypeDefinition,
) -> Result<(), StitchError> {
    let subschema = subschemas[idx].name;
    let type_name = definition.name.as_str();
    let owners = composition.type_owners.entry(type_name.to_owned()).or_default();

    let Some(composed) = composition.graph.types.get_mut(type_name) else {
        owners.push(idx);
        composition.graph.types.insert(type_name.to_owned(), definition.clone());

        if let Some(fields) = definition.fields() {
            let ownership = composition.field_ownership.entry(type_name.to_owned()).or_default();

            for field_name in fields.keys() {
                ownership.insert(field_name.clone(), BTreeSet::from([subschema.to_owned()]));
            }
        }

        return Ok(());
    };

    if !composed.kind.same_kind(&definition.kind) {
        return Err(StitchError::TypeKindConflict {
            type_name: type_name.to_owned(),
            subschema: subschema.to_owned(),
            kind: definition.kind.name(),
            first_subschema: subschemas[owners[0]].name.to_owned(),
            first_kind: composed.kind.name(),
        });
    }

    owners.push(idx);

    tracing::debug!(type_name, subschema, "merging type definition");

    merge_description(&mut composed.description, &definition.description);
    union_directives(&mut composed.directives, &definition.directives);

    match (&mut composed.kind, &definition.kind) {
        (TypeKind::Scalar, TypeKind::Scalar) => (),
        (
            TypeKind::Object { implements, fields } | TypeKind::Interface { implements, fields },
            TypeKind::Object {
                implements: new_implements,
                fields: new_fields,
            }
            | TypeKind::Interface {
                implements: new_implements,
                fields: new_fields,
            },
        ) => {
            union_names(implements, new_implements);

            let ownership = composition.field_ownership.entry(type_name.to_owned()).or_default();

            for (field_name, field) in new_fields {
                let Some(composed_field) = fields.get_mut(field_name) else {
                    fields.insert(field_name.clone(), field.clone());
                    ownership.insert(field_name.clone(), BTreeSet::from([subschema.to_owned()]));
                    continue;
                };

                if !composed_field.same_signature(field) {
                    tracing::warn!(
                        type_name,
                        field_name = field_name.as_str(),
                        subschema,
                        "conflicting field definition ignored, the first definition is kept: `{}{}` vs `{}{}`",
                        field_name,
                        Signature(composed_field),
                        field_name,
                        Signature(field),
                    );
                    continue;
                }

                merge_description(&mut composed_field.description, &field.description);
                union_directives(&mut composed_field.directives, &field.directives);
                ownership.entry(field_name.clone()).or_default().insert(subschema.to_owned());
            }
        }
        (TypeKind::Union { members }, TypeKind::Union { members: new_members }) => {
            union_names(members, new_members);
        }
        (TypeKind::Enum { values }, TypeKind::Enum { values: new_values }) => {
            for (name, value) in new_values {
                match values.get_mut(name) {
                    Some(composed_value) => {
                        merge_description(&mut composed_value.description, &value.description);
                        union_directives(&mut composed_value.directives, &value.directives);
                    }
                    None => {
                        values.insert(name.clone(), value.clone());
                    }
                }
            }
        }
        (TypeKind::InputObject { fields }, TypeKind::InputObject { fields: new_fields }) => {
            for (name, field) in new_fields {
                match fields.get_mut(name) {
                    Some(composed_field) if composed_field.ty != field.ty => {
                        tracing::warn!(
                            type_name,
                            field_name = name.as_str(),
                            subschema,
                            "conflicting input field type ignored, the first definition is kept"
                        );
                    }
                    Some(composed_field) => {
                        merge_description(&mut composed_field.description, &field.description);
                        union_directives(&mut composed_field.directives, &field.directives);
                    }
                    None => {
                        fields.insert(name.clone(), field.clone());
                    }
                }
            }
        }
        // Kinds were compared above.
        _ => (),
    }

    Ok(())
}

fn merge_description(composed: &mut Option<String>, new: &Option<String>) {
    let is_empty = composed.as_deref().map_or(true, |description| description.trim().is_empty());

    if is_empty && new.as_deref().is_some_and(|description| !description.trim().is_empty()) {
        composed.clone_from(new);
    }
}

fn union_directives(composed: &mut Vec<Directive>, new: &[Directive]) {
    for directive in new {
        if !composed.contains(directive) {
            composed.push(directive.clone());
        }
    }
}

fn union_names(composed: &mut Vec<String>, new: &[String]) {
    for name in new {
        if !composed.contains(name) {
            composed.push(name.clone());
        }
    }
}

/// `(arg: Type = default): Type`, for diagnostics.
struct Signature<'a>(&'a graphql_type_graph::FieldDefinition);

impl std::fmt::Display for Signature<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field = self.0;

        if !field.arguments.is_empty() {
            let arguments = field
                .arguments
                .values()
                .format_with(", ", |argument, f| match &argument.default_value {
                    Some(default) => f(&format_args!("{}: {} = {default}", argument.name, argument.ty)),
                    None => f(&format_args!("{}: {}", argument.name, argument.ty)),
                });

            write!(f, "({arguments})")?;
        }

        write!(f, ": {}", field.ty)
    }
}

#[cfg(test)]
mod tests {
    use graphql_tools_protocol::SubschemaInput;
    use graphql_type_graph::print;
    use indoc::indoc;

    use super::*;
    use crate::subschemas::ingest_subschemas;

    fn compose_sdls(sdls: &[(&str, &str)]) -> Result<Composition, StitchError> {
        let inputs = sdls
            .iter()
            .map(|(name, sdl)| SubschemaInput {
                name: (*name).to_owned(),
                sdl: (*sdl).to_owned(),
                type_merge_config: BTreeMap::new(),
            })
            .collect::<Vec<_>>();

        compose(&ingest_subschemas(&inputs)?)
    }

    #[test]
    fn first_definition_wins() {
        let composition = compose_sdls(&[
            ("products", "type Query { product(id: ID!): Product } type Product { id: ID! price: Int }"),
            (
                "pricing",
                r#"type Query { prices: [Int] } type Product { id: ID! "In cents" price(currency: String): Int }"#,
            ),
        ])
        .unwrap();

        let ownership = &composition.field_ownership["Product"];

        assert_eq!(ownership["id"], BTreeSet::from(["pricing".to_owned(), "products".to_owned()]));
        assert_eq!(ownership["price"], BTreeSet::from(["products".to_owned()]));

        insta::assert_snapshot!(print(&composition.graph), @r#"
        type Query {
          product(id: ID!): Product
          prices: [Int]
        }

        type Product {
          id: ID!
          price: Int
        }
        "#);
    }

    #[test]
    fn descriptions_directives_and_members_are_unioned() {
        let composition = compose_sdls(&[
            (
                "a",
                indoc! {r#"
                    directive @tag(name: String!) repeatable on OBJECT | ENUM_VALUE
                    type Query { a: Int }
                    "" type Cat @tag(name: "pets") { name: String }
                    union Pet = Cat
                    enum Color { RED }
                "#},
            ),
            (
                "b",
                indoc! {r#"
                    directive @tag(name: String!) repeatable on OBJECT | ENUM_VALUE
                    type Query { b: Int }
                    "A cat" type Cat @tag(name: "pets") @tag(name: "felines") { name: String }
                    type Dog { name: String }
                    union Pet = Dog | Cat
                    enum Color { RED @tag(name: "warm") BLUE }
                "#},
            ),
        ])
        .unwrap();

        insta::assert_snapshot!(print(&composition.graph), @r#"
        directive @tag(name: String!) repeatable on OBJECT | ENUM_VALUE

        type Query {
          a: Int
          b: Int
        }

        """A cat"""
        type Cat @tag(name: "pets") @tag(name: "felines") {
          name: String
        }

        union Pet = Cat | Dog

        enum Color {
          RED @tag(name: "warm")
          BLUE
        }

        type Dog {
          name: String
        }
        "#);

        assert_eq!(composition.type_owners["Cat"], [0, 1]);
        assert_eq!(composition.type_owners["Dog"], [1]);
    }

    #[test]
    fn kind_conflicts_are_fatal() {
        let err = compose_sdls(&[
            ("a", "type Query { a: Status } type Status { code: Int }"),
            ("b", "type Query { b: Status } enum Status { OK }"),
        ])
        .err()
        .unwrap();

        assert_eq!(
            err.to_string(),
            "the type `Status` is defined as enum in subschema `b` but as object type in subschema `a`"
        );
    }
}
