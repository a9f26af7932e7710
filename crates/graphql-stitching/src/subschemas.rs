use std::collections::{BTreeMap, HashSet};

use graphql_tools_protocol::{SubschemaInput, TypeMergeConfig};
use graphql_type_graph::{OperationType, TypeGraph};

use crate::StitchError;

/// A validated subschema with its roots renamed to the defaults.
pub(crate) struct Subschema<'a> {
    pub(crate) name: &'a str,
    pub(crate) graph: TypeGraph,
    pub(crate) type_merge_config: &'a BTreeMap<String, TypeMergeConfig>,
}

pub(crate) fn ingest_subschemas(inputs: &[SubschemaInput]) -> Result<Vec<Subschema<'_>>, StitchError> {
    let mut seen_names = HashSet::with_capacity(inputs.len());

    for (position, input) in inputs.iter().enumerate() {
        if input.name.trim().is_empty() {
            return Err(StitchError::EmptyName { position });
        }

        if !seen_names.insert(input.name.as_str()) {
            return Err(StitchError::DuplicateName(input.name.clone()));
        }

        if input.sdl.trim().is_empty() {
            return Err(StitchError::EmptySdl(input.name.clone()));
        }
    }

    inputs.iter().map(ingest_subschema).collect()
}

fn ingest_subschema(input: &SubschemaInput) -> Result<Subschema<'_>, StitchError> {
    let mut graph = graphql_type_graph::parse(&input.sdl).map_err(|source| StitchError::InvalidSchema {
        subschema: input.name.clone(),
        source,
    })?;

    normalize_root_types(&input.name, &mut graph)?;

    tracing::debug!(subschema = input.name.as_str(), types = graph.types.len(), "ingested subschema");

    Ok(Subschema {
        name: &input.name,
        graph,
        type_merge_config: &input.type_merge_config,
    })
}

/// Rename custom root operation types (e.g. `schema { query: RootQuery }`) to the default names
/// so that the roots of all subschemas line up.
fn normalize_root_types(subschema: &str, graph: &mut TypeGraph) -> Result<(), StitchError> {
    for operation in OperationType::ALL {
        let default = operation.default_type_name();

        let Some(root) = graph.root_type_name(operation).map(str::to_owned) else {
            continue;
        };

        if root == default {
            continue;
        }

        if graph.types.contains_key(default) {
            return Err(StitchError::RootTypeNameTaken {
                subschema: subschema.to_owned(),
                operation: operation.as_str(),
                root,
                default,
            });
        }

        tracing::debug!(subschema, from = root.as_str(), to = default, "renaming root type");
        graph.rename_type(&root, default);
    }

    graph.normalize_schema_definition();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, sdl: &str) -> SubschemaInput {
        SubschemaInput {
            name: name.to_owned(),
            sdl: sdl.to_owned(),
            type_merge_config: BTreeMap::new(),
        }
    }

    fn error(inputs: &[SubschemaInput]) -> StitchError {
        match ingest_subschemas(inputs) {
            Ok(_) => unreachable!("expected an error"),
            Err(err) => err,
        }
    }

    #[test]
    fn names_must_be_unique_and_non_empty() {
        assert_eq!(
            error(&[input("a", "type Query { a: Int }"), input(" ", "type Query { b: Int }")]),
            StitchError::EmptyName { position: 1 }
        );
        assert_eq!(
            error(&[input("a", "type Query { a: Int }"), input("a", "type Query { b: Int }")]),
            StitchError::DuplicateName("a".into())
        );
    }

    #[test]
    fn sdl_must_be_present_and_valid() {
        assert_eq!(error(&[input("a", "  ")]), StitchError::EmptySdl("a".into()));

        let err = error(&[input("a", "type Query { a: Int }"), input("b", "type Query {")]);
        assert!(matches!(&err, StitchError::InvalidSchema { subschema, .. } if subschema == "b"), "{err}");
    }

    #[test]
    fn roots_are_renamed() {
        let inputs = [input(
            "a",
            "schema { query: RootQuery mutation: Commands } type RootQuery { a: Int } type Commands { b: Int }",
        )];
        let subschemas = ingest_subschemas(&inputs).unwrap();

        let graph = &subschemas[0].graph;

        assert!(graph.schema_definition.is_none());
        assert_eq!(graph.types.keys().collect::<Vec<_>>(), ["Query", "Mutation"]);
    }

    #[test]
    fn root_rename_collision() {
        let err = error(&[input(
            "a",
            "schema { query: RootQuery } type RootQuery { a: Int } type Query { b: Int }",
        )]);

        assert!(matches!(err, StitchError::RootTypeNameTaken { .. }), "{err}");
    }
}
