//! Schema stitching: compose independently authored subschemas into one schema, and tell a
//! gateway which subschema resolves which field.
//!
//! Conflicts are settled by input order: the first subschema defining a type or field decides
//! its shape. See [stitch] for the details.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod compose;
mod error;
mod merged_types;
mod selection_set;
mod subschemas;

use graphql_tools_protocol::{StitchingInput, StitchingOutput};

pub use self::error::StitchError;

/// Stitch the subschemas of `input` together.
///
/// - Every subschema must have a unique, non-empty name and a non-empty, valid SDL.
/// - Root operation types are renamed to `Query`, `Mutation` and `Subscription`.
/// - A type or field defined by several subschemas keeps the shape of the first definition.
///   Subschemas defining a field with another type or other arguments do not own it.
/// - Descriptions: the first non-empty one wins. Directive usages, implemented interfaces,
///   union members and enum values are unioned.
/// - A type defined with different kinds in two subschemas is an error.
#[tracing::instrument(skip_all, fields(subschemas = input.subschemas.len()))]
pub fn stitch(input: &StitchingInput) -> Result<StitchingOutput, StitchError> {
    let subschemas = subschemas::ingest_subschemas(&input.subschemas)?;
    let composition = compose::compose(&subschemas)?;
    let merged_types = merged_types::build_merged_types(&subschemas, &composition)?;

    let stitched_schema_text = graphql_type_graph::print(&composition.graph);

    tracing::debug!(
        types = composition.graph.types.len(),
        merged_types = merged_types.configs.len(),
        "stitched subschemas"
    );

    Ok(StitchingOutput {
        stitched_schema_text,
        field_ownership: composition.field_ownership,
        merged_types: merged_types.configs,
        field_nodes_by_type: merged_types.field_nodes_by_type,
    })
}
