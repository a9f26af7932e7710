//! An owned, name-indexed model of a GraphQL type system document.
//!
//! Definitions live in insertion-ordered maps keyed by name. References between definitions
//! (field types, implemented interfaces, union members, root operation types) are stored as
//! names and resolved through the [TypeGraph] on demand, so cyclic schemas need no special
//! treatment.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod error;
mod field_type;
mod graph;
mod ingest;
mod render_sdl;
mod validate;
mod value;

pub use self::{
    error::ValidationError,
    field_type::FieldType,
    graph::*,
    render_sdl::print,
    value::Value,
};

/// The scalars every schema has without defining them.
pub const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID"];

/// The directives every schema can use without defining them.
pub const BUILTIN_DIRECTIVES: &[&str] = &["deprecated", "skip", "include", "specifiedBy", "oneOf"];

/// Parse and validate a GraphQL SDL document.
///
/// Empty or whitespace-only input yields an empty graph.
pub fn parse(sdl: &str) -> Result<TypeGraph, ValidationError> {
    if sdl.trim().is_empty() {
        return Ok(TypeGraph::default());
    }

    let document =
        cynic_parser::parse_type_system_document(sdl).map_err(|err| ValidationError::Syntax(err.to_string()))?;

    let mut graph = ingest::ingest_document(&document)?;

    validate::validate(&graph)?;
    graph.normalize_schema_definition();

    Ok(graph)
}
