//! Semantic diffing of GraphQL schemas.
//!
//! Every difference between two versions of a schema is reported as a [Change](graphql_tools_protocol::Change)
//! classified as BREAKING, DANGEROUS or NON_BREAKING for existing clients. [Rule]s post-process
//! the classification.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod change;
mod diff_config;
mod error;
mod rules;
mod state;
mod traverse_schemas;
mod type_safety;

use graphql_tools_protocol::{Change, DiffInput, DiffOutput};

pub use self::{
    change::ChangeKind,
    diff_config::DiffConfig,
    error::{DiffError, Side},
    rules::Rule,
};

/// Diff the two schemas of `input`, applying its rules.
///
/// Rules are checked before the schemas are parsed, so an unknown rule is reported even when a
/// schema is invalid.
#[tracing::instrument(skip_all, fields(rules = input.rules.len()))]
pub fn diff(input: &DiffInput) -> Result<DiffOutput, DiffError> {
    let rules = Rule::parse_all(input.rules.iter().map(String::as_str))?;

    let config = DiffConfig::default()
        .with_rules(rules)
        .with_shared_directive_definitions(input.shared_directive_definitions.as_deref());

    let changes = diff_with_config(&input.old_schema, &input.new_schema, config)?;

    Ok(DiffOutput { changes })
}

/// Diff two SDL documents. The changes go from `source` to `target` and are ordered by
/// criticality (BREAKING first), then path, change type and message.
pub fn diff_with_config(source: &str, target: &str, config: DiffConfig) -> Result<Vec<Change>, DiffError> {
    let [source, target] = [(Side::Old, source), (Side::New, target)].map(|(side, sdl)| {
        let sdl = match &config.shared_directive_definitions {
            Some(definitions) => format!("{definitions}\n{sdl}"),
            None => sdl.to_owned(),
        };

        graphql_type_graph::parse(&sdl).map_err(|source| DiffError::InvalidSchema { side, source })
    });

    let (source, target) = (source?, target?);

    let mut state = state::DiffState::default();
    traverse_schemas::traverse_schemas(&source, &target, &mut state);

    let mut changes = state.into_changes();
    let detected = changes.len();

    rules::apply_rules(&config.rules, &mut changes);

    changes.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| a.path.cmp(&b.path))
            .then_with(|| a.kind.as_str().cmp(b.kind.as_str()))
            .then_with(|| a.message.cmp(&b.message))
    });

    tracing::debug!(detected, reported = changes.len(), "diffed schemas");

    Ok(changes.into_iter().map(change::SchemaChange::into_change).collect())
}
