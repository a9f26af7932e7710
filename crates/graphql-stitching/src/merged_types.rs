use std::collections::{BTreeMap, BTreeSet};

use graphql_tools_protocol::{MergedTypeConfig, TypeMergeConfig};
use graphql_type_graph::OperationType;

use crate::{compose::Composition, selection_set::top_level_fields, subschemas::Subschema, StitchError};

#[derive(Default)]
pub(crate) struct MergedTypes {
    pub(crate) configs: BTreeMap<String, MergedTypeConfig>,
    pub(crate) field_nodes_by_type: BTreeMap<String, Vec<String>>,
}

/// A type is merged when more than one subschema defines it and at least one of them says how
/// to fetch it. Root operation types are never merged.
pub(crate) fn build_merged_types(
    subschemas: &[Subschema<'_>],
    composition: &Composition,
) -> Result<MergedTypes, StitchError> {
    let mut selection_fields = BTreeMap::new();

    for subschema in subschemas {
        for (type_name, config) in subschema.type_merge_config {
            let fields = validate_merge_config(subschema, type_name, config, composition)?;
            selection_fields.insert((type_name.as_str(), subschema.name), fields);
        }
    }

    let mut merged_types = MergedTypes::default();

    for (type_name, owners) in &composition.type_owners {
        if owners.len() < 2 || composition.graph.is_root_type(type_name) {
            continue;
        }

        let configuring = owners
            .iter()
            .map(|idx| &subschemas[*idx])
            .filter_map(|subschema| {
                let config = subschema.type_merge_config.get(type_name)?;
                Some((subschema.name, config))
            })
            .collect::<Vec<_>>();

        if configuring.is_empty() {
            continue;
        }

        tracing::debug!(
            type_name = type_name.as_str(),
            subschemas = owners.len(),
            configured = configuring.len(),
            "merging type"
        );

        let mut config = MergedTypeConfig {
            type_name: type_name.clone(),
            ..Default::default()
        };

        for (subschema, merge_config) in &configuring {
            config
                .selection_sets
                .insert((*subschema).to_owned(), merge_config.selection_set.clone());
            config
                .resolvers
                .insert((*subschema).to_owned(), merge_config.field_name.clone());
        }

        for idx in owners {
            let subschema = subschemas[*idx].name;

            let targets = configuring
                .iter()
                .map(|(name, _)| *name)
                .filter(|name| *name != subschema)
                .map(str::to_owned)
                .collect::<BTreeSet<_>>();

            if !targets.is_empty() {
                config.declarative_target_subschemas.insert(subschema.to_owned(), targets);
            }
        }

        for (field_name, field_owners) in composition.field_ownership.get(type_name).into_iter().flatten() {
            if field_owners.len() == 1 {
                if let Some(owner) = field_owners.first() {
                    config.unique_fields_to_subschema.insert(field_name.clone(), owner.clone());
                }
            } else {
                config
                    .non_unique_fields_to_subschemas
                    .insert(field_name.clone(), field_owners.clone());
            }
        }

        let field_nodes = configuring
            .iter()
            .filter_map(|(subschema, _)| selection_fields.get(&(type_name.as_str(), *subschema)))
            .flatten()
            .cloned()
            .collect::<BTreeSet<String>>();

        merged_types
            .field_nodes_by_type
            .insert(type_name.clone(), field_nodes.into_iter().collect());
        merged_types.configs.insert(type_name.clone(), config);
    }

    Ok(merged_types)
}

/// Check a merge config and return the top-level fields of its selection set.
fn validate_merge_config(
    subschema: &Subschema<'_>,
    type_name: &str,
    config: &TypeMergeConfig,
    composition: &Composition,
) -> Result<Vec<String>, StitchError> {
    let invalid = |reason: String| StitchError::InvalidMergeConfig {
        subschema: subschema.name.to_owned(),
        type_name: type_name.to_owned(),
        reason,
    };

    if !subschema.graph.types.contains_key(type_name) {
        return Err(invalid("the type is not defined in this subschema".to_owned()));
    }

    let query_root = subschema.graph.root_type_name(OperationType::Query);

    let has_resolver = query_root.is_some_and(|root| subschema.graph.field(root, &config.field_name).is_some());

    if !has_resolver {
        return Err(invalid(format!(
            "`{}` is not a field of the query root type of this subschema",
            config.field_name
        )));
    }

    let Some(composed_fields) = composition
        .graph
        .types
        .get(type_name)
        .and_then(|definition| definition.fields())
    else {
        return Err(invalid("only object and interface types can be merged".to_owned()));
    };

    let fields = top_level_fields(&config.selection_set).map_err(invalid)?;

    for field in &fields {
        if field != "__typename" && !composed_fields.contains_key(field) {
            return Err(invalid(format!(
                "the selection set selects `{field}`, which is not a field of `{type_name}`"
            )));
        }
    }

    Ok(fields)
}
