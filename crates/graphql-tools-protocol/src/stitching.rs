use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::Message;

/// The subschemas to stitch, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StitchingInput {
    pub subschemas: Vec<SubschemaInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubschemaInput {
    /// Unique among the subschemas of one [StitchingInput].
    pub name: String,
    pub sdl: String,
    /// Type name -> how this subschema resolves the type when it is merged.
    #[serde(default)]
    pub type_merge_config: BTreeMap<String, TypeMergeConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMergeConfig {
    /// The fields this subschema needs from another subschema's version of the type, e.g. `{ id }`.
    pub selection_set: String,
    /// The query root field fetching an instance of the type by key.
    pub field_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StitchingOutput {
    pub stitched_schema_text: String,
    /// Type name -> field name -> subschemas able to resolve the field.
    #[serde(default)]
    pub field_ownership: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
    #[serde(default)]
    pub merged_types: BTreeMap<String, MergedTypeConfig>,
    /// Merged type name -> fields a gateway must always select on it to plan merges.
    #[serde(default)]
    pub field_nodes_by_type: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedTypeConfig {
    pub type_name: String,
    /// Subschema name -> selection set.
    #[serde(default)]
    pub selection_sets: BTreeMap<String, String>,
    /// Subschema name -> query root field used to fetch the type.
    #[serde(default)]
    pub resolvers: BTreeMap<String, String>,
    /// Subschema name -> the other subschemas the type can be resolved through from it.
    #[serde(default)]
    pub declarative_target_subschemas: BTreeMap<String, BTreeSet<String>>,
    #[serde(default)]
    pub unique_fields_to_subschema: BTreeMap<String, String>,
    #[serde(default)]
    pub non_unique_fields_to_subschemas: BTreeMap<String, BTreeSet<String>>,
}

impl Message for StitchingInput {
    const KIND: &'static str = "StitchingInput";
}

impl Message for SubschemaInput {
    const KIND: &'static str = "SubschemaInput";
}

impl Message for StitchingOutput {
    const KIND: &'static str = "StitchingOutput";
}

impl Message for MergedTypeConfig {
    const KIND: &'static str = "MergedTypeConfig";
}

impl Message for TypeMergeConfig {
    const KIND: &'static str = "TypeMergeConfig";
}
