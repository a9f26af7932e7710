use graphql_type_graph::ValidationError;

/// Why a set of subschemas could not be stitched. Every variant names the offending subschema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StitchError {
    #[error("the subschema at position {position} has an empty name")]
    EmptyName { position: usize },
    #[error("the subschema name `{0}` is used more than once")]
    DuplicateName(String),
    #[error("the subschema `{0}` has an empty SDL")]
    EmptySdl(String),
    #[error("invalid SDL in subschema `{subschema}`: {source}")]
    InvalidSchema {
        subschema: String,
        #[source]
        source: ValidationError,
    },
    #[error(
        "the {operation} root type `{root}` of subschema `{subschema}` cannot be renamed to `{default}`: another type has that name"
    )]
    RootTypeNameTaken {
        subschema: String,
        operation: &'static str,
        root: String,
        default: &'static str,
    },
    #[error(
        "the type `{type_name}` is defined as {kind} in subschema `{subschema}` but as {first_kind} in subschema `{first_subschema}`"
    )]
    TypeKindConflict {
        type_name: String,
        subschema: String,
        kind: &'static str,
        first_subschema: String,
        first_kind: &'static str,
    },
    #[error("invalid merge configuration for `{type_name}` in subschema `{subschema}`: {reason}")]
    InvalidMergeConfig {
        subschema: String,
        type_name: String,
        reason: String,
    },
}
