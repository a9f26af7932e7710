/// A document that is not a valid type system document. Locations are dot separated paths such
/// as `Product.reviews.first`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0}")]
    Syntax(String),
    #[error("the type `{0}` is defined more than once")]
    DuplicateType(String),
    #[error("the directive `@{0}` is defined more than once")]
    DuplicateDirectiveDefinition(String),
    #[error("the field `{0}` is defined more than once")]
    DuplicateField(String),
    #[error("the argument `{0}` is defined more than once")]
    DuplicateArgument(String),
    #[error("the enum value `{0}` is defined more than once")]
    DuplicateEnumValue(String),
    #[error("cannot extend `{0}`: the type is not defined")]
    ExtendedUndefinedType(String),
    #[error("cannot extend `{name}` as {found}: it is defined as {expected}")]
    ExtensionKindMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("unknown type `{name}` referenced at `{location}`")]
    UnknownType { name: String, location: String },
    #[error("Unknown directive \"@{0}\"")]
    UnknownDirective(String),
}
