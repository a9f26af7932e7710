use std::fmt;

use graphql_type_graph::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    #[error("invalid {side}: {source}")]
    InvalidSchema {
        side: Side,
        #[source]
        source: ValidationError,
    },
    #[error("unsupported rule `{0}`")]
    UnsupportedRule(String),
}

/// Which of the two compared schemas an error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Old => "oldSchema",
            Side::New => "newSchema",
        })
    }
}
