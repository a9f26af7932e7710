use graphql_schema_diff::DiffError;
use graphql_stitching::StitchError;
use graphql_tools_protocol::FormatError;

use crate::config::ConfigError;

/// The failure taxonomy seen by the caller, one exit code each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ErrorKind {
    InternalError,
    ConfigurationError,
    ValidationError,
    UnsupportedRuleError,
    FormatError,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InternalError => 1,
            ErrorKind::ConfigurationError => 2,
            ErrorKind::ValidationError => 3,
            ErrorKind::UnsupportedRuleError => 4,
            ErrorKind::FormatError => 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{}", .0.to_string().trim_end())]
    Arguments(clap::Error),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("could not decode the input message: {0}")]
    Decode(#[source] FormatError),
    #[error(transparent)]
    Stitch(#[from] StitchError),
    #[error(transparent)]
    Diff(#[from] DiffError),
    #[error("could not encode the output message: {0}")]
    Encode(#[source] FormatError),
    #[error("could not write the output message: {0}")]
    Output(#[from] std::io::Error),
    #[error("the {0} engine panicked: {1}")]
    Panic(&'static str, String),
}

impl ToolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::Arguments(_) | ToolError::Configuration(_) => ErrorKind::ConfigurationError,
            ToolError::Decode(_) => ErrorKind::FormatError,
            ToolError::Stitch(_) | ToolError::Diff(DiffError::InvalidSchema { .. }) => ErrorKind::ValidationError,
            ToolError::Diff(DiffError::UnsupportedRule(_)) => ErrorKind::UnsupportedRuleError,
            ToolError::Encode(_) | ToolError::Output(_) | ToolError::Panic(..) => ErrorKind::InternalError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_errors() {
        let err = ToolError::from(DiffError::UnsupportedRule("RULE_IGNORE_UNREACHABLE".into()));

        assert_eq!(err.kind(), ErrorKind::UnsupportedRuleError);
        assert_eq!(err.kind().exit_code(), 4);
        assert_eq!(err.kind().to_string(), "UnsupportedRuleError");
    }

    #[test]
    fn configuration_errors() {
        let err = ToolError::from(ConfigError::MissingProtoRoot);

        assert_eq!(err.kind(), ErrorKind::ConfigurationError);
        assert_eq!(err.kind().exit_code(), 2);
    }
}
