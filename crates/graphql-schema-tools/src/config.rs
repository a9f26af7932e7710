use std::{ffi::OsString, path::PathBuf};

/// Names the root directory of the shared message definitions.
pub const PROTO_ROOT_ENV: &str = "GRAPHQL_PROTO_ROOT";

/// Settings read from the environment once, before any input is decoded.
#[derive(Debug, Clone)]
pub struct Config {
    pub proto_root: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("the environment variable {PROTO_ROOT_ENV} is not set")]
    MissingProtoRoot,
    #[error("the environment variable {PROTO_ROOT_ENV} is empty")]
    EmptyProtoRoot,
    #[error("the environment variable {PROTO_ROOT_ENV} points to `{}`, which is not a directory", .0.display())]
    ProtoRootNotADirectory(PathBuf),
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_proto_root(std::env::var_os(PROTO_ROOT_ENV))
    }

    fn from_proto_root(proto_root: Option<OsString>) -> Result<Config, ConfigError> {
        let proto_root = proto_root.ok_or(ConfigError::MissingProtoRoot)?;

        if proto_root.is_empty() {
            return Err(ConfigError::EmptyProtoRoot);
        }

        let proto_root = PathBuf::from(proto_root);

        if !proto_root.is_dir() {
            return Err(ConfigError::ProtoRootNotADirectory(proto_root));
        }

        Ok(Config { proto_root })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proto_root_must_be_a_directory() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config::from_proto_root(Some(dir.path().into())).unwrap();
        assert_eq!(config.proto_root, dir.path());

        let file = dir.path().join("messages.proto");
        std::fs::write(&file, "").unwrap();

        assert!(matches!(
            Config::from_proto_root(Some(file.into())),
            Err(ConfigError::ProtoRootNotADirectory(_))
        ));
    }

    #[test]
    fn proto_root_must_be_set() {
        let err = Config::from_proto_root(None).unwrap_err();
        assert_eq!(err.to_string(), "the environment variable GRAPHQL_PROTO_ROOT is not set");

        assert!(matches!(
            Config::from_proto_root(Some(OsString::new())),
            Err(ConfigError::EmptyProtoRoot)
        ));
    }
}
