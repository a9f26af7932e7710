//! The process boundary of the schema tools.
//!
//! Each invocation decodes one base64 message from its single positional argument, runs one
//! engine, and writes exactly one base64 message line to stdout. Everything else, logs and
//! diagnostics included, goes to stderr. Any failure exits with a nonzero code and writes
//! nothing to stdout.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod args;
mod config;
mod error;
mod telemetry;

use std::{
    io::{self, Write},
    panic::{self, AssertUnwindSafe},
    process::ExitCode,
};

use clap::{error::ErrorKind as ClapErrorKind, Parser};
use graphql_tools_protocol::{DiffInput, StitchingInput};

pub use self::{
    args::{Args, LogLevel, LogStyle},
    config::{Config, ConfigError, PROTO_ROOT_ENV},
    error::{ErrorKind, ToolError},
};

/// Which engine an invocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// StitchingInput in, StitchingOutput out.
    Stitch,
    /// DiffInput in, DiffOutput out.
    Diff,
}

impl Mode {
    fn as_str(self) -> &'static str {
        match self {
            Mode::Stitch => "stitching",
            Mode::Diff => "diff",
        }
    }
}

/// Read the configuration, parse the process arguments and [run].
///
/// The configuration comes first: a missing `GRAPHQL_PROTO_ROOT` is reported before any
/// argument is looked at.
pub fn main(mode: Mode) -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => return report(&ToolError::Configuration(err)),
    };

    match Args::try_parse() {
        Ok(args) => run(mode, config, args),
        Err(err) if matches!(err.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) => err.exit(),
        Err(err) => report(&ToolError::Arguments(err)),
    }
}

pub fn run(mode: Mode, config: Config, args: Args) -> ExitCode {
    telemetry::init(&args);

    tracing::debug!(proto_root = %config.proto_root.display(), "loaded configuration");

    let result = panic::catch_unwind(AssertUnwindSafe(|| execute(mode, &args))).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| (*message).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_owned());

        Err(ToolError::Panic(mode.as_str(), message))
    });

    match result.and_then(|output| write_output(&output)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

#[tracing::instrument(skip_all, fields(mode = mode.as_str()))]
fn execute(mode: Mode, args: &Args) -> Result<String, ToolError> {
    match mode {
        Mode::Stitch => {
            let input: StitchingInput = graphql_tools_protocol::decode(&args.input).map_err(ToolError::Decode)?;
            let output = graphql_stitching::stitch(&input)?;

            graphql_tools_protocol::encode(&output).map_err(ToolError::Encode)
        }
        Mode::Diff => {
            let input: DiffInput = graphql_tools_protocol::decode(&args.input).map_err(ToolError::Decode)?;
            let output = graphql_schema_diff::diff(&input)?;

            tracing::info!(changes = output.changes.len(), "diffed schemas");

            graphql_tools_protocol::encode(&output).map_err(ToolError::Encode)
        }
    }
}

fn write_output(output: &str) -> Result<(), ToolError> {
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "{output}")?;
    stdout.flush()?;

    Ok(())
}

fn report(err: &ToolError) -> ExitCode {
    let kind = err.kind();

    eprintln!("error: {kind}: {err}");

    ExitCode::from(kind.exit_code())
}
