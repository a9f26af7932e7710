#![allow(unused_crate_dependencies)]

use std::process::ExitCode;

use graphql_schema_tools::Mode;

fn main() -> ExitCode {
    graphql_schema_tools::main(Mode::Diff)
}
