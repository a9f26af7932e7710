#![allow(unused_crate_dependencies)]

use std::{collections::BTreeMap, process::Output};

use duct::{cmd, Expression};
use graphql_tools_protocol::{
    decode, encode, CriticalityLevel, DiffInput, DiffOutput, StitchingInput, StitchingOutput, SubschemaInput,
    TypeMergeConfig,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const STITCH: &str = env!("CARGO_BIN_EXE_graphql-stitch");
const DIFF: &str = env!("CARGO_BIN_EXE_graphql-diff");

fn command(binary: &str, args: &[&str], proto_root: Option<&TempDir>) -> Expression {
    let command = cmd(binary, args)
        .env_remove("GRAPHQL_TOOLS_LOG")
        .env_remove("GRAPHQL_TOOLS_LOG_STYLE")
        .stdout_capture()
        .stderr_capture()
        .unchecked();

    match proto_root {
        Some(dir) => command.env("GRAPHQL_PROTO_ROOT", dir.path()),
        None => command.env_remove("GRAPHQL_PROTO_ROOT"),
    }
}

fn run(binary: &str, input: &str) -> Output {
    let proto_root = tempfile::tempdir().unwrap();
    command(binary, &[input], Some(&proto_root)).run().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

fn assert_failure(output: &Output, code: i32, kind: &str) {
    assert_eq!(output.status.code(), Some(code), "stderr: {}", stderr(output));
    assert_eq!(stdout(output), "");
    assert!(
        stderr(output).contains(&format!("error: {kind}: ")),
        "unexpected stderr: {}",
        stderr(output)
    );
}

fn stitching_input() -> StitchingInput {
    let mut products = SubschemaInput {
        name: "products".to_owned(),
        sdl: indoc! {r#"
            type Query {
              product(id: ID!): Product
            }

            type Product {
              id: ID!
              name: String
            }
        "#}
        .to_owned(),
        type_merge_config: BTreeMap::new(),
    };

    products.type_merge_config.insert(
        "Product".to_owned(),
        TypeMergeConfig {
            selection_set: "{ id }".to_owned(),
            field_name: "product".to_owned(),
        },
    );

    let inventory = SubschemaInput {
        name: "inventory".to_owned(),
        sdl: indoc! {r#"
            type Query {
              inStock: [Product!]!
            }

            type Product {
              id: ID!
              stock: Int
            }
        "#}
        .to_owned(),
        type_merge_config: BTreeMap::new(),
    };

    StitchingInput {
        subschemas: vec![products, inventory],
    }
}

fn diff_input(old_schema: &str, new_schema: &str, rules: &[&str]) -> DiffInput {
    DiffInput {
        old_schema: old_schema.to_owned(),
        new_schema: new_schema.to_owned(),
        shared_directive_definitions: None,
        rules: rules.iter().map(|rule| (*rule).to_owned()).collect(),
    }
}

#[test]
fn stitch_writes_one_message_line() {
    let input = stitching_input();
    let output = run(STITCH, &encode(&input).unwrap());

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let stdout = stdout(&output);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.ends_with('\n'));

    let stitched: StitchingOutput = decode(stdout.trim_end()).unwrap();

    assert_eq!(stitched, graphql_stitching::stitch(&input).unwrap());
    assert!(stitched.stitched_schema_text.contains("stock: Int"));
}

#[test]
fn diff_reports_an_added_field() {
    let input = diff_input(
        "type Query { hello: String }",
        "type Query { hello: String world: String }",
        &[],
    );
    let output = run(DIFF, &encode(&input).unwrap());

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let DiffOutput { changes } = decode(stdout(&output).trim_end()).unwrap();

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].path, "Query.world");
    assert_eq!(changes[0].change_type, "FIELD_ADDED");
    assert_eq!(changes[0].criticality.level, CriticalityLevel::NonBreaking);
}

#[test]
fn identical_schemas_produce_an_empty_diff() {
    let schema = "type Query { hello: String }";
    let output = run(DIFF, &encode(&diff_input(schema, schema, &[])).unwrap());

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let diff: DiffOutput = decode(stdout(&output).trim_end()).unwrap();
    assert_eq!(diff, DiffOutput::default());
}

#[test]
fn missing_proto_root() {
    let input = encode(&stitching_input()).unwrap();

    for binary in [STITCH, DIFF] {
        let output = command(binary, &[&input], None).run().unwrap();

        assert_failure(&output, 2, "ConfigurationError");
        assert!(stderr(&output).contains("GRAPHQL_PROTO_ROOT"));
    }
}

#[test]
fn proto_root_must_be_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("messages.proto");
    std::fs::write(&file, "").unwrap();

    let output = cmd(STITCH, [encode(&stitching_input()).unwrap()])
        .env("GRAPHQL_PROTO_ROOT", &file)
        .stdout_capture()
        .stderr_capture()
        .unchecked()
        .run()
        .unwrap();

    assert_failure(&output, 2, "ConfigurationError");
}

#[test]
fn configuration_is_checked_before_the_input() {
    let output = command(DIFF, &["not a message"], None).run().unwrap();

    assert_failure(&output, 2, "ConfigurationError");
}

#[test]
fn configuration_is_checked_before_the_arguments() {
    let output = command(STITCH, &[], None).run().unwrap();

    assert_failure(&output, 2, "ConfigurationError");
    assert!(stderr(&output).contains("GRAPHQL_PROTO_ROOT"));
    assert!(!stderr(&output).contains("<INPUT>"), "{}", stderr(&output));
}

#[test]
fn failures_are_reported_once() {
    let output = run(STITCH, "%%%");

    assert_failure(&output, 5, "FormatError");
    assert_eq!(stderr(&output).matches("FormatError").count(), 1, "{}", stderr(&output));
}

#[test]
fn missing_input_argument() {
    let proto_root = tempfile::tempdir().unwrap();
    let output = command(STITCH, &[], Some(&proto_root)).run().unwrap();

    assert_failure(&output, 2, "ConfigurationError");
}

#[test]
fn malformed_messages() {
    // Not base64.
    assert_failure(&run(STITCH, "%%%"), 5, "FormatError");

    // A diff message handed to the stitching entry point.
    let input = encode(&diff_input("type Query { a: Int }", "type Query { a: Int }", &[])).unwrap();
    assert_failure(&run(STITCH, &input), 5, "FormatError");
}

#[test]
fn unsupported_rule() {
    let input = diff_input("type Query { a: Int }", "type Query { a: Int }", &["RULE_IGNORE_UNREACHABLE"]);
    let output = run(DIFF, &encode(&input).unwrap());

    assert_failure(&output, 4, "UnsupportedRuleError");
    assert!(stderr(&output).contains("RULE_IGNORE_UNREACHABLE"));
}

#[test]
fn invalid_schemas() {
    let mut input = stitching_input();
    input.subschemas[1].sdl = "type Query {".to_owned();

    let output = run(STITCH, &encode(&input).unwrap());

    assert_failure(&output, 3, "ValidationError");
    assert!(stderr(&output).contains("`inventory`"));

    let input = diff_input("type Query { a: Int }", "type Query { a: Nope }", &[]);
    let output = run(DIFF, &encode(&input).unwrap());

    assert_failure(&output, 3, "ValidationError");
    assert!(stderr(&output).contains("newSchema"));
}

#[test]
fn logs_stay_on_stderr() {
    let proto_root = tempfile::tempdir().unwrap();
    let input = encode(&stitching_input()).unwrap();

    for style in ["text", "json"] {
        let output = command(STITCH, &["--log", "debug", "--log-style", style, &input], Some(&proto_root))
            .run()
            .unwrap();

        assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
        assert_eq!(stdout(&output).lines().count(), 1);
        assert!(stderr(&output).contains("loaded configuration"));

        let _: StitchingOutput = decode(stdout(&output).trim_end()).unwrap();
    }
}
