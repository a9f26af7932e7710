#![allow(unused_crate_dependencies)]

use std::collections::{BTreeMap, BTreeSet};

use graphql_stitching::{stitch, StitchError};
use graphql_tools_protocol::{MergedTypeConfig, StitchingInput, SubschemaInput, TypeMergeConfig};
use graphql_type_graph::OperationType;
use indoc::indoc;
use pretty_assertions::assert_eq;

fn subschema(name: &str, sdl: &str) -> SubschemaInput {
    SubschemaInput {
        name: name.to_owned(),
        sdl: sdl.to_owned(),
        type_merge_config: BTreeMap::new(),
    }
}

fn with_merge_config(mut subschema: SubschemaInput, type_name: &str, selection_set: &str, field_name: &str) -> SubschemaInput {
    subschema.type_merge_config.insert(
        type_name.to_owned(),
        TypeMergeConfig {
            selection_set: selection_set.to_owned(),
            field_name: field_name.to_owned(),
        },
    );
    subschema
}

fn names(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

fn catalog() -> StitchingInput {
    StitchingInput {
        subschemas: vec![
            with_merge_config(
                subschema(
                    "products",
                    indoc! {r#"
                        type Query {
                          product(id: ID!): Product
                          products: [Product!]!
                        }

                        type Product {
                          id: ID!
                          name: String
                          price: Int
                        }
                    "#},
                ),
                "Product",
                "{ id }",
                "product",
            ),
            with_merge_config(
                subschema(
                    "reviews",
                    indoc! {r#"
                        type Query {
                          productWithReviews(id: ID!): Product
                        }

                        type Product {
                          id: ID!
                          reviews: [Review!]!
                        }

                        type Review {
                          body: String
                          rating: Int
                        }
                    "#},
                ),
                "Product",
                "{ id }",
                "productWithReviews",
            ),
            subschema(
                "inventory",
                indoc! {r#"
                    type Product {
                      id: ID!
                      inStock: Boolean
                    }
                "#},
            ),
        ],
    }
}

#[test]
fn disjoint_subschemas_are_composed_unchanged() {
    let output = stitch(&StitchingInput {
        subschemas: vec![
            subschema("products", "type Product { id: ID! name: String }"),
            subschema("reviews", "type Review { productId: ID! text: String }"),
        ],
    })
    .unwrap();

    insta::assert_snapshot!(output.stitched_schema_text, @r#"
    type Product {
      id: ID!
      name: String
    }

    type Review {
      productId: ID!
      text: String
    }
    "#);

    assert_eq!(
        output.field_ownership,
        BTreeMap::from([
            (
                "Product".to_owned(),
                BTreeMap::from([("id".to_owned(), names(&["products"])), ("name".to_owned(), names(&["products"]))])
            ),
            (
                "Review".to_owned(),
                BTreeMap::from([
                    ("productId".to_owned(), names(&["reviews"])),
                    ("text".to_owned(), names(&["reviews"]))
                ])
            ),
        ])
    );
    assert!(output.merged_types.is_empty());
    assert!(output.field_nodes_by_type.is_empty());
}

#[test]
fn merged_types() {
    let output = stitch(&catalog()).unwrap();

    insta::assert_snapshot!(output.stitched_schema_text, @r#"
    type Query {
      product(id: ID!): Product
      products: [Product!]!
      productWithReviews(id: ID!): Product
    }

    type Product {
      id: ID!
      name: String
      price: Int
      reviews: [Review!]!
      inStock: Boolean
    }

    type Review {
      body: String
      rating: Int
    }
    "#);

    assert_eq!(
        output.merged_types,
        BTreeMap::from([(
            "Product".to_owned(),
            MergedTypeConfig {
                type_name: "Product".to_owned(),
                selection_sets: BTreeMap::from([
                    ("products".to_owned(), "{ id }".to_owned()),
                    ("reviews".to_owned(), "{ id }".to_owned()),
                ]),
                resolvers: BTreeMap::from([
                    ("products".to_owned(), "product".to_owned()),
                    ("reviews".to_owned(), "productWithReviews".to_owned()),
                ]),
                declarative_target_subschemas: BTreeMap::from([
                    ("inventory".to_owned(), names(&["products", "reviews"])),
                    ("products".to_owned(), names(&["reviews"])),
                    ("reviews".to_owned(), names(&["products"])),
                ]),
                unique_fields_to_subschema: BTreeMap::from([
                    ("inStock".to_owned(), "inventory".to_owned()),
                    ("name".to_owned(), "products".to_owned()),
                    ("price".to_owned(), "products".to_owned()),
                    ("reviews".to_owned(), "reviews".to_owned()),
                ]),
                non_unique_fields_to_subschemas: BTreeMap::from([(
                    "id".to_owned(),
                    names(&["inventory", "products", "reviews"])
                )]),
            }
        )])
    );

    assert_eq!(
        output.field_nodes_by_type,
        BTreeMap::from([("Product".to_owned(), vec!["id".to_owned()])])
    );

    // Root types are shared but never merged.
    assert_eq!(
        output.field_ownership["Query"]["productWithReviews"],
        names(&["reviews"])
    );
}

#[test]
fn stitching_is_deterministic() {
    let first = stitch(&catalog()).unwrap();

    for _ in 0..5 {
        assert_eq!(stitch(&catalog()).unwrap(), first);
    }

    assert_eq!(
        graphql_tools_protocol::encode(&first).unwrap(),
        graphql_tools_protocol::encode(&stitch(&catalog()).unwrap()).unwrap()
    );
}

#[test]
fn every_composed_field_has_an_owner() {
    let input = catalog();
    let output = stitch(&input).unwrap();
    let graph = graphql_type_graph::parse(&output.stitched_schema_text).unwrap();
    let subschema_names = input.subschemas.iter().map(|s| s.name.clone()).collect::<BTreeSet<_>>();

    for definition in graph.types.values() {
        let Some(fields) = definition.fields() else { continue };

        for field_name in fields.keys() {
            let owners = &output.field_ownership[&definition.name][field_name];

            assert!(!owners.is_empty(), "{}.{field_name}", definition.name);
            assert!(owners.is_subset(&subschema_names));
        }
    }
}

#[test]
fn custom_root_names_are_normalized() {
    let output = stitch(&StitchingInput {
        subschemas: vec![
            subschema("a", "schema { query: RootA } type RootA { a: Int }"),
            subschema("b", "schema { query: RootB } type RootB { b: Int }"),
        ],
    })
    .unwrap();

    assert_eq!(output.stitched_schema_text, "type Query {\n  a: Int\n  b: Int\n}\n");
    assert_eq!(output.field_ownership["Query"]["b"], names(&["b"]));
}

#[test]
fn schema_directives_keep_every_root() {
    let output = stitch(&StitchingInput {
        subschemas: vec![
            subschema("a", "type Query { a: Int } type Mutation { m: Int }"),
            subschema(
                "b",
                "directive @d on SCHEMA schema @d { query: Query } type Query { b: Int }",
            ),
        ],
    })
    .unwrap();

    insta::assert_snapshot!(output.stitched_schema_text, @r"
    schema @d {
      query: Query
      mutation: Mutation
    }

    directive @d on SCHEMA

    type Query {
      a: Int
      b: Int
    }

    type Mutation {
      m: Int
    }
    ");

    let graph = graphql_type_graph::parse(&output.stitched_schema_text).unwrap();

    assert_eq!(graph.root_type_name(OperationType::Mutation), Some("Mutation"));
    assert!(graph.is_root_type("Mutation"));
}

#[test]
fn merge_selection_sets_select_the_union_of_key_fields() {
    let output = stitch(&StitchingInput {
        subschemas: vec![
            with_merge_config(
                subschema("a", "type Query { userById(id: ID!): User } type User { id: ID! email: String! }"),
                "User",
                "{ id }",
                "userById",
            ),
            with_merge_config(
                subschema(
                    "b",
                    "type Query { userByEmail(email: String!): User } type User { email: String! id: ID! karma: Int }",
                ),
                "User",
                "email __typename",
                "userByEmail",
            ),
        ],
    })
    .unwrap();

    assert_eq!(
        output.field_nodes_by_type["User"],
        ["__typename", "email", "id"]
    );
}

#[test]
fn invalid_merge_configs() {
    let base = || {
        vec![
            subschema("a", "type Query { product(id: ID!): Product } type Product { id: ID! }"),
            subschema("b", "type Query { b: Int } type Product { id: ID! name: String }"),
        ]
    };

    let stitch_with = |type_name: &str, selection_set: &str, field_name: &str| {
        let mut subschemas = base();
        subschemas[0] = with_merge_config(subschemas[0].clone(), type_name, selection_set, field_name);
        stitch(&StitchingInput { subschemas }).unwrap_err()
    };

    let err = stitch_with("Missing", "{ id }", "product");
    assert_eq!(
        err.to_string(),
        "invalid merge configuration for `Missing` in subschema `a`: the type is not defined in this subschema"
    );

    let err = stitch_with("Product", "{ id }", "nope");
    assert_eq!(
        err.to_string(),
        "invalid merge configuration for `Product` in subschema `a`: `nope` is not a field of the query root type of this subschema"
    );

    let err = stitch_with("Product", "{ sku }", "product");
    assert_eq!(
        err.to_string(),
        "invalid merge configuration for `Product` in subschema `a`: the selection set selects `sku`, which is not a field of `Product`"
    );

    let err = stitch_with("Product", "{ id", "product");
    assert!(matches!(err, StitchError::InvalidMergeConfig { .. }), "{err}");
}

#[test]
fn invalid_subschemas_are_named() {
    let err = stitch(&StitchingInput {
        subschemas: vec![
            subschema("good", "type Query { a: Int }"),
            subschema("bad", "type Query { a: Unknown }"),
        ],
    })
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid SDL in subschema `bad`: unknown type `Unknown` referenced at `Query.a`"
    );

    let err = stitch(&StitchingInput {
        subschemas: vec![subschema("bad", "type Query { a: Int @myDirective }")],
    })
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        r#"invalid SDL in subschema `bad`: Unknown directive "@myDirective""#
    );
}

#[test]
fn no_subschemas() {
    let output = stitch(&StitchingInput { subschemas: Vec::new() }).unwrap();

    assert_eq!(output.stitched_schema_text, "");
    assert!(output.field_ownership.is_empty());
}
