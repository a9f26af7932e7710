#![allow(unused_crate_dependencies)]

use graphql_type_graph::{parse, print, OperationType};
use indoc::indoc;
use pretty_assertions::assert_eq;

fn assert_stable(sdl: &str) {
    let graph = parse(sdl).unwrap();
    let printed = print(&graph);
    let reparsed = parse(&printed).unwrap();

    assert_eq!(graph, reparsed);
    assert_eq!(printed, print(&reparsed));
}

#[test]
fn reviews_schema() {
    assert_stable(indoc! {r#"
        """
        The root of all queries.
        """
        type Query {
          "Look up a product by id"
          product(id: ID!): Product
          reviews(first: Int = 10, after: String, filter: ReviewFilter = {minRating: 3, tags: ["a", "b"]}): [Review!]!
        }

        type Product @key(fields: "id") {
          id: ID!
          reviews: [Review!]! @deprecated
          rating: Float @deprecated(reason: "Use averageRating")
        }

        type Review implements Node {
          id: ID!
          body: String
          author: User
        }

        interface Node {
          id: ID!
        }

        type User implements Node {
          id: ID!
          name: String!
        }

        input ReviewFilter {
          minRating: Int = 1
          tags: [String!]
          weight: Float = 0.25
        }

        enum Sort {
          "Newest first"
          NEWEST
          OLDEST @deprecated(reason: "No one uses this")
        }

        union Content = Review | Product

        scalar DateTime

        directive @key(fields: String!) repeatable on OBJECT | INTERFACE
    "#});
}

#[test]
fn custom_roots_and_schema_directives() {
    let sdl = indoc! {r#"
        schema @contact(name: "Team") {
          query: RootQuery
          subscription: RootSubscription
        }

        directive @contact(name: String!) on SCHEMA

        type RootQuery { now: String }
        type RootSubscription { ticks: Int! }
    "#};

    assert_stable(sdl);

    let graph = parse(sdl).unwrap();
    assert_eq!(graph.root_type_name(OperationType::Query), Some("RootQuery"));
    assert_eq!(graph.root_type_name(OperationType::Mutation), None);
    assert_eq!(graph.root_type_name(OperationType::Subscription), Some("RootSubscription"));
}

#[test]
fn descriptions_that_need_escaping() {
    assert_stable(indoc! {r#"
        type Query {
          "Ends with a quote \""
          a: Int
          "Two\nlines"
          b: Int
          " padded "
          c: Int
          "Back\\slash"
          d: Int
        }
    "#});
}

#[test]
fn extensions_are_merged() {
    let graph = parse(indoc! {r#"
        type Query { a: Int }
        extend type Query @deprecated { b: Int }
        enum Color { RED }
        extend enum Color { GREEN }
        union Shape = Square
        extend union Shape = Circle
        type Square { side: Int }
        type Circle { radius: Int }
    "#})
    .unwrap();

    insta::assert_snapshot!(print(&graph), @r#"
    type Query @deprecated {
      a: Int
      b: Int
    }

    enum Color {
      RED
      GREEN
    }

    union Shape = Square | Circle

    type Square {
      side: Int
    }

    type Circle {
      radius: Int
    }
    "#);
}

#[test]
fn schema_extension_without_definition() {
    let sdl = indoc! {r#"
        directive @d on SCHEMA

        extend schema @d

        type Query { a: Int }
        type Mutation { b: Int }
    "#};

    let graph = parse(sdl).unwrap();

    assert_eq!(graph.root_type_name(OperationType::Query), Some("Query"));
    assert_eq!(graph.root_type_name(OperationType::Mutation), Some("Mutation"));

    insta::assert_snapshot!(print(&graph), @r"
    schema @d {
      query: Query
      mutation: Mutation
    }

    directive @d on SCHEMA

    type Query {
      a: Int
    }

    type Mutation {
      b: Int
    }
    ");

    assert_stable(sdl);
}

#[test]
fn schema_extension_after_definition() {
    let graph = parse(indoc! {r#"
        directive @d on SCHEMA

        extend schema @d { mutation: Commands }
        schema { query: Root }

        type Root { a: Int }
        type Commands { b: Int }
        type Mutation { c: Int }
    "#})
    .unwrap();

    assert_eq!(graph.root_type_name(OperationType::Query), Some("Root"));
    assert_eq!(graph.root_type_name(OperationType::Mutation), Some("Commands"));
}
