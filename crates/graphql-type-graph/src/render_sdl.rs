mod display_utils;

use std::fmt::{self, Write as _};

pub(crate) use self::display_utils::write_quoted;

use self::display_utils::*;
use crate::{DirectiveDefinition, FieldDefinition, OperationType, SchemaDefinition, TypeDefinition, TypeGraph, TypeKind};

/// Render the graph as SDL. The schema definition comes first when there is one, then
/// directive definitions, then types in insertion order, separated by blank lines.
///
/// The output is deterministic and parses back to an equal graph.
pub fn print(graph: &TypeGraph) -> String {
    Renderer { graph }.to_string()
}

struct Renderer<'a> {
    graph: &'a TypeGraph,
}

impl fmt::Display for Renderer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Renderer { graph } = self;
        let mut write_leading_whitespace = {
            let mut first_block = true;
            move |f: &mut fmt::Formatter<'_>| {
                if first_block {
                    first_block = false;
                    Ok(())
                } else {
                    f.write_char('\n')
                }
            }
        };

        if let Some(schema_definition) = &graph.schema_definition {
            write_leading_whitespace(f)?;
            write_schema_definition(f, schema_definition)?;
        }

        for directive_definition in graph.directive_definitions.values() {
            write_leading_whitespace(f)?;
            write_directive_definition(f, directive_definition)?;
        }

        for definition in graph.types.values() {
            write_leading_whitespace(f)?;
            write_type_definition(f, definition)?;
        }

        Ok(())
    }
}

fn write_schema_definition(f: &mut fmt::Formatter<'_>, schema_definition: &SchemaDefinition) -> fmt::Result {
    f.write_str("schema")?;
    write_directives(f, &schema_definition.directives)?;
    f.write_char(' ')?;

    write_block(f, |f| {
        for operation in OperationType::ALL {
            if let Some(root) = schema_definition.root(operation) {
                writeln!(f, "{INDENT}{}: {root}", operation.as_str())?;
            }
        }

        Ok(())
    })?;

    f.write_char('\n')
}

fn write_directive_definition(f: &mut fmt::Formatter<'_>, directive_definition: &DirectiveDefinition) -> fmt::Result {
    write_description(f, directive_definition.description.as_deref(), "")?;
    write!(f, "directive @{}", directive_definition.name)?;
    write_arguments(f, directive_definition.arguments.values(), "")?;

    if directive_definition.repeatable {
        f.write_str(" repeatable")?;
    }

    writeln!(f, " on {}", directive_definition.locations.join(" | "))
}

fn write_type_definition(f: &mut fmt::Formatter<'_>, definition: &TypeDefinition) -> fmt::Result {
    write_description(f, definition.description.as_deref(), "")?;
    write!(f, "{} {}", definition.kind.keyword(), definition.name)?;

    match &definition.kind {
        TypeKind::Scalar => write_directives(f, &definition.directives)?,
        TypeKind::Object { implements, fields } | TypeKind::Interface { implements, fields } => {
            if !implements.is_empty() {
                write!(f, " implements {}", implements.join(" & "))?;
            }

            write_directives(f, &definition.directives)?;

            if !fields.is_empty() {
                f.write_char(' ')?;
                write_block(f, |f| fields.values().try_for_each(|field| write_field(f, field)))?;
            }
        }
        TypeKind::Union { members } => {
            write_directives(f, &definition.directives)?;

            if !members.is_empty() {
                write!(f, " = {}", members.join(" | "))?;
            }
        }
        TypeKind::Enum { values } => {
            write_directives(f, &definition.directives)?;

            if !values.is_empty() {
                f.write_char(' ')?;
                write_block(f, |f| {
                    for value in values.values() {
                        write_description(f, value.description.as_deref(), INDENT)?;
                        f.write_str(INDENT)?;
                        f.write_str(&value.name)?;
                        write_directives(f, &value.directives)?;
                        f.write_char('\n')?;
                    }

                    Ok(())
                })?;
            }
        }
        TypeKind::InputObject { fields } => {
            write_directives(f, &definition.directives)?;

            if !fields.is_empty() {
                f.write_char(' ')?;
                write_block(f, |f| {
                    for field in fields.values() {
                        write_description(f, field.description.as_deref(), INDENT)?;
                        f.write_str(INDENT)?;
                        write_input_value(f, field)?;
                        f.write_char('\n')?;
                    }

                    Ok(())
                })?;
            }
        }
    }

    f.write_char('\n')
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &FieldDefinition) -> fmt::Result {
    write_description(f, field.description.as_deref(), INDENT)?;
    f.write_str(INDENT)?;
    f.write_str(&field.name)?;
    write_arguments(f, field.arguments.values(), INDENT)?;
    write!(f, ": {}", field.ty)?;
    write_directives(f, &field.directives)?;
    f.write_char('\n')
}
