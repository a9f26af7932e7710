use super::*;
use crate::{Directive, DirectiveDefinition, Value};

pub(super) fn ingest_directives<'a>(directives: impl Iterator<Item = ast::Directive<'a>>) -> Vec<Directive> {
    directives
        .map(|directive| Directive {
            name: directive.name().to_owned(),
            arguments: directive
                .arguments()
                .map(|argument| (argument.name().to_owned(), Value::from(argument.value())))
                .collect(),
        })
        .collect()
}

pub(super) fn ingest_directive_definition(
    directive_definition: ast::DirectiveDefinition<'_>,
    graph: &mut TypeGraph,
) -> Result<(), ValidationError> {
    let name = directive_definition.name();

    if graph.directive_definitions.contains_key(name) {
        return Err(ValidationError::DuplicateDirectiveDefinition(name.to_owned()));
    }

    let mut arguments = IndexMap::new();

    ingest_input_values(
        &format!("@{name}"),
        directive_definition.arguments(),
        &mut arguments,
        ValidationError::DuplicateArgument,
    )?;

    let definition = DirectiveDefinition {
        name: name.to_owned(),
        description: directive_definition
            .description()
            .map(|description| description.to_cow().into_owned()),
        arguments,
        repeatable: directive_definition.is_repeatable(),
        locations: directive_definition
            .locations()
            .map(|location| location.as_str().to_owned())
            .collect(),
    };

    graph.directive_definitions.insert(name.to_owned(), definition);

    Ok(())
}
