use cynic_parser::executable as ast;

/// The top-level field names of a merge selection set such as `{ id sku }`. The outer braces
/// are optional. An empty text selects nothing.
pub(crate) fn top_level_fields(selection_set: &str) -> Result<Vec<String>, String> {
    let selection_set = selection_set.trim();

    if selection_set.is_empty() {
        return Ok(Vec::new());
    }

    let document = if selection_set.starts_with('{') {
        selection_set.to_owned()
    } else {
        format!("{{ {selection_set} }}")
    };

    let parsed = cynic_parser::parse_executable_document(&document)
        .map_err(|err| format!("could not parse `{selection_set}` as a selection set: {err}"))?;

    let mut operations = parsed.operations();

    let Some(operation) = operations.next() else {
        return Err(format!("`{selection_set}` is not a selection set"));
    };

    if operations.next().is_some() {
        return Err(format!("`{selection_set}` must be a single selection set"));
    }

    operation
        .selection_set()
        .map(|selection| match selection {
            ast::Selection::Field(field) => Ok(field.name().to_owned()),
            _ => Err(format!("fragments are not supported in `{selection_set}`")),
        })
        .collect()
}
