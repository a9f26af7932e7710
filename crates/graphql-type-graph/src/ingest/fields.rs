use super::*;
use crate::{EnumValueDefinition, FieldDefinition, FieldType, InputValueDefinition, Value};

pub(super) fn ingest_fields<'a>(
    type_name: &str,
    ast_fields: impl Iterator<Item = ast::FieldDefinition<'a>>,
    fields: &mut IndexMap<String, FieldDefinition>,
) -> Result<(), ValidationError> {
    for field in ast_fields {
        let field_name = field.name();
        let path = format!("{type_name}.{field_name}");

        let Entry::Vacant(entry) = fields.entry(field_name.to_owned()) else {
            return Err(ValidationError::DuplicateField(path));
        };

        let mut arguments = IndexMap::new();
        ingest_input_values(&path, field.arguments(), &mut arguments, ValidationError::DuplicateArgument)?;

        entry.insert(FieldDefinition {
            name: field_name.to_owned(),
            description: field.description().map(|description| description.to_cow().into_owned()),
            ty: FieldType::from(field.ty()),
            arguments,
            directives: ingest_directives(field.directives()),
        });
    }

    Ok(())
}

/// Arguments of fields and directive definitions, and fields of input objects.
pub(super) fn ingest_input_values<'a>(
    parent_path: &str,
    ast_values: impl Iterator<Item = ast::InputValueDefinition<'a>>,
    values: &mut IndexMap<String, InputValueDefinition>,
    duplicate_error: fn(String) -> ValidationError,
) -> Result<(), ValidationError> {
    for value in ast_values {
        let name = value.name();

        let Entry::Vacant(entry) = values.entry(name.to_owned()) else {
            return Err(duplicate_error(format!("{parent_path}.{name}")));
        };

        entry.insert(InputValueDefinition {
            name: name.to_owned(),
            description: value.description().map(|description| description.to_cow().into_owned()),
            ty: FieldType::from(value.ty()),
            default_value: value.default_value().map(Value::from),
            directives: ingest_directives(value.directives()),
        });
    }

    Ok(())
}

pub(super) fn ingest_enum_values<'a>(
    type_name: &str,
    ast_values: impl Iterator<Item = ast::EnumValueDefinition<'a>>,
    values: &mut IndexMap<String, EnumValueDefinition>,
) -> Result<(), ValidationError> {
    for value in ast_values {
        let name = value.value();

        let Entry::Vacant(entry) = values.entry(name.to_owned()) else {
            return Err(ValidationError::DuplicateEnumValue(format!("{type_name}.{name}")));
        };

        entry.insert(EnumValueDefinition {
            name: name.to_owned(),
            description: value.description().map(|description| description.to_cow().into_owned()),
            directives: ingest_directives(value.directives()),
        });
    }

    Ok(())
}
