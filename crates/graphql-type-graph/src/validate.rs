use crate::{
    Directive, FieldType, InputValueDefinition, OperationType, TypeGraph, TypeKind, ValidationError, BUILTIN_DIRECTIVES,
    BUILTIN_SCALARS,
};

/// Reference checks that need the whole document: every named type and every used directive
/// must be defined.
pub(crate) fn validate(graph: &TypeGraph) -> Result<(), ValidationError> {
    let ctx = ValidateContext { graph };

    if let Some(schema) = &graph.schema_definition {
        for operation in OperationType::ALL {
            if let Some(root) = schema.root(operation) {
                ctx.validate_type_name(root, || format!("schema.{}", operation.as_str()))?;
            }
        }

        ctx.validate_directives(&schema.directives)?;
    }

    for definition in graph.directive_definitions.values() {
        for argument in definition.arguments.values() {
            ctx.validate_input_value(argument, || format!("@{}.{}", definition.name, argument.name))?;
        }
    }

    for definition in graph.types.values() {
        let type_name = definition.name.as_str();

        ctx.validate_directives(&definition.directives)?;

        match &definition.kind {
            TypeKind::Scalar => (),
            TypeKind::Object { implements, fields } | TypeKind::Interface { implements, fields } => {
                for interface in implements {
                    ctx.validate_type_name(interface, || type_name.to_owned())?;
                }

                for field in fields.values() {
                    ctx.validate_field_type(&field.ty, || format!("{type_name}.{}", field.name))?;
                    ctx.validate_directives(&field.directives)?;

                    for argument in field.arguments.values() {
                        ctx.validate_input_value(argument, || {
                            format!("{type_name}.{}.{}", field.name, argument.name)
                        })?;
                    }
                }
            }
            TypeKind::Union { members } => {
                for member in members {
                    ctx.validate_type_name(member, || type_name.to_owned())?;
                }
            }
            TypeKind::Enum { values } => {
                for value in values.values() {
                    ctx.validate_directives(&value.directives)?;
                }
            }
            TypeKind::InputObject { fields } => {
                for field in fields.values() {
                    ctx.validate_input_value(field, || format!("{type_name}.{}", field.name))?;
                }
            }
        }
    }

    Ok(())
}

struct ValidateContext<'a> {
    graph: &'a TypeGraph,
}

impl ValidateContext<'_> {
    fn validate_input_value(
        &self,
        input_value: &InputValueDefinition,
        location: impl FnOnce() -> String,
    ) -> Result<(), ValidationError> {
        self.validate_field_type(&input_value.ty, location)?;
        self.validate_directives(&input_value.directives)
    }

    fn validate_field_type(&self, ty: &FieldType, location: impl FnOnce() -> String) -> Result<(), ValidationError> {
        self.validate_type_name(ty.named_type(), location)
    }

    fn validate_type_name(&self, name: &str, location: impl FnOnce() -> String) -> Result<(), ValidationError> {
        if BUILTIN_SCALARS.contains(&name) || self.graph.types.contains_key(name) {
            return Ok(());
        }

        Err(ValidationError::UnknownType {
            name: name.to_owned(),
            location: location(),
        })
    }

    fn validate_directives(&self, directives: &[Directive]) -> Result<(), ValidationError> {
        for directive in directives {
            let name = directive.name.as_str();

            if !BUILTIN_DIRECTIVES.contains(&name) && !self.graph.directive_definitions.contains_key(name) {
                return Err(ValidationError::UnknownDirective(name.to_owned()));
            }
        }

        Ok(())
    }
}
