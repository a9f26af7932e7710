use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::{FieldType, Value};

/// A parsed and validated type system document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeGraph {
    /// Present only when the root operation types differ from the defaults or the schema
    /// definition carries directives.
    pub schema_definition: Option<SchemaDefinition>,
    pub directive_definitions: IndexMap<String, DirectiveDefinition>,
    pub types: IndexMap<String, TypeDefinition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub const ALL: [OperationType; 3] = [OperationType::Query, OperationType::Mutation, OperationType::Subscription];

    /// The conventional root type name, which is also the keyword used in a schema definition
    /// once lowercased.
    pub fn default_type_name(self) -> &'static str {
        match self {
            OperationType::Query => "Query",
            OperationType::Mutation => "Mutation",
            OperationType::Subscription => "Subscription",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDefinition {
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
    pub directives: Vec<Directive>,
}

impl SchemaDefinition {
    pub fn root(&self, operation: OperationType) -> Option<&str> {
        match operation {
            OperationType::Query => self.query.as_deref(),
            OperationType::Mutation => self.mutation.as_deref(),
            OperationType::Subscription => self.subscription.as_deref(),
        }
    }

    pub fn root_mut(&mut self, operation: OperationType) -> &mut Option<String> {
        match operation {
            OperationType::Query => &mut self.query,
            OperationType::Mutation => &mut self.mutation,
            OperationType::Subscription => &mut self.subscription,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveDefinition {
    pub name: String,
    pub description: Option<String>,
    pub arguments: IndexMap<String, InputValueDefinition>,
    pub repeatable: bool,
    /// Location names as written in SDL, e.g. `FIELD_DEFINITION`.
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub kind: TypeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Scalar,
    Object {
        implements: Vec<String>,
        fields: IndexMap<String, FieldDefinition>,
    },
    Interface {
        implements: Vec<String>,
        fields: IndexMap<String, FieldDefinition>,
    },
    Union {
        members: Vec<String>,
    },
    Enum {
        values: IndexMap<String, EnumValueDefinition>,
    },
    InputObject {
        fields: IndexMap<String, InputValueDefinition>,
    },
}

impl TypeKind {
    /// A human readable name, as used in diff messages (`object type`, `enum`...).
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::Scalar => "scalar",
            TypeKind::Object { .. } => "object type",
            TypeKind::Interface { .. } => "interface",
            TypeKind::Union { .. } => "union",
            TypeKind::Enum { .. } => "enum",
            TypeKind::InputObject { .. } => "input object type",
        }
    }

    /// The SDL keyword introducing a definition of this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Scalar => "scalar",
            TypeKind::Object { .. } => "type",
            TypeKind::Interface { .. } => "interface",
            TypeKind::Union { .. } => "union",
            TypeKind::Enum { .. } => "enum",
            TypeKind::InputObject { .. } => "input",
        }
    }

    /// An empty definition body of the same kind.
    pub fn empty_like(&self) -> TypeKind {
        match self {
            TypeKind::Scalar => TypeKind::Scalar,
            TypeKind::Object { .. } => TypeKind::Object {
                implements: Vec::new(),
                fields: IndexMap::new(),
            },
            TypeKind::Interface { .. } => TypeKind::Interface {
                implements: Vec::new(),
                fields: IndexMap::new(),
            },
            TypeKind::Union { .. } => TypeKind::Union { members: Vec::new() },
            TypeKind::Enum { .. } => TypeKind::Enum { values: IndexMap::new() },
            TypeKind::InputObject { .. } => TypeKind::InputObject { fields: IndexMap::new() },
        }
    }

    pub fn same_kind(&self, other: &TypeKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl TypeDefinition {
    /// The output fields of an object or interface.
    pub fn fields(&self) -> Option<&IndexMap<String, FieldDefinition>> {
        match &self.kind {
            TypeKind::Object { fields, .. } | TypeKind::Interface { fields, .. } => Some(fields),
            _ => None,
        }
    }

    pub fn fields_mut(&mut self) -> Option<&mut IndexMap<String, FieldDefinition>> {
        match &mut self.kind {
            TypeKind::Object { fields, .. } | TypeKind::Interface { fields, .. } => Some(fields),
            _ => None,
        }
    }

    pub fn implements(&self) -> &[String] {
        match &self.kind {
            TypeKind::Object { implements, .. } | TypeKind::Interface { implements, .. } => implements,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub description: Option<String>,
    pub ty: FieldType,
    pub arguments: IndexMap<String, InputValueDefinition>,
    pub directives: Vec<Directive>,
}

impl FieldDefinition {
    pub fn is_deprecated(&self) -> bool {
        deprecation(&self.directives).is_some()
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        deprecation(&self.directives).flatten()
    }

    /// Whether two definitions of the same field agree on their type and arguments.
    pub fn same_signature(&self, other: &FieldDefinition) -> bool {
        self.ty == other.ty
            && self.arguments.len() == other.arguments.len()
            && self.arguments.iter().all(|(name, argument)| {
                other.arguments.get(name).is_some_and(|other| {
                    argument.ty == other.ty && argument.default_value == other.default_value
                })
            })
    }
}

/// An argument or an input object field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    pub name: String,
    pub description: Option<String>,
    pub ty: FieldType,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

impl InputValueDefinition {
    /// Non-null without a default value.
    pub fn is_required(&self) -> bool {
        self.ty.is_non_null() && self.default_value.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
}

impl EnumValueDefinition {
    pub fn is_deprecated(&self) -> bool {
        deprecation(&self.directives).is_some()
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        deprecation(&self.directives).flatten()
    }
}

/// A directive usage, e.g. `@cacheControl(maxAge: 30)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<(String, Value)>,
}

impl Directive {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments
            .iter()
            .find(|(argument_name, _)| argument_name == name)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;

        if self.arguments.is_empty() {
            return Ok(());
        }

        let arguments = self
            .arguments
            .iter()
            .format_with(", ", |(name, value), f| f(&format_args!("{name}: {value}")));

        write!(f, "({arguments})")
    }
}

/// `None` when not deprecated, `Some(reason)` otherwise. Only an explicit `reason` argument
/// counts as a reason.
fn deprecation(directives: &[Directive]) -> Option<Option<&str>> {
    let directive = directives.iter().find(|directive| directive.name == "deprecated")?;

    Some(match directive.argument("reason") {
        Some(Value::String(reason)) => Some(reason.as_str()),
        _ => None,
    })
}

impl TypeGraph {
    pub fn root_type_name(&self, operation: OperationType) -> Option<&str> {
        match &self.schema_definition {
            Some(schema) => schema.root(operation),
            None => {
                let name = operation.default_type_name();
                self.types.get(name).map(|_| name)
            }
        }
    }

    pub fn is_root_type(&self, type_name: &str) -> bool {
        OperationType::ALL
            .iter()
            .any(|operation| self.root_type_name(*operation) == Some(type_name))
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldDefinition> {
        self.types.get(type_name)?.fields()?.get(field_name)
    }

    /// Rename a type and every reference to it: field, argument and input field types, union
    /// members, implemented interfaces and root operation types. The type keeps its position.
    pub fn rename_type(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }

        if let Some(index) = self.types.get_index_of(from) {
            let Some((_, mut definition)) = self.types.shift_remove_index(index) else {
                return;
            };

            definition.name = to.to_owned();
            self.types.shift_insert(index, to.to_owned(), definition);
        }

        let rename = |name: &mut String| {
            if name == from {
                *name = to.to_owned();
            }
        };

        if let Some(schema) = &mut self.schema_definition {
            for operation in OperationType::ALL {
                if let Some(name) = schema.root_mut(operation) {
                    rename(name);
                }
            }
        }

        for directive_definition in self.directive_definitions.values_mut() {
            for argument in directive_definition.arguments.values_mut() {
                argument.ty.rename(from, to);
            }
        }

        for definition in self.types.values_mut() {
            match &mut definition.kind {
                TypeKind::Scalar | TypeKind::Enum { .. } => (),
                TypeKind::Object { implements, fields } | TypeKind::Interface { implements, fields } => {
                    implements.iter_mut().for_each(rename);

                    for field in fields.values_mut() {
                        field.ty.rename(from, to);

                        for argument in field.arguments.values_mut() {
                            argument.ty.rename(from, to);
                        }
                    }
                }
                TypeKind::Union { members } => members.iter_mut().for_each(rename),
                TypeKind::InputObject { fields } => {
                    for field in fields.values_mut() {
                        field.ty.rename(from, to);
                    }
                }
            }
        }
    }

    /// Drop the schema definition when it says nothing the default root type names do not
    /// already say.
    pub fn normalize_schema_definition(&mut self) {
        let Some(schema) = &self.schema_definition else {
            return;
        };

        let is_implicit = schema.directives.is_empty()
            && OperationType::ALL.into_iter().all(|operation| {
                let default = operation.default_type_name();
                let implicit = self.types.get(default).map(|_| default);
                schema.root(operation) == implicit
            });

        if is_implicit {
            self.schema_definition = None;
        }
    }
}
