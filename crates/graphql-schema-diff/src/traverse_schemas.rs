use graphql_type_graph::{
    Directive, DirectiveDefinition, EnumValueDefinition, FieldDefinition, InputValueDefinition, OperationType,
    TypeDefinition, TypeGraph, TypeKind,
};
use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
    state::{diff_map, DiffMap, DiffState, Level},
    type_safety::{is_safe_input_change, is_safe_output_change},
    ChangeKind,
};

/// The reason GraphQL gives a `@deprecated` without one.
const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

const DEPRECATED_FIELD_REMOVAL_REASON: &str = "Removing a deprecated field is a breaking change. Before removing it, you may want to look at the field's usage to see the impact of removing the field.";

const TYPE_REMOVED: &str = "Removing a type is a breaking change. It is preferable to deprecate and remove all references to this type first.";
const TYPE_KIND_CHANGED: &str = "Changing the kind of a type is a breaking change because it can cause existing queries to error. For example, turning an object type to a scalar type would break queries that define a selection set for this type.";
const FIELD_REMOVED: &str =
    "Removing a field is a breaking change. It is preferable to deprecate the field before removing it.";
const FIELD_TYPE_CHANGED: &str =
    "Changing the type of a field can cause existing queries that use this field to error.";
const REQUIRED_ARGUMENT_ADDED: &str = "Adding a required argument to an existing field is a breaking change because it will cause existing uses of this field to error.";
const ARGUMENT_ADDED: &str = "Adding a new argument to an existing field may involve a change in resolve function logic that potentially may cause some side effects.";
const ARGUMENT_REMOVED: &str = "Removing a field argument is a breaking change because it will cause existing queries that use this argument to error.";
const ARGUMENT_TYPE_CHANGED: &str =
    "Changing the type of a field's argument can cause existing queries that use this argument to error.";
const ARGUMENT_DEFAULT_CHANGED: &str = "Changing the default value for an argument may change the runtime behaviour of a field if it was never provided.";
const REQUIRED_INPUT_FIELD_ADDED: &str = "Adding a required input field to an existing input object type is a breaking change because it will cause existing uses of this input object type to error.";
const INPUT_FIELD_REMOVED: &str =
    "Removing an input field will cause existing queries that use this input field to error.";
const INPUT_FIELD_TYPE_CHANGED: &str =
    "Changing the type of an input field can cause existing queries that use this field to error.";
const INPUT_FIELD_DEFAULT_CHANGED: &str = "Changing the default value for an input field may change the runtime behaviour of a field if it was never provided.";
const ENUM_VALUE_ADDED: &str = "Adding an enum value may break existing clients that were not programming defensively against an added case when querying an enum.";
const ENUM_VALUE_REMOVED: &str =
    "Removing an enum value will cause existing queries that use this enum value to error.";
const UNION_MEMBER_ADDED: &str = "Adding a possible type to Unions may break existing clients that were not programming defensively against a new possible type.";
const UNION_MEMBER_REMOVED: &str = "Removing a union member from a union can cause existing queries that use this union member in a fragment spread to error.";
const INTERFACE_ADDED: &str = "Adding an interface to an object type may break existing clients that were not programming defensively against a new possible type.";
const INTERFACE_REMOVED: &str =
    "Removing an interface from an object type can cause existing queries that use this in a fragment spread to error.";
const DIRECTIVE_USAGE: &str = "Directives can change the runtime behavior of the definitions they are applied to.";
const DIRECTIVE_REMOVED: &str =
    "A directive could be in use of a client application. Removing it could break the client application.";
const REQUIRED_DIRECTIVE_ARGUMENT_ADDED: &str =
    "Adding a required argument to a directive breaks the existing usages of the directive.";
const DIRECTIVE_ARGUMENT_REMOVED: &str =
    "Removing a directive argument breaks the existing usages of the directive that set it.";
const DIRECTIVE_ARGUMENT_TYPE_CHANGED: &str =
    "Changing the type of a directive argument can break the existing usages of the directive.";
const DIRECTIVE_ARGUMENT_DEFAULT_CHANGED: &str = "Changing the default value of a directive argument may change the runtime behaviour of the definitions the directive is applied to.";
const DIRECTIVE_REPEATABLE_REMOVED: &str =
    "Making a directive non-repeatable breaks the definitions that apply it more than once.";
const ROOT_TYPE_CHANGED: &str =
    "Changing a root operation type breaks the existing operations of that kind.";

/// Compare the old (source) and new (target) schemas, filling the `DiffState`.
pub(crate) fn traverse_schemas(source: &TypeGraph, target: &TypeGraph, state: &mut DiffState) {
    traverse_schema_definitions(source, target, state);

    for (name, definitions) in diff_map(named(&source.directive_definitions), named(&target.directive_definitions)) {
        match definitions {
            (None, Some(_)) => state.push(
                ChangeKind::DirectiveAdded,
                format!("@{name}"),
                format!("Directive '{name}' was added"),
                Level::non_breaking(),
            ),
            (Some(_), None) => state.push(
                ChangeKind::DirectiveRemoved,
                format!("@{name}"),
                format!("Directive '{name}' was removed"),
                Level::breaking(DIRECTIVE_REMOVED),
            ),
            (Some(old), Some(new)) => traverse_directive_definition(old, new, state),
            (None, None) => (),
        }
    }

    for (name, definitions) in diff_map(named(&source.types), named(&target.types)) {
        match definitions {
            (None, Some(_)) => state.push(
                ChangeKind::TypeAdded,
                name,
                format!("Type '{name}' was added"),
                Level::non_breaking(),
            ),
            (Some(_), None) => state.push(
                ChangeKind::TypeRemoved,
                name,
                format!("Type '{name}' was removed"),
                Level::breaking(TYPE_REMOVED),
            ),
            (Some(old), Some(new)) => traverse_type(old, new, state),
            (None, None) => (),
        }
    }
}

fn traverse_schema_definitions(source: &TypeGraph, target: &TypeGraph, state: &mut DiffState) {
    for (operation, kind) in [
        (OperationType::Query, ChangeKind::SchemaQueryTypeChanged),
        (OperationType::Mutation, ChangeKind::SchemaMutationTypeChanged),
        (OperationType::Subscription, ChangeKind::SchemaSubscriptionTypeChanged),
    ] {
        // A root appearing or disappearing is reported as the addition or removal of its type.
        let (Some(old), Some(new)) = (source.root_type_name(operation), target.root_type_name(operation)) else {
            continue;
        };

        if old != new {
            state.push(
                kind,
                "schema",
                format!("Schema {} root has changed from '{old}' to '{new}'", operation.as_str()),
                Level::breaking(ROOT_TYPE_CHANGED),
            );
        }
    }

    let directives = |graph: &TypeGraph| {
        graph
            .schema_definition
            .as_ref()
            .map(|definition| definition.directives.clone())
            .unwrap_or_default()
    };

    traverse_directive_usages(
        "schema",
        "schema",
        &directives(source),
        &directives(target),
        Usages::All,
        state,
    );
}

fn traverse_directive_definition(old: &DirectiveDefinition, new: &DirectiveDefinition, state: &mut DiffState) {
    let name = new.name.as_str();
    let path = format!("@{name}");

    traverse_description(
        [ChangeKind::DirectiveDescriptionChanged; 3],
        &path,
        &format!("directive '{name}'"),
        [old.description.as_deref(), new.description.as_deref()],
        state,
    );

    match (old.repeatable, new.repeatable) {
        (false, true) => state.push(
            ChangeKind::DirectiveRepeatableAdded,
            path.as_str(),
            format!("Directive '{name}' became repeatable"),
            Level::non_breaking(),
        ),
        (true, false) => state.push(
            ChangeKind::DirectiveRepeatableRemoved,
            path.as_str(),
            format!("Directive '{name}' is no longer repeatable"),
            Level::breaking(DIRECTIVE_REPEATABLE_REMOVED),
        ),
        _ => (),
    }

    for (location, presence) in diff_map(listed(&old.locations), listed(&new.locations)) {
        match presence {
            (None, Some(())) => state.push(
                ChangeKind::DirectiveLocationAdded,
                path.as_str(),
                format!("Location '{location}' was added to directive '{name}'"),
                Level::non_breaking(),
            ),
            (Some(()), None) => state.push(
                ChangeKind::DirectiveLocationRemoved,
                path.as_str(),
                format!("Location '{location}' was removed from directive '{name}'"),
                Level::breaking(DIRECTIVE_REMOVED),
            ),
            _ => (),
        }
    }

    for (argument_name, arguments) in diff_map(named(&old.arguments), named(&new.arguments)) {
        match arguments {
            (None, Some(argument)) => state.push(
                ChangeKind::DirectiveArgumentAdded,
                format!("{path}.{argument_name}"),
                format!("Argument '{argument_name}' was added to directive '{name}'"),
                Level::breaking_unless(!argument.is_required(), REQUIRED_DIRECTIVE_ARGUMENT_ADDED),
            ),
            (Some(_), None) => state.push(
                ChangeKind::DirectiveArgumentRemoved,
                format!("{path}.{argument_name}"),
                format!("Argument '{argument_name}' was removed from directive '{name}'"),
                Level::breaking(DIRECTIVE_ARGUMENT_REMOVED),
            ),
            (Some(old_argument), Some(new_argument)) => {
                traverse_argument(ArgumentOwner::Directive(name), old_argument, new_argument, state)
            }
            (None, None) => (),
        }
    }
}

fn traverse_type(old: &TypeDefinition, new: &TypeDefinition, state: &mut DiffState) {
    let name = new.name.as_str();

    if !old.kind.same_kind(&new.kind) {
        state.push(
            ChangeKind::TypeKindChanged,
            name,
            format!(
                "'{name}' kind changed from '{}' to '{}'",
                old.kind.name(),
                new.kind.name()
            ),
            Level::breaking(TYPE_KIND_CHANGED),
        );
        return;
    }

    let subject = format!("{} '{name}'", new.kind.name());

    traverse_description(
        [
            ChangeKind::TypeDescriptionAdded,
            ChangeKind::TypeDescriptionChanged,
            ChangeKind::TypeDescriptionRemoved,
        ],
        name,
        &subject,
        [old.description.as_deref(), new.description.as_deref()],
        state,
    );

    traverse_directive_usages(name, &subject, &old.directives, &new.directives, Usages::All, state);

    if let (Some(old_fields), Some(new_fields)) = (old.fields(), new.fields()) {
        traverse_interfaces(name, old.implements(), new.implements(), state);
        traverse_fields(new, old_fields, new_fields, state);
    }

    match (&old.kind, &new.kind) {
        (TypeKind::Union { members: old_members }, TypeKind::Union { members: new_members }) => {
            for (member, presence) in diff_map(listed(old_members), listed(new_members)) {
                match presence {
                    (None, Some(())) => state.push(
                        ChangeKind::UnionMemberAdded,
                        format!("{name}.{member}"),
                        format!("Member '{member}' was added to union type '{name}'"),
                        Level::dangerous(UNION_MEMBER_ADDED),
                    ),
                    (Some(()), None) => state.push(
                        ChangeKind::UnionMemberRemoved,
                        format!("{name}.{member}"),
                        format!("Member '{member}' was removed from union type '{name}'"),
                        Level::breaking(UNION_MEMBER_REMOVED),
                    ),
                    _ => (),
                }
            }
        }
        (TypeKind::Enum { values: old_values }, TypeKind::Enum { values: new_values }) => {
            traverse_enum_values(name, old_values, new_values, state);
        }
        (TypeKind::InputObject { fields: old_fields }, TypeKind::InputObject { fields: new_fields }) => {
            traverse_input_fields(name, old_fields, new_fields, state);
        }
        _ => (),
    }
}

fn traverse_interfaces(type_name: &str, old: &[String], new: &[String], state: &mut DiffState) {
    for (interface, presence) in diff_map(listed(old), listed(new)) {
        match presence {
            (None, Some(())) => state.push(
                ChangeKind::ObjectTypeInterfaceAdded,
                format!("{type_name}.&{interface}"),
                format!("'{type_name}' now implements interface '{interface}'"),
                Level::dangerous(INTERFACE_ADDED),
            ),
            (Some(()), None) => state.push(
                ChangeKind::ObjectTypeInterfaceRemoved,
                format!("{type_name}.&{interface}"),
                format!("'{type_name}' no longer implements interface '{interface}'"),
                Level::breaking(INTERFACE_REMOVED),
            ),
            _ => (),
        }
    }
}

fn traverse_fields(
    parent: &TypeDefinition,
    old_fields: &IndexMap<String, FieldDefinition>,
    new_fields: &IndexMap<String, FieldDefinition>,
    state: &mut DiffState,
) {
    let type_name = parent.name.as_str();
    let kind = parent.kind.name();

    for (field_name, fields) in diff_map(named(old_fields), named(new_fields)) {
        let path = format!("{type_name}.{field_name}");

        match fields {
            (None, Some(_)) => state.push(
                ChangeKind::FieldAdded,
                path,
                format!("Field '{field_name}' was added to {kind} '{type_name}'"),
                Level::non_breaking(),
            ),
            (Some(old), None) if old.is_deprecated() => state.push_deprecated_field_removal(
                path,
                format!("Field '{field_name}' (deprecated) was removed from {kind} '{type_name}'"),
                Level::breaking(DEPRECATED_FIELD_REMOVAL_REASON),
            ),
            (Some(_), None) => state.push(
                ChangeKind::FieldRemoved,
                path,
                format!("Field '{field_name}' was removed from {kind} '{type_name}'"),
                Level::breaking(FIELD_REMOVED),
            ),
            (Some(old), Some(new)) => traverse_field(&path, old, new, state),
            (None, None) => (),
        }
    }
}

fn traverse_field(path: &str, old: &FieldDefinition, new: &FieldDefinition, state: &mut DiffState) {
    if old.ty != new.ty {
        state.push(
            ChangeKind::FieldTypeChanged,
            path,
            format!("Field '{path}' changed type from '{}' to '{}'", old.ty, new.ty),
            Level::breaking_unless(is_safe_output_change(&old.ty, &new.ty), FIELD_TYPE_CHANGED),
        );
    }

    let subject = format!("field '{path}'");

    traverse_description(
        [
            ChangeKind::FieldDescriptionAdded,
            ChangeKind::FieldDescriptionChanged,
            ChangeKind::FieldDescriptionRemoved,
        ],
        path,
        &subject,
        [old.description.as_deref(), new.description.as_deref()],
        state,
    );

    match (old.is_deprecated(), new.is_deprecated()) {
        (false, true) => state.push(
            ChangeKind::FieldDeprecationAdded,
            path,
            format!("Field '{path}' is deprecated"),
            Level::non_breaking(),
        ),
        (true, false) => state.push(
            ChangeKind::FieldDeprecationRemoved,
            path,
            format!("Field '{path}' is no longer deprecated"),
            Level::dangerous(""),
        ),
        _ => (),
    }

    match (
        effective_deprecation_reason(old.is_deprecated(), old.deprecation_reason()),
        effective_deprecation_reason(new.is_deprecated(), new.deprecation_reason()),
    ) {
        (None, Some(reason)) => state.push(
            ChangeKind::FieldDeprecationReasonAdded,
            path,
            format!("Field '{path}' has deprecation reason '{reason}'"),
            Level::non_breaking(),
        ),
        (Some(_), None) => state.push(
            ChangeKind::FieldDeprecationReasonRemoved,
            path,
            format!("Deprecation reason was removed from field '{path}'"),
            Level::non_breaking(),
        ),
        (Some(old_reason), Some(new_reason)) if old_reason != new_reason => state.push(
            ChangeKind::FieldDeprecationReasonChanged,
            path,
            format!("Deprecation reason on field '{path}' has changed from '{old_reason}' to '{new_reason}'"),
            Level::non_breaking(),
        ),
        _ => (),
    }

    traverse_directive_usages(
        path,
        &subject,
        &old.directives,
        &new.directives,
        Usages::WithoutDeprecated,
        state,
    );

    for (argument_name, arguments) in diff_map(named(&old.arguments), named(&new.arguments)) {
        match arguments {
            (None, Some(argument)) => state.push(
                ChangeKind::FieldArgumentAdded,
                format!("{path}.{argument_name}"),
                format!("Argument '{argument_name}: {}' added to field '{path}'", argument.ty),
                if argument.is_required() {
                    Level::breaking(REQUIRED_ARGUMENT_ADDED)
                } else {
                    Level::dangerous(ARGUMENT_ADDED)
                },
            ),
            (Some(argument), None) => state.push(
                ChangeKind::FieldArgumentRemoved,
                format!("{path}.{argument_name}"),
                format!("Argument '{argument_name}: {}' was removed from field '{path}'", argument.ty),
                Level::breaking(ARGUMENT_REMOVED),
            ),
            (Some(old_argument), Some(new_argument)) => {
                traverse_argument(ArgumentOwner::Field(path), old_argument, new_argument, state)
            }
            (None, None) => (),
        }
    }
}

/// What an argument belongs to. Fields and directive definitions classify their arguments the
/// same way but report them under different change types.
#[derive(Clone, Copy)]
enum ArgumentOwner<'a> {
    /// The path of the field, e.g. `Query.products`.
    Field(&'a str),
    /// The name of the directive, without `@`.
    Directive(&'a str),
}

impl ArgumentOwner<'_> {
    fn path(self) -> String {
        match self {
            ArgumentOwner::Field(path) => path.to_owned(),
            ArgumentOwner::Directive(name) => format!("@{name}"),
        }
    }

    fn describe(self) -> String {
        match self {
            ArgumentOwner::Field(path) => format!("field '{path}'"),
            ArgumentOwner::Directive(name) => format!("directive '{name}'"),
        }
    }

    /// `[type changed, default changed, description changed]` kinds and the reasons of the first two.
    fn kinds(self) -> ([ChangeKind; 3], [&'static str; 2]) {
        match self {
            ArgumentOwner::Field(_) => (
                [
                    ChangeKind::FieldArgumentTypeChanged,
                    ChangeKind::FieldArgumentDefaultChanged,
                    ChangeKind::FieldArgumentDescriptionChanged,
                ],
                [ARGUMENT_TYPE_CHANGED, ARGUMENT_DEFAULT_CHANGED],
            ),
            ArgumentOwner::Directive(_) => (
                [
                    ChangeKind::DirectiveArgumentTypeChanged,
                    ChangeKind::DirectiveArgumentDefaultValueChanged,
                    ChangeKind::DirectiveArgumentDescriptionChanged,
                ],
                [DIRECTIVE_ARGUMENT_TYPE_CHANGED, DIRECTIVE_ARGUMENT_DEFAULT_CHANGED],
            ),
        }
    }
}

fn traverse_argument(
    owner: ArgumentOwner<'_>,
    old: &InputValueDefinition,
    new: &InputValueDefinition,
    state: &mut DiffState,
) {
    let name = new.name.as_str();
    let path = format!("{}.{name}", owner.path());
    let owner_subject = owner.describe();
    let subject = format!("argument '{name}' on {owner_subject}");
    let ([type_changed, default_changed, description_changed], [type_reason, default_reason]) = owner.kinds();

    if old.ty != new.ty {
        state.push(
            type_changed,
            path.as_str(),
            format!(
                "Type for argument '{name}' on {owner_subject} changed from '{}' to '{}'",
                old.ty, new.ty
            ),
            Level::breaking_unless(is_safe_input_change(&old.ty, &new.ty), type_reason),
        );
    }

    let default_change = match (&old.default_value, &new.default_value) {
        (None, Some(value)) => Some(format!("Default value '{value}' was added to {subject}")),
        (Some(_), None) => Some(format!("Default value was removed from {subject}")),
        (Some(old_value), Some(new_value)) if old_value != new_value => Some(format!(
            "Default value for {subject} changed from '{old_value}' to '{new_value}'"
        )),
        _ => None,
    };

    if let Some(message) = default_change {
        state.push(default_changed, path.as_str(), message, Level::dangerous(default_reason));
    }

    traverse_description(
        [description_changed; 3],
        &path,
        &subject,
        [old.description.as_deref(), new.description.as_deref()],
        state,
    );

    traverse_directive_usages(&path, &subject, &old.directives, &new.directives, Usages::All, state);
}

fn traverse_enum_values(
    enum_name: &str,
    old_values: &IndexMap<String, EnumValueDefinition>,
    new_values: &IndexMap<String, EnumValueDefinition>,
    state: &mut DiffState,
) {
    for (value_name, values) in diff_map(named(old_values), named(new_values)) {
        let path = format!("{enum_name}.{value_name}");

        let (old, new) = match values {
            (None, Some(_)) => {
                state.push(
                    ChangeKind::EnumValueAdded,
                    path,
                    format!("Enum value '{value_name}' was added to enum '{enum_name}'"),
                    Level::dangerous(ENUM_VALUE_ADDED),
                );
                continue;
            }
            (Some(_), None) => {
                state.push(
                    ChangeKind::EnumValueRemoved,
                    path,
                    format!("Enum value '{value_name}' was removed from enum '{enum_name}'"),
                    Level::breaking(ENUM_VALUE_REMOVED),
                );
                continue;
            }
            (Some(old), Some(new)) => (old, new),
            (None, None) => continue,
        };

        let subject = format!("enum value '{path}'");

        traverse_description(
            [ChangeKind::EnumValueDescriptionChanged; 3],
            &path,
            &subject,
            [old.description.as_deref(), new.description.as_deref()],
            state,
        );

        match (
            effective_deprecation_reason(old.is_deprecated(), old.deprecation_reason()),
            effective_deprecation_reason(new.is_deprecated(), new.deprecation_reason()),
        ) {
            (None, Some(reason)) => state.push(
                ChangeKind::EnumValueDeprecationReasonAdded,
                path.as_str(),
                format!("Enum value '{path}' was deprecated with reason '{reason}'"),
                Level::non_breaking(),
            ),
            (Some(_), None) => state.push(
                ChangeKind::EnumValueDeprecationReasonRemoved,
                path.as_str(),
                format!("Deprecation reason was removed from enum value '{path}'"),
                Level::non_breaking(),
            ),
            (Some(old_reason), Some(new_reason)) if old_reason != new_reason => state.push(
                ChangeKind::EnumValueDeprecationReasonChanged,
                path.as_str(),
                format!("Enum value '{path}' deprecation reason changed from '{old_reason}' to '{new_reason}'"),
                Level::non_breaking(),
            ),
            _ => (),
        }

        traverse_directive_usages(
            &path,
            &subject,
            &old.directives,
            &new.directives,
            Usages::WithoutDeprecated,
            state,
        );
    }
}

fn traverse_input_fields(
    type_name: &str,
    old_fields: &IndexMap<String, InputValueDefinition>,
    new_fields: &IndexMap<String, InputValueDefinition>,
    state: &mut DiffState,
) {
    for (field_name, fields) in diff_map(named(old_fields), named(new_fields)) {
        let path = format!("{type_name}.{field_name}");

        let (old, new) = match fields {
            (None, Some(field)) => {
                state.push(
                    ChangeKind::InputFieldAdded,
                    path,
                    format!(
                        "Input field '{field_name}' of type '{}' was added to input object type '{type_name}'",
                        field.ty
                    ),
                    Level::breaking_unless(!field.is_required(), REQUIRED_INPUT_FIELD_ADDED),
                );
                continue;
            }
            (Some(_), None) => {
                state.push(
                    ChangeKind::InputFieldRemoved,
                    path,
                    format!("Input field '{field_name}' was removed from input object type '{type_name}'"),
                    Level::breaking(INPUT_FIELD_REMOVED),
                );
                continue;
            }
            (Some(old), Some(new)) => (old, new),
            (None, None) => continue,
        };

        if old.ty != new.ty {
            state.push(
                ChangeKind::InputFieldTypeChanged,
                path.as_str(),
                format!("Input field '{path}' changed type from '{}' to '{}'", old.ty, new.ty),
                Level::breaking_unless(is_safe_input_change(&old.ty, &new.ty), INPUT_FIELD_TYPE_CHANGED),
            );
        }

        let default_change = match (&old.default_value, &new.default_value) {
            (None, Some(value)) => Some(format!("Input field '{path}' default value '{value}' was added")),
            (Some(_), None) => Some(format!("Input field '{path}' default value was removed")),
            (Some(old_value), Some(new_value)) if old_value != new_value => Some(format!(
                "Input field '{path}' default value changed from '{old_value}' to '{new_value}'"
            )),
            _ => None,
        };

        if let Some(message) = default_change {
            state.push(
                ChangeKind::InputFieldDefaultValueChanged,
                path.as_str(),
                message,
                Level::dangerous(INPUT_FIELD_DEFAULT_CHANGED),
            );
        }

        let subject = format!("input field '{path}'");

        traverse_description(
            [
                ChangeKind::InputFieldDescriptionAdded,
                ChangeKind::InputFieldDescriptionChanged,
                ChangeKind::InputFieldDescriptionRemoved,
            ],
            &path,
            &subject,
            [old.description.as_deref(), new.description.as_deref()],
            state,
        );

        traverse_directive_usages(&path, &subject, &old.directives, &new.directives, Usages::All, state);
    }
}

/// `[added, changed, removed]` kinds. Blank descriptions count as absent.
fn traverse_description(
    [added, changed, removed]: [ChangeKind; 3],
    path: &str,
    subject: &str,
    [old, new]: [Option<&str>; 2],
    state: &mut DiffState,
) {
    match (present(old), present(new)) {
        (None, Some(new)) => state.push(
            added,
            path,
            format!("Description '{new}' was added to {subject}"),
            Level::non_breaking(),
        ),
        (Some(old), None) => state.push(
            removed,
            path,
            format!("Description '{old}' was removed from {subject}"),
            Level::non_breaking(),
        ),
        (Some(old), Some(new)) if old != new => state.push(
            changed,
            path,
            format!("Description for {subject} changed from '{old}' to '{new}'"),
            Level::non_breaking(),
        ),
        _ => (),
    }
}

fn present(description: Option<&str>) -> Option<&str> {
    description.filter(|description| !description.trim().is_empty())
}

/// Which directive usages are compared. Where dedicated deprecation changes exist, `@deprecated`
/// is left to them.
#[derive(Clone, Copy, PartialEq)]
enum Usages {
    All,
    WithoutDeprecated,
}

/// Usages are compared per directive name, so repeated usages of the same directive are one unit.
fn traverse_directive_usages(
    path: &str,
    subject: &str,
    old: &[Directive],
    new: &[Directive],
    usages: Usages,
    state: &mut DiffState,
) {
    let mut by_name: DiffMap<&str, Vec<&Directive>> = DiffMap::new();

    let compared = |directive: &&Directive| usages == Usages::All || directive.name != "deprecated";

    for directive in old.iter().filter(compared) {
        by_name
            .entry(directive.name.as_str())
            .or_default()
            .0
            .get_or_insert_with(Vec::new)
            .push(directive);
    }

    for directive in new.iter().filter(compared) {
        by_name
            .entry(directive.name.as_str())
            .or_default()
            .1
            .get_or_insert_with(Vec::new)
            .push(directive);
    }

    for (name, directives) in by_name {
        let directive_path = format!("{path}.@{name}");

        match directives {
            (None, Some(_)) => state.push(
                ChangeKind::DirectiveUsageAdded,
                directive_path,
                format!("Directive '{name}' was added to {subject}"),
                Level::dangerous(DIRECTIVE_USAGE),
            ),
            (Some(_), None) => state.push(
                ChangeKind::DirectiveUsageRemoved,
                directive_path,
                format!("Directive '{name}' was removed from {subject}"),
                Level::dangerous(DIRECTIVE_USAGE),
            ),
            (Some(old), Some(new)) if old != new => state.push(
                ChangeKind::DirectiveUsageChanged,
                directive_path,
                format!(
                    "Directive '{name}' on {subject} changed from '{}' to '{}'",
                    old.iter().join(" "),
                    new.iter().join(" ")
                ),
                Level::dangerous(DIRECTIVE_USAGE),
            ),
            _ => (),
        }
    }
}

fn effective_deprecation_reason(is_deprecated: bool, reason: Option<&str>) -> Option<&str> {
    is_deprecated.then(|| reason.unwrap_or(DEFAULT_DEPRECATION_REASON))
}

fn named<V>(map: &IndexMap<String, V>) -> impl Iterator<Item = (&str, &V)> {
    map.iter().map(|(name, value)| (name.as_str(), value))
}

fn listed(names: &[String]) -> impl Iterator<Item = (&str, ())> {
    names.iter().map(|name| (name.as_str(), ()))
}
