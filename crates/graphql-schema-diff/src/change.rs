use graphql_tools_protocol::{Change, Criticality, CriticalityLevel};

/// The nature of a change, serialized as its `changeType`, e.g. `FIELD_ADDED`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug, strum::IntoStaticStr, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum ChangeKind {
    TypeAdded,
    TypeRemoved,
    TypeKindChanged,
    TypeDescriptionAdded,
    TypeDescriptionChanged,
    TypeDescriptionRemoved,
    FieldAdded,
    FieldRemoved,
    FieldTypeChanged,
    FieldDescriptionAdded,
    FieldDescriptionChanged,
    FieldDescriptionRemoved,
    FieldDeprecationAdded,
    FieldDeprecationRemoved,
    FieldDeprecationReasonAdded,
    FieldDeprecationReasonChanged,
    FieldDeprecationReasonRemoved,
    FieldArgumentAdded,
    FieldArgumentRemoved,
    FieldArgumentTypeChanged,
    FieldArgumentDefaultChanged,
    FieldArgumentDescriptionChanged,
    InputFieldAdded,
    InputFieldRemoved,
    InputFieldTypeChanged,
    InputFieldDefaultValueChanged,
    InputFieldDescriptionAdded,
    InputFieldDescriptionChanged,
    InputFieldDescriptionRemoved,
    EnumValueAdded,
    EnumValueRemoved,
    EnumValueDescriptionChanged,
    EnumValueDeprecationReasonAdded,
    EnumValueDeprecationReasonChanged,
    EnumValueDeprecationReasonRemoved,
    UnionMemberAdded,
    UnionMemberRemoved,
    ObjectTypeInterfaceAdded,
    ObjectTypeInterfaceRemoved,
    DirectiveUsageAdded,
    DirectiveUsageRemoved,
    DirectiveUsageChanged,
    DirectiveAdded,
    DirectiveRemoved,
    DirectiveDescriptionChanged,
    DirectiveRepeatableAdded,
    DirectiveRepeatableRemoved,
    DirectiveLocationAdded,
    DirectiveLocationRemoved,
    DirectiveArgumentAdded,
    DirectiveArgumentRemoved,
    DirectiveArgumentTypeChanged,
    DirectiveArgumentDefaultValueChanged,
    DirectiveArgumentDescriptionChanged,
    SchemaQueryTypeChanged,
    SchemaMutationTypeChanged,
    SchemaSubscriptionTypeChanged,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Changes that only touch documentation.
    pub fn is_description_change(self) -> bool {
        matches!(
            self,
            ChangeKind::TypeDescriptionAdded
                | ChangeKind::TypeDescriptionChanged
                | ChangeKind::TypeDescriptionRemoved
                | ChangeKind::FieldDescriptionAdded
                | ChangeKind::FieldDescriptionChanged
                | ChangeKind::FieldDescriptionRemoved
                | ChangeKind::FieldArgumentDescriptionChanged
                | ChangeKind::InputFieldDescriptionAdded
                | ChangeKind::InputFieldDescriptionChanged
                | ChangeKind::InputFieldDescriptionRemoved
                | ChangeKind::EnumValueDescriptionChanged
                | ChangeKind::DirectiveDescriptionChanged
                | ChangeKind::DirectiveArgumentDescriptionChanged
        )
    }
}

/// A classified difference between the old and the new schema, before rules are applied.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SchemaChange {
    pub(crate) kind: ChangeKind,
    pub(crate) path: String,
    pub(crate) message: String,
    pub(crate) level: CriticalityLevel,
    pub(crate) reason: String,
    /// Set on the removal of a field that was deprecated in the old schema.
    pub(crate) deprecated_removal: bool,
}

impl SchemaChange {
    pub(crate) fn into_change(self) -> Change {
        Change {
            message: self.message,
            path: self.path,
            change_type: self.kind.as_str().to_owned(),
            criticality: Criticality {
                level: self.level,
                reason: self.reason,
            },
        }
    }
}
