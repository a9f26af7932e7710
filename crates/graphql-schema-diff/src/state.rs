use std::collections::BTreeMap;

use graphql_tools_protocol::CriticalityLevel;

use crate::{change::SchemaChange, ChangeKind};

/// Items keyed by name, with their version in the old and in the new schema.
pub(crate) type DiffMap<K, V> = BTreeMap<K, (Option<V>, Option<V>)>;

pub(crate) fn diff_map<'a, V>(
    source: impl IntoIterator<Item = (&'a str, V)>,
    target: impl IntoIterator<Item = (&'a str, V)>,
) -> DiffMap<&'a str, V> {
    let mut map = DiffMap::new();

    for (key, value) in source {
        map.insert(key, (Some(value), None));
    }

    for (key, value) in target {
        map.entry(key).or_default().1 = Some(value);
    }

    map
}

/// The criticality a change is classified with.
pub(crate) struct Level {
    level: CriticalityLevel,
    reason: &'static str,
}

impl Level {
    pub(crate) fn non_breaking() -> Level {
        Level {
            level: CriticalityLevel::NonBreaking,
            reason: "",
        }
    }

    pub(crate) fn dangerous(reason: &'static str) -> Level {
        Level {
            level: CriticalityLevel::Dangerous,
            reason,
        }
    }

    pub(crate) fn breaking(reason: &'static str) -> Level {
        Level {
            level: CriticalityLevel::Breaking,
            reason,
        }
    }

    /// NON_BREAKING when `safe`, BREAKING otherwise.
    pub(crate) fn breaking_unless(safe: bool, reason: &'static str) -> Level {
        if safe {
            Level::non_breaking()
        } else {
            Level::breaking(reason)
        }
    }
}

#[derive(Default)]
pub(crate) struct DiffState {
    changes: Vec<SchemaChange>,
}

impl DiffState {
    pub(crate) fn push(&mut self, kind: ChangeKind, path: impl Into<String>, message: String, level: Level) {
        self.changes.push(SchemaChange {
            kind,
            path: path.into(),
            message,
            level: level.level,
            reason: level.reason.to_owned(),
            deprecated_removal: false,
        });
    }

    pub(crate) fn push_deprecated_field_removal(&mut self, path: String, message: String, level: Level) {
        self.push(ChangeKind::FieldRemoved, path, message, level);

        if let Some(change) = self.changes.last_mut() {
            change.deprecated_removal = true;
        }
    }

    pub(crate) fn into_changes(self) -> Vec<SchemaChange> {
        self.changes
    }
}
