use std::collections::BTreeSet;

use graphql_tools_protocol::CriticalityLevel;

use crate::{change::SchemaChange, DiffError};

/// A post-processing pass over the classified changes.
///
/// Rules are applied in declaration order, whatever order they were requested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumString, strum::Display)]
pub enum Rule {
    /// Escalate every DANGEROUS change to BREAKING.
    #[strum(to_string = "DANGEROUS_TO_BREAKING", serialize = "RULE_DANGEROUS_TO_BREAKING")]
    DangerousToBreaking,
    /// The removal of a field that was deprecated is DANGEROUS instead of BREAKING.
    #[strum(
        to_string = "SUPPRESS_DEPRECATED_FIELD_REMOVAL",
        serialize = "RULE_DEPRECATED_FIELD_REMOVAL_DANGEROUS"
    )]
    SuppressDeprecatedFieldRemoval,
    /// Drop changes that only touch descriptions.
    #[strum(
        to_string = "IGNORE_DESCRIPTION_CHANGES",
        serialize = "RULE_IGNORE_DESCRIPTION_CHANGES"
    )]
    IgnoreDescriptionChanges,
}

impl Rule {
    /// Parse rule identifiers, rejecting the first unknown one.
    pub fn parse_all<'a>(identifiers: impl IntoIterator<Item = &'a str>) -> Result<BTreeSet<Rule>, DiffError> {
        identifiers
            .into_iter()
            .map(|identifier| {
                identifier
                    .parse()
                    .map_err(|_| DiffError::UnsupportedRule(identifier.to_owned()))
            })
            .collect()
    }

    fn apply(self, changes: &mut Vec<SchemaChange>) {
        match self {
            Rule::DangerousToBreaking => {
                for change in changes.iter_mut() {
                    if change.level == CriticalityLevel::Dangerous {
                        change.level = CriticalityLevel::Breaking;
                    }
                }
            }
            Rule::SuppressDeprecatedFieldRemoval => {
                for change in changes.iter_mut().filter(|change| change.deprecated_removal) {
                    change.level = CriticalityLevel::Dangerous;
                }
            }
            Rule::IgnoreDescriptionChanges => {
                changes.retain(|change| !change.kind.is_description_change());
            }
        }
    }
}

pub(crate) fn apply_rules(rules: &BTreeSet<Rule>, changes: &mut Vec<SchemaChange>) {
    for rule in rules {
        let before = changes.len();
        rule.apply(changes);
        tracing::debug!(rule = %rule, dropped = before - changes.len(), "applied rule");
    }
}
