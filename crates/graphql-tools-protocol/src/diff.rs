use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Message;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffInput {
    pub old_schema: String,
    pub new_schema: String,
    /// Directive definitions prepended to both schemas before parsing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_directive_definitions: Option<String>,
    /// Rule identifiers. Kept as strings so that an unknown rule is reported as such instead of
    /// as a malformed message.
    #[serde(default)]
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffOutput {
    pub changes: Vec<Change>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub message: String,
    pub path: String,
    pub change_type: String,
    pub criticality: Criticality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criticality {
    pub level: CriticalityLevel,
    pub reason: String,
}

/// Ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CriticalityLevel {
    Breaking,
    Dangerous,
    NonBreaking,
}

impl CriticalityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            CriticalityLevel::Breaking => "BREAKING",
            CriticalityLevel::Dangerous => "DANGEROUS",
            CriticalityLevel::NonBreaking => "NON_BREAKING",
        }
    }
}

impl fmt::Display for CriticalityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Message for DiffInput {
    const KIND: &'static str = "DiffInput";
}

impl Message for DiffOutput {
    const KIND: &'static str = "DiffOutput";
}

impl Message for Change {
    const KIND: &'static str = "Change";
}

impl Message for Criticality {
    const KIND: &'static str = "Criticality";
}
