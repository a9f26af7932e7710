use std::collections::BTreeSet;

use crate::Rule;

/// Options for configuring the behavior of [crate::diff_with_config()].
#[derive(Debug, Default, Clone)]
pub struct DiffConfig {
    pub(crate) rules: BTreeSet<Rule>,
    pub(crate) shared_directive_definitions: Option<String>,
}

impl DiffConfig {
    /// Post-process the classified changes with these rules. Duplicates are applied once.
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Directive definitions prepended to both schemas before parsing, so that custom directives
    /// used on either side are known without being part of the diff.
    pub fn with_shared_directive_definitions(mut self, definitions: Option<&str>) -> Self {
        self.shared_directive_definitions = definitions
            .filter(|definitions| !definitions.trim().is_empty())
            .map(str::to_owned);
        self
    }
}
