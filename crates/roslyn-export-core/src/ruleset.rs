//! Roslyn rule set generation.
//!
//! Rules are grouped by the analyzer plugin that owns them. Each group is
//! rendered with the plugin's analyzer id and rule namespace, which must be
//! published by the plugin as server properties:
//!
//! ```text
//! <group>.analyzerId     = SonarAnalyzer.CSharp
//! <group>.ruleNamespace  = SonarAnalyzer.CSharp
//! ```
//!
//! Rules whose repository has no analyzer group are left out of the
//! document entirely.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::config::Config;
use crate::error::ExportError;
use crate::language::Language;
use crate::properties::PropertyStore;
use crate::rule::{AnalyzerGroupKey, ProfileRule, RuleAction};

/// Rule set name written into every document.
pub const RULE_SET_NAME: &str = "Rules for SonarQube";

/// Rule set description written into every document.
pub const RULE_SET_DESCRIPTION: &str = "This rule set was automatically generated from SonarQube";

/// Rule set tools version written into every document.
pub const RULE_SET_TOOLS_VERSION: &str = "14.0";

const ANALYZER_ID_SUFFIX: &str = "analyzerId";
const RULE_NAMESPACE_SUFFIX: &str = "ruleNamespace";

const VBNET_HINT: &str = "Possible cause: this Scanner is not compatible with SonarVB 2.X. \
If necessary, upgrade SonarVB latest in SonarQube.";

/// A rule set document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleSet {
    /// Document name.
    pub name: String,
    /// Document description.
    pub description: String,
    /// Tools version.
    pub tools_version: String,
    /// One entry per analyzer plugin, in first-seen order.
    #[serde(rename = "Rules")]
    pub groups: Vec<RuleGroup>,
}

impl RuleSet {
    /// Creates an empty rule set with the standard metadata.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: RULE_SET_NAME.to_string(),
            description: RULE_SET_DESCRIPTION.to_string(),
            tools_version: RULE_SET_TOOLS_VERSION.to_string(),
            groups: Vec::new(),
        }
    }

    /// Total number of rule entries across all groups.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(|g| g.rules.len()).sum()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

/// The rules of one analyzer plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleGroup {
    /// Analyzer identity, from `<group>.analyzerId`.
    pub analyzer_id: String,
    /// Rule namespace, from `<group>.ruleNamespace`.
    pub rule_namespace: String,
    /// Rule actions in input order.
    #[serde(rename = "Rule")]
    pub rules: Vec<RuleEntry>,
}

/// The action applied to a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleEntry {
    /// Rule key (e.g. `S100`).
    pub id: String,
    /// Diagnostic action.
    pub action: RuleAction,
}

/// Builds [`RuleSet`] documents from profile rules.
#[derive(Debug, Clone)]
pub struct RuleSetBuilder {
    active_action: RuleAction,
    inactive_action: RuleAction,
}

impl Default for RuleSetBuilder {
    fn default() -> Self {
        Self {
            active_action: RuleAction::Warning,
            inactive_action: RuleAction::None,
        }
    }
}

impl RuleSetBuilder {
    /// Creates a builder writing `Warning` for active rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new().active_action(config.rule_set.active_action)
    }

    /// Sets the action written for active rules.
    #[must_use]
    pub fn active_action(mut self, action: RuleAction) -> Self {
        self.active_action = action;
        self
    }

    /// Builds the rule set for `language_key`.
    ///
    /// Active rules come before inactive ones; within a group the input
    /// order is kept. The result may contain no groups at all.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidArgument`] for an empty language key, and
    /// [`ExportError::MissingConfiguration`] if any group lacks its
    /// `analyzerId` or `ruleNamespace` property.
    pub fn build(
        &self,
        language_key: &str,
        active_rules: &[ProfileRule],
        inactive_rules: &[ProfileRule],
        properties: &PropertyStore,
    ) -> Result<RuleSet, ExportError> {
        if language_key.is_empty() {
            return Err(ExportError::invalid_argument(
                "language_key",
                "must not be empty",
            ));
        }

        let grouped = group_by_analyzer(language_key, active_rules.iter().chain(inactive_rules));

        let mut rule_set = RuleSet::new();
        for (group_key, rules) in grouped {
            let analyzer_id = required_property(properties, &group_key, ANALYZER_ID_SUFFIX)?;
            let rule_namespace = required_property(properties, &group_key, RULE_NAMESPACE_SUFFIX)?;

            debug!(
                "Rule group {} -> {} ({} rules)",
                group_key,
                analyzer_id,
                rules.len()
            );

            rule_set.groups.push(RuleGroup {
                analyzer_id: analyzer_id.to_string(),
                rule_namespace: rule_namespace.to_string(),
                rules: rules.into_iter().map(|r| self.entry(r)).collect(),
            });
        }

        Ok(rule_set)
    }

    fn entry(&self, rule: &ProfileRule) -> RuleEntry {
        RuleEntry {
            id: rule.key().to_string(),
            action: if rule.is_active() {
                self.active_action
            } else {
                self.inactive_action
            },
        }
    }
}

/// Groups rules by analyzer, keeping first-seen group order and dropping
/// rules without a group.
fn group_by_analyzer<'a>(
    language_key: &str,
    rules: impl Iterator<Item = &'a ProfileRule>,
) -> Vec<(AnalyzerGroupKey, Vec<&'a ProfileRule>)> {
    let mut groups: Vec<(AnalyzerGroupKey, Vec<&'a ProfileRule>)> = Vec::new();
    let mut index: HashMap<AnalyzerGroupKey, usize> = HashMap::new();

    for rule in rules {
        let Some(key) = AnalyzerGroupKey::for_rule(rule, language_key) else {
            debug!("Skipping {rule}: repository has no analyzer group");
            continue;
        };
        if let Some(&i) = index.get(&key) {
            groups[i].1.push(rule);
        } else {
            index.insert(key.clone(), groups.len());
            groups.push((key, vec![rule]));
        }
    }

    groups
}

fn required_property<'p>(
    properties: &'p PropertyStore,
    group: &AnalyzerGroupKey,
    suffix: &str,
) -> Result<&'p str, ExportError> {
    let key = group.property(suffix);
    properties.get(&key).ok_or_else(|| {
        let hint = key
            .starts_with(Language::VbNet.analyzer_group_key())
            .then(|| VBNET_HINT.to_string());
        ExportError::MissingConfiguration {
            key,
            group: group.to_string(),
            hint,
        }
    })
}
