//! Analyzer plugin distribution metadata.
//!
//! Unlike rule set generation, resolving plugin references is best effort:
//! a group without `analyzerId` or `pluginVersion` is left out.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::language::{Language, SONARANALYZER_GROUP_PREFIX};
use crate::properties::PropertyStore;
use crate::rule::{AnalyzerGroupKey, ProfileRule};

/// A package that provides an analyzer plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginReference {
    /// Package id, from `<group>.analyzerId`.
    pub id: String,
    /// Package version, from `<group>.pluginVersion`.
    pub version: String,
}

/// Resolves the plugin packages needed to run `active_rules`.
///
/// The built-in groups of both languages are always considered, followed by
/// the groups of the active rules in first-seen order.
#[must_use]
pub fn plugin_references(
    language: Language,
    active_rules: &[ProfileRule],
    properties: &PropertyStore,
) -> Vec<PluginReference> {
    let plugins: Vec<PluginReference> = candidate_groups(language, active_rules)
        .into_iter()
        .filter_map(|group| resolve(&group, properties))
        .collect();

    if plugins.is_empty() {
        info!("No analyzer plugins specified for language {language}");
    }

    plugins
}

fn candidate_groups(language: Language, active_rules: &[ProfileRule]) -> Vec<AnalyzerGroupKey> {
    let mut seen = HashSet::new();
    Language::ALL
        .into_iter()
        .map(|lang| AnalyzerGroupKey::new(lang.analyzer_group_key()))
        .chain(
            active_rules
                .iter()
                .filter_map(|rule| AnalyzerGroupKey::for_rule(rule, language.key())),
        )
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

fn resolve(group: &AnalyzerGroupKey, properties: &PropertyStore) -> Option<PluginReference> {
    let id = properties.get(&group.property("analyzerId"));
    let version = properties.get(&group.property("pluginVersion"));

    match (id, version) {
        (Some(id), Some(version)) => Some(PluginReference {
            id: id.to_string(),
            version: version.to_string(),
        }),
        _ => {
            if !group.as_str().starts_with(SONARANALYZER_GROUP_PREFIX) {
                debug!("No analyzer package metadata for repository {group}");
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn properties() -> PropertyStore {
        [
            ("sonaranalyzer-cs.analyzerId", "SonarAnalyzer.CSharp"),
            ("sonaranalyzer-cs.pluginVersion", "8.6.1.20562"),
            ("sonaranalyzer-vbnet.analyzerId", "SonarAnalyzer.VisualBasic"),
            ("sonaranalyzer-vbnet.pluginVersion", "8.6.1.20562"),
            ("sca.analyzerId", "Security.Analyzer"),
            ("sca.pluginVersion", "1.2.0"),
            ("noversion.analyzerId", "NoVersion.Analyzer"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn builtin_groups_are_always_included() {
        let plugins = plugin_references(Language::CSharp, &[], &properties());
        insta::assert_debug_snapshot!(plugins, @r###"
        [
            PluginReference {
                id: "SonarAnalyzer.CSharp",
                version: "8.6.1.20562",
            },
            PluginReference {
                id: "SonarAnalyzer.VisualBasic",
                version: "8.6.1.20562",
            },
        ]
        "###);
    }

    #[test]
    fn roslyn_groups_follow_builtins_once() {
        let active = vec![
            ProfileRule::active("roslyn.sca", "SCA1"),
            ProfileRule::active("csharpsquid", "S100"),
            ProfileRule::active("roslyn.sca", "SCA2"),
        ];
        let plugins = plugin_references(Language::CSharp, &active, &properties());
        let ids: Vec<&str> = plugins.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "SonarAnalyzer.CSharp",
                "SonarAnalyzer.VisualBasic",
                "Security.Analyzer"
            ]
        );
    }

    #[test]
    fn incomplete_metadata_is_skipped() {
        let active = vec![
            ProfileRule::active("roslyn.noversion", "NV1"),
            ProfileRule::active("roslyn.unknown", "U1"),
        ];
        let props: PropertyStore = [
            ("noversion.analyzerId", "NoVersion.Analyzer"),
            ("sonaranalyzer-cs.analyzerId", "SonarAnalyzer.CSharp"),
        ]
        .into_iter()
        .collect();
        assert!(plugin_references(Language::CSharp, &active, &props).is_empty());
    }

    #[test]
    fn rules_outside_any_group_add_nothing() {
        let active = vec![ProfileRule::active("common-cs", "DuplicatedBlocks")];
        let plugins = plugin_references(Language::VbNet, &active, &properties());
        assert_eq!(plugins.len(), 2);
    }

    #[test]
    fn candidate_groups_are_deduplicated() {
        let active = vec![
            ProfileRule::active("vbnet", "S1"),
            ProfileRule::active("roslyn.a", "A1"),
            ProfileRule::active("roslyn.a", "A2"),
        ];
        let groups = candidate_groups(Language::VbNet, &active);
        let keys: Vec<&str> = groups.iter().map(AnalyzerGroupKey::as_str).collect();
        assert_eq!(keys, ["sonaranalyzer-cs", "sonaranalyzer-vbnet", "a"]);
    }
}
