//! SonarLint supplemental configuration.
//!
//! The first-party analyzers read their rule parameters and language
//! settings from an additional file next to the rule set. Third-party
//! analyzers are not expected to look there, so only rules from the
//! language's own repository are exported.

use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::language::Language;
use crate::properties::PropertyStore;
use crate::rule::{ProfileRule, RuleParameter};

/// File name under which the analyzers expect this document.
pub const SONARLINT_FILE_NAME: &str = "SonarLint.xml";

/// A key/value pair in the supplemental configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SettingEntry {
    /// Setting or parameter key.
    pub key: String,
    /// Value as text.
    pub value: String,
}

impl SettingEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<&RuleParameter> for SettingEntry {
    fn from(p: &RuleParameter) -> Self {
        Self::new(p.key.clone(), p.value.clone())
    }
}

/// A first-party rule and its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SonarLintRule {
    /// Rule key (e.g. `S100`).
    pub key: String,
    /// Parameters, or `None` when the rule has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<SettingEntry>>,
}

/// The supplemental configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SonarLintConfig {
    /// Language settings (`sonar.<language>.*`), prefix kept.
    pub settings: Vec<SettingEntry>,
    /// Rules from the language's first-party repository.
    pub rules: Vec<SonarLintRule>,
}

/// Builds [`SonarLintConfig`] documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SonarLintConfigBuilder;

impl SonarLintConfigBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Builds the supplemental configuration for `language_key`.
    ///
    /// `rules` is normally the set of active rules of the profile.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedLanguage`] (or
    /// [`ExportError::InvalidArgument`] for an empty key) before any
    /// property is read.
    pub fn build(
        &self,
        rules: &[ProfileRule],
        properties: &PropertyStore,
        language_key: &str,
    ) -> Result<SonarLintConfig, ExportError> {
        let language = Language::from_key(language_key)?;
        Ok(self.build_for(rules, properties, language))
    }

    /// Builds the supplemental configuration for an already resolved language.
    #[must_use]
    pub fn build_for(
        &self,
        rules: &[ProfileRule],
        properties: &PropertyStore,
        language: Language,
    ) -> SonarLintConfig {
        SonarLintConfig {
            settings: language_settings(language, properties),
            rules: repository_rules(language.repository_key(), rules),
        }
    }
}

fn language_settings(language: Language, properties: &PropertyStore) -> Vec<SettingEntry> {
    let prefix = format!("sonar.{}.", language.key());
    properties
        .with_prefix(&prefix)
        .filter(|(key, _)| key.len() > prefix.len())
        .map(|(key, value)| SettingEntry::new(key, value))
        .collect()
}

fn repository_rules(repository_key: &str, rules: &[ProfileRule]) -> Vec<SonarLintRule> {
    rules
        .iter()
        .filter(|r| r.repository_key() == repository_key)
        .map(|r| SonarLintRule {
            key: r.key().to_string(),
            parameters: (!r.parameters().is_empty())
                .then(|| r.parameters().iter().map(SettingEntry::from).collect()),
        })
        .collect()
}
