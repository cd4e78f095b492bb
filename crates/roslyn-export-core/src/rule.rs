//! Quality profile rules as received from the server.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ExportError;
use crate::language::{
    CSHARP_REPOSITORY_KEY, ROSLYN_REPOSITORY_PREFIX, SONARANALYZER_GROUP_PREFIX,
    VBNET_REPOSITORY_KEY,
};

/// A single rule parameter (name and string value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleParameter {
    /// Parameter name.
    pub key: String,
    /// Parameter value, always carried as text.
    pub value: String,
}

impl RuleParameter {
    /// Creates a new parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A rule of a quality profile together with its activation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRule {
    key: String,
    repository_key: String,
    active: bool,
    parameters: Vec<RuleParameter>,
}

impl ProfileRule {
    /// Creates a rule without parameters.
    #[must_use]
    pub fn new(repository_key: impl Into<String>, key: impl Into<String>, active: bool) -> Self {
        Self {
            key: key.into(),
            repository_key: repository_key.into(),
            active,
            parameters: Vec::new(),
        }
    }

    /// Creates an active rule.
    #[must_use]
    pub fn active(repository_key: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(repository_key, key, true)
    }

    /// Creates an inactive rule.
    #[must_use]
    pub fn inactive(repository_key: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(repository_key, key, false)
    }

    /// Parses a repository-qualified identifier such as `roslyn.sca:S100`.
    ///
    /// The repository is everything before the last `:`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidArgument`] if the separator is missing
    /// or either side is empty.
    pub fn parse_qualified(qualified: &str, active: bool) -> Result<Self, ExportError> {
        let (repo, key) = qualified.rsplit_once(':').ok_or_else(|| {
            ExportError::invalid_argument(
                "rule",
                format!("`{qualified}` is not of the form `repository:key`"),
            )
        })?;
        if repo.is_empty() || key.is_empty() {
            return Err(ExportError::invalid_argument(
                "rule",
                format!("`{qualified}` has an empty repository or key"),
            ));
        }
        Ok(Self::new(repo, key, active))
    }

    /// Appends a parameter, preserving insertion order.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(RuleParameter::new(key, value));
        self
    }

    /// Replaces all parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<RuleParameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Returns the rule key within its repository (e.g. `S100`).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the repository key (e.g. `csharpsquid`).
    #[must_use]
    pub fn repository_key(&self) -> &str {
        &self.repository_key
    }

    /// Returns `true` if the rule is active in the profile.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the rule parameters in server order.
    #[must_use]
    pub fn parameters(&self) -> &[RuleParameter] {
        &self.parameters
    }
}

impl fmt::Display for ProfileRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository_key, self.key)
    }
}

/// Identifies the analyzer plugin that owns a rule.
///
/// Used as the prefix of the plugin's properties, e.g.
/// `sonaranalyzer-cs.analyzerId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnalyzerGroupKey(String);

impl AnalyzerGroupKey {
    /// Creates a group key from a raw string.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Derives the group key of a rule.
    ///
    /// - `roslyn.<x>` repositories map to `<x>`; a bare `roslyn.` has no group.
    /// - The first-party repositories map to `sonaranalyzer-<language_key>`.
    /// - Anything else has no group and is not exported to the rule set.
    #[must_use]
    pub fn for_rule(rule: &ProfileRule, language_key: &str) -> Option<Self> {
        let repo = rule.repository_key();
        if let Some(partial) = repo.strip_prefix(ROSLYN_REPOSITORY_PREFIX) {
            return (!partial.is_empty()).then(|| Self::new(partial));
        }
        if repo == CSHARP_REPOSITORY_KEY || repo == VBNET_REPOSITORY_KEY {
            return Some(Self(format!("{SONARANALYZER_GROUP_PREFIX}{language_key}")));
        }
        None
    }

    /// Returns the property key `<group>.<suffix>`.
    #[must_use]
    pub fn property(&self, suffix: &str) -> String {
        format!("{}.{suffix}", self.0)
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnalyzerGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Action applied to an analyzer diagnostic in a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RuleAction {
    /// Diagnostic is suppressed.
    #[serde(alias = "none")]
    None,
    /// Reported but not shown to the user.
    #[serde(alias = "hidden")]
    Hidden,
    /// Informational message.
    #[serde(alias = "info")]
    Info,
    /// Warning.
    #[default]
    #[serde(alias = "warning")]
    Warning,
    /// Error.
    #[serde(alias = "error")]
    Error,
}

impl RuleAction {
    /// Returns the literal action text used in rule set documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Hidden => "Hidden",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
