//! Offline [`QualityProfileService`] backed by a JSON snapshot.
//!
//! ```json
//! {
//!   "properties": { "sonaranalyzer-cs.analyzerId": "SonarAnalyzer.CSharp" },
//!   "profiles": {
//!     "cs-profile": {
//!       "active": [
//!         { "key": "S107", "repositoryKey": "csharpsquid",
//!           "parameters": [{ "key": "max", "value": "7" }] }
//!       ],
//!       "inactive": []
//!     }
//!   }
//! }
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::properties::PropertyStore;
use crate::rule::{ProfileRule, RuleParameter};
use crate::service::{QualityProfileService, ServiceError};

/// Raw JSON representation of a snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
struct SnapshotDto {
    #[serde(default)]
    properties: BTreeMap<String, String>,
    #[serde(default)]
    profiles: HashMap<String, ProfileDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ProfileDto {
    #[serde(default)]
    active: Vec<RuleDto>,
    #[serde(default)]
    inactive: Vec<RuleDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleDto {
    key: String,
    repository_key: String,
    #[serde(default)]
    parameters: Vec<RuleParameter>,
}

impl RuleDto {
    fn into_rule(self, active: bool) -> ProfileRule {
        ProfileRule::new(self.repository_key, self.key, active).with_parameters(self.parameters)
    }
}

#[derive(Debug, Clone, Default)]
struct Profile {
    active: Vec<ProfileRule>,
    inactive: Vec<ProfileRule>,
}

/// A service answering from an in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotService {
    properties: PropertyStore,
    profiles: HashMap<String, Profile>,
}

impl SnapshotService {
    /// Creates a service with the given properties and no profiles.
    #[must_use]
    pub fn new(properties: PropertyStore) -> Self {
        Self {
            properties,
            profiles: HashMap::new(),
        }
    }

    /// Adds a profile. Each rule is filed by its activation state.
    #[must_use]
    pub fn with_profile(
        mut self,
        quality_profile_key: impl Into<String>,
        rules: impl IntoIterator<Item = ProfileRule>,
    ) -> Self {
        let profile = self.profiles.entry(quality_profile_key.into()).or_default();
        for rule in rules {
            if rule.is_active() {
                profile.active.push(rule);
            } else {
                profile.inactive.push(rule);
            }
        }
        self
    }

    /// Parses a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Parse`] if the JSON is malformed.
    pub fn from_json(content: &str) -> Result<Self, ServiceError> {
        let dto: SnapshotDto = serde_json::from_str(content)?;
        let profiles = dto
            .profiles
            .into_iter()
            .map(|(key, p)| {
                let profile = Profile {
                    active: p.active.into_iter().map(|r| r.into_rule(true)).collect(),
                    inactive: p.inactive.into_iter().map(|r| r.into_rule(false)).collect(),
                };
                (key, profile)
            })
            .collect();
        Ok(Self {
            properties: PropertyStore::from(dto.properties),
            profiles,
        })
    }

    /// Loads a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ServiceError> {
        let content = std::fs::read_to_string(path).map_err(|e| ServiceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Returns the known quality profile keys, sorted.
    #[must_use]
    pub fn profile_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[async_trait]
impl QualityProfileService for SnapshotService {
    async fn fetch_all_properties(&self) -> Result<PropertyStore, ServiceError> {
        Ok(self.properties.clone())
    }

    async fn fetch_rules(
        &self,
        active: bool,
        quality_profile_key: &str,
    ) -> Result<Vec<ProfileRule>, ServiceError> {
        let profile = self
            .profiles
            .get(quality_profile_key)
            .ok_or_else(|| ServiceError::UnknownQualityProfile(quality_profile_key.to_string()))?;
        Ok(if active {
            profile.active.clone()
        } else {
            profile.inactive.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "properties": { "sonar.cs.foo": "bar" },
        "profiles": {
            "qp": {
                "active": [
                    { "key": "S107", "repositoryKey": "csharpsquid",
                      "parameters": [{ "key": "max", "value": "7" }] }
                ],
                "inactive": [{ "key": "S100", "repositoryKey": "csharpsquid" }]
            }
        }
    }"#;

    #[tokio::test]
    async fn rules_are_split_by_activation() {
        let service = SnapshotService::from_json(SNAPSHOT).unwrap();

        let active = service.fetch_rules(true, "qp").await.unwrap();
        assert_eq!(active.len(), 1);
        assert!(active[0].is_active());
        assert_eq!(active[0].parameters(), [RuleParameter::new("max", "7")]);

        let inactive = service.fetch_rules(false, "qp").await.unwrap();
        assert_eq!(inactive.len(), 1);
        assert!(!inactive[0].is_active());
        assert!(inactive[0].parameters().is_empty());
    }

    #[tokio::test]
    async fn properties_are_returned_unfiltered() {
        let service = SnapshotService::from_json(SNAPSHOT).unwrap();
        let props = service.fetch_all_properties().await.unwrap();
        assert_eq!(props.get("sonar.cs.foo"), Some("bar"));
    }

    #[tokio::test]
    async fn unknown_profile_is_an_error() {
        let service = SnapshotService::from_json(SNAPSHOT).unwrap();
        let err = service.fetch_rules(true, "missing").await.unwrap_err();
        assert!(matches!(err, ServiceError::UnknownQualityProfile(ref k) if k == "missing"));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = SnapshotService::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ServiceError::Parse(_)));
    }

    #[test]
    fn empty_object_is_an_empty_snapshot() {
        let service = SnapshotService::from_json("{}").unwrap();
        assert!(service.profile_keys().is_empty());
    }

    #[tokio::test]
    async fn with_profile_files_rules_by_state() {
        let service = SnapshotService::new(PropertyStore::new()).with_profile(
            "qp",
            [
                ProfileRule::active("csharpsquid", "S1"),
                ProfileRule::inactive("csharpsquid", "S2"),
            ],
        );
        assert_eq!(service.fetch_rules(true, "qp").await.unwrap()[0].key(), "S1");
        assert_eq!(service.fetch_rules(false, "qp").await.unwrap()[0].key(), "S2");
        assert_eq!(service.profile_keys(), ["qp"]);
    }
}
