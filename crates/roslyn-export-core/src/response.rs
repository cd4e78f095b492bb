//! Export orchestration.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::ExportError;
use crate::language::Language;
use crate::plugins::{plugin_references, PluginReference};
use crate::ruleset::{RuleSet, RuleSetBuilder};
use crate::service::QualityProfileService;
use crate::sonarlint::{SonarLintConfig, SonarLintConfigBuilder};

/// Everything an analyzer host needs for one quality profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResponse {
    /// Rule set controlling which diagnostics are reported.
    pub rule_set: RuleSet,
    /// Supplemental settings and rule parameters.
    pub sonar_lint_config: SonarLintConfig,
    /// Analyzer packages to install.
    pub plugin_references: Vec<PluginReference>,
}

/// Fetches a profile and assembles an [`ExportResponse`].
#[derive(Debug, Clone, Default)]
pub struct ResponseAssembler {
    rule_set_builder: RuleSetBuilder,
    sonar_lint_builder: SonarLintConfigBuilder,
}

impl ResponseAssembler {
    /// Creates an assembler from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            rule_set_builder: RuleSetBuilder::from_config(config),
            sonar_lint_builder: SonarLintConfigBuilder::new(),
        }
    }

    /// Exports `quality_profile_key` for `language_key`.
    ///
    /// Inputs are validated before anything is fetched. Properties, active
    /// rules and inactive rules are then fetched concurrently.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid inputs, service failures, or missing
    /// analyzer properties.
    pub async fn assemble<S>(
        &self,
        language_key: &str,
        quality_profile_key: &str,
        service: &S,
    ) -> Result<ExportResponse, ExportError>
    where
        S: QualityProfileService + ?Sized,
    {
        let language = Language::from_key(language_key)?;
        if quality_profile_key.is_empty() {
            return Err(ExportError::invalid_argument(
                "quality_profile_key",
                "must not be empty",
            ));
        }

        info!("Exporting quality profile {quality_profile_key} for language {language}");

        let (properties, active_rules, inactive_rules) = tokio::try_join!(
            service.fetch_all_properties(),
            service.fetch_rules(true, quality_profile_key),
            service.fetch_rules(false, quality_profile_key),
        )?;

        debug!(
            "Fetched {} properties, {} active and {} inactive rules",
            properties.len(),
            active_rules.len(),
            inactive_rules.len()
        );

        let rule_set = self.rule_set_builder.build(
            language.key(),
            &active_rules,
            &inactive_rules,
            &properties,
        )?;
        let sonar_lint_config = self
            .sonar_lint_builder
            .build_for(&active_rules, &properties, language);
        let plugin_references = plugin_references(language, &active_rules, &properties);

        info!(
            "Exported {} rule group(s) with {} rule(s), {} plugin(s)",
            rule_set.groups.len(),
            rule_set.rule_count(),
            plugin_references.len()
        );

        Ok(ExportResponse {
            rule_set,
            sonar_lint_config,
            plugin_references,
        })
    }
}

/// Exports a profile with the default configuration.
///
/// # Errors
///
/// See [`ResponseAssembler::assemble`].
pub async fn build_export<S>(
    language_key: &str,
    quality_profile_key: &str,
    service: &S,
) -> Result<ExportResponse, ExportError>
where
    S: QualityProfileService + ?Sized,
{
    ResponseAssembler::default()
        .assemble(language_key, quality_profile_key, service)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::PropertyStore;
    use crate::rule::{ProfileRule, RuleAction};
    use crate::service::ServiceError;
    use crate::snapshot::SnapshotService;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn properties() -> PropertyStore {
        [
            ("sonaranalyzer-cs.analyzerId", "SonarAnalyzer.CSharp"),
            ("sonaranalyzer-cs.ruleNamespace", "SonarAnalyzer.CSharp"),
            ("sonaranalyzer-cs.pluginVersion", "8.6.1"),
            ("sonar.cs.analyzeGeneratedCode", "false"),
        ]
        .into_iter()
        .collect()
    }

    /// Counts calls so tests can assert nothing was fetched.
    #[derive(Default)]
    struct CountingService {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl QualityProfileService for CountingService {
        async fn fetch_all_properties(&self) -> Result<PropertyStore, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PropertyStore::new())
        }

        async fn fetch_rules(
            &self,
            _active: bool,
            _quality_profile_key: &str,
        ) -> Result<Vec<ProfileRule>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ServiceError::Remote("server unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn assembles_all_three_parts() {
        let service = SnapshotService::new(properties()).with_profile(
            "qp",
            [
                ProfileRule::active("csharpsquid", "S107").with_parameter("max", "7"),
                ProfileRule::inactive("csharpsquid", "S100"),
            ],
        );

        let response = build_export("cs", "qp", &service).await.unwrap();

        assert_eq!(response.rule_set.groups.len(), 1);
        assert_eq!(response.rule_set.rule_count(), 2);
        assert_eq!(response.sonar_lint_config.rules.len(), 1);
        assert_eq!(response.sonar_lint_config.rules[0].key, "S107");
        assert_eq!(response.sonar_lint_config.settings.len(), 1);
        assert_eq!(response.plugin_references.len(), 1);
        assert_eq!(response.plugin_references[0].version, "8.6.1");
    }

    #[tokio::test]
    async fn configured_action_reaches_rule_set() {
        let service = SnapshotService::new(properties())
            .with_profile("qp", [ProfileRule::active("csharpsquid", "S107")]);
        let mut config = Config::default();
        config.rule_set.active_action = RuleAction::Error;

        let response = ResponseAssembler::new(&config)
            .assemble("cs", "qp", &service)
            .await
            .unwrap();
        assert_eq!(
            response.rule_set.groups[0].rules[0].action,
            RuleAction::Error
        );
    }

    #[tokio::test]
    async fn unsupported_language_is_rejected_before_fetching() {
        let service = CountingService::default();
        let err = build_export("java", "qp", &service).await.unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedLanguage(_)));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_profile_key_is_rejected_before_fetching() {
        let service = CountingService::default();
        let err = build_export("cs", "", &service).await.unwrap_err();
        assert!(matches!(
            err,
            ExportError::InvalidArgument {
                name: "quality_profile_key",
                ..
            }
        ));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn service_failures_are_propagated() {
        let service = CountingService::default();
        let err = build_export("cs", "qp", &service).await.unwrap_err();
        assert!(matches!(err, ExportError::Service(ServiceError::Remote(_))));
    }

    #[tokio::test]
    async fn works_through_trait_objects() {
        let service: Box<dyn QualityProfileService> =
            Box::new(SnapshotService::new(properties()).with_profile("qp", Vec::new()));
        let response = build_export("cs", "qp", service.as_ref()).await.unwrap();
        assert!(response.rule_set.groups.is_empty());
    }
}
