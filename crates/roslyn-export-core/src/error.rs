//! Error types for profile export.

use miette::Diagnostic;
use thiserror::Error;

use crate::service::ServiceError;

/// Errors that abort a profile export.
///
/// Every builder either fully succeeds or fails with one of these; there is
/// no partial output.
#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    /// A plugin property required to render a rule group is absent.
    #[error(
        "Property does not exist: {key}. This property should be set by the plugin in SonarQube. (analyzer group `{group}`){}",
        hint_suffix(.hint)
    )]
    #[diagnostic(code(roslyn_export::missing_property))]
    MissingConfiguration {
        /// The property key that was looked up.
        key: String,
        /// The analyzer group whose metadata is incomplete.
        group: String,
        /// Extra advice for known incompatibilities.
        #[help]
        hint: Option<String>,
    },

    /// The language key is not one of the supported analysis languages.
    #[error("Unsupported language `{0}`, expected one of: cs, vbnet")]
    #[diagnostic(code(roslyn_export::unsupported_language))]
    UnsupportedLanguage(String),

    /// A required input was empty or malformed.
    #[error("Invalid argument `{name}`: {reason}")]
    #[diagnostic(code(roslyn_export::invalid_argument))]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The remote service collaborator failed.
    #[error("Service request failed: {0}")]
    #[diagnostic(code(roslyn_export::service))]
    Service(#[from] ServiceError),
}

impl ExportError {
    /// Shorthand for [`ExportError::InvalidArgument`].
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_deref().map(|h| format!(" {h}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_configuration_message_names_key_and_group() {
        let err = ExportError::MissingConfiguration {
            key: "sonaranalyzer-cs.analyzerId".to_string(),
            group: "sonaranalyzer-cs".to_string(),
            hint: None,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Property does not exist: sonaranalyzer-cs.analyzerId."));
        assert!(msg.ends_with("(analyzer group `sonaranalyzer-cs`)"));
    }

    #[test]
    fn hint_is_exposed_as_diagnostic_help() {
        let err = ExportError::MissingConfiguration {
            key: "sonaranalyzer-vbnet.ruleNamespace".to_string(),
            group: "sonaranalyzer-vbnet".to_string(),
            hint: Some("upgrade the plugin".to_string()),
        };
        let help = err.help().map(|h| h.to_string());
        assert_eq!(help.as_deref(), Some("upgrade the plugin"));
    }

    #[test]
    fn hint_is_part_of_the_message() {
        let err = ExportError::MissingConfiguration {
            key: "sonaranalyzer-vbnet.ruleNamespace".to_string(),
            group: "sonaranalyzer-vbnet".to_string(),
            hint: Some("upgrade the plugin".to_string()),
        };
        assert!(err
            .to_string()
            .ends_with("(analyzer group `sonaranalyzer-vbnet`) upgrade the plugin"));
    }

    #[test]
    fn diagnostic_codes_are_stable() {
        let err = ExportError::UnsupportedLanguage("java".to_string());
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("roslyn_export::unsupported_language")
        );
    }
}
