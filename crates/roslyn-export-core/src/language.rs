//! The closed table of supported analysis languages.
//!
//! Each language owns exactly one first-party rule repository and one
//! built-in analyzer group. Keeping these in a single enum means every
//! lookup is an exhaustive `match` instead of a string comparison.

use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;

/// Repository key prefix for rules contributed by third-party Roslyn analyzers.
pub const ROSLYN_REPOSITORY_PREFIX: &str = "roslyn.";

/// Prefix of the analyzer group keys owned by the first-party analyzers.
pub const SONARANALYZER_GROUP_PREFIX: &str = "sonaranalyzer-";

/// First-party C# rule repository.
pub const CSHARP_REPOSITORY_KEY: &str = "csharpsquid";

/// First-party VB.NET rule repository.
pub const VBNET_REPOSITORY_KEY: &str = "vbnet";

/// A supported analysis language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// C#, language key `cs`.
    CSharp,
    /// VB.NET, language key `vbnet`.
    VbNet,
}

impl Language {
    /// All supported languages, in table order.
    pub const ALL: [Self; 2] = [Self::CSharp, Self::VbNet];

    /// Returns the server-side language key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CSharp => "cs",
            Self::VbNet => "vbnet",
        }
    }

    /// Returns the first-party rule repository for this language.
    #[must_use]
    pub const fn repository_key(self) -> &'static str {
        match self {
            Self::CSharp => CSHARP_REPOSITORY_KEY,
            Self::VbNet => VBNET_REPOSITORY_KEY,
        }
    }

    /// Returns the built-in analyzer group key (e.g. `sonaranalyzer-cs`).
    #[must_use]
    pub const fn analyzer_group_key(self) -> &'static str {
        match self {
            Self::CSharp => "sonaranalyzer-cs",
            Self::VbNet => "sonaranalyzer-vbnet",
        }
    }

    /// Looks up a language by its server-side key.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidArgument`] for an empty key and
    /// [`ExportError::UnsupportedLanguage`] for any other unknown key.
    pub fn from_key(key: &str) -> Result<Self, ExportError> {
        if key.is_empty() {
            return Err(ExportError::invalid_argument(
                "language_key",
                "must not be empty",
            ));
        }
        Self::ALL
            .into_iter()
            .find(|lang| lang.key() == key)
            .ok_or_else(|| ExportError::UnsupportedLanguage(key.to_string()))
    }
}

impl FromStr for Language {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_key() {
        for lang in Language::ALL {
            assert_eq!(Language::from_key(lang.key()).unwrap(), lang);
        }
    }

    #[test]
    fn repository_and_group_keys() {
        assert_eq!(Language::CSharp.repository_key(), "csharpsquid");
        assert_eq!(Language::VbNet.repository_key(), "vbnet");
        assert_eq!(Language::CSharp.analyzer_group_key(), "sonaranalyzer-cs");
        assert_eq!(Language::VbNet.analyzer_group_key(), "sonaranalyzer-vbnet");
    }

    #[test]
    fn group_keys_follow_prefix() {
        for lang in Language::ALL {
            assert_eq!(
                lang.analyzer_group_key(),
                format!("{SONARANALYZER_GROUP_PREFIX}{}", lang.key())
            );
        }
    }

    #[test]
    fn unknown_language_is_unsupported() {
        let err = Language::from_key("java").unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedLanguage(ref k) if k == "java"));
    }

    #[test]
    fn empty_language_is_invalid_argument() {
        let err = "".parse::<Language>().unwrap_err();
        assert!(matches!(
            err,
            ExportError::InvalidArgument {
                name: "language_key",
                ..
            }
        ));
    }

    #[test]
    fn language_keys_are_case_sensitive() {
        assert!(Language::from_key("CS").is_err());
    }
}
