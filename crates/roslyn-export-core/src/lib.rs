//! # roslyn-export-core
//!
//! Translates a SonarQube quality profile into the artifacts a Roslyn
//! analyzer host consumes:
//!
//! - a [`RuleSet`] enabling or suppressing diagnostics per rule, grouped by
//!   analyzer plugin
//! - a [`SonarLintConfig`] with language settings and first-party rule
//!   parameters
//! - the [`PluginReference`]s of the analyzer packages to install
//!
//! Fetching data is delegated to a [`QualityProfileService`]; everything
//! else is a pure function of the fetched rules and properties.
//!
//! ## Example
//!
//! ```ignore
//! use roslyn_export_core::{build_export, SnapshotService};
//!
//! let service = SnapshotService::from_file("snapshot.json".as_ref())?;
//! let response = build_export("cs", "my-profile", &service).await?;
//! println!("{} groups", response.rule_set.groups.len());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod language;
mod plugins;
mod properties;
mod response;
mod rule;
mod ruleset;
mod service;
mod snapshot;
mod sonarlint;

pub use config::{Config, ConfigError, RuleSetConfig};
pub use error::ExportError;
pub use language::{
    Language, CSHARP_REPOSITORY_KEY, ROSLYN_REPOSITORY_PREFIX, SONARANALYZER_GROUP_PREFIX,
    VBNET_REPOSITORY_KEY,
};
pub use plugins::{plugin_references, PluginReference};
pub use properties::PropertyStore;
pub use response::{build_export, ExportResponse, ResponseAssembler};
pub use rule::{AnalyzerGroupKey, ProfileRule, RuleAction, RuleParameter};
pub use ruleset::{
    RuleEntry, RuleGroup, RuleSet, RuleSetBuilder, RULE_SET_DESCRIPTION, RULE_SET_NAME,
    RULE_SET_TOOLS_VERSION,
};
pub use service::{QualityProfileService, ServiceError};
pub use snapshot::SnapshotService;
pub use sonarlint::{
    SettingEntry, SonarLintConfig, SonarLintConfigBuilder, SonarLintRule, SONARLINT_FILE_NAME,
};
