//! Export command implementation.

use anyhow::{anyhow, Context, Result};
use roslyn_export_core::{ResponseAssembler, SnapshotService};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the export command.
pub async fn run(
    snapshot: &Path,
    language: &str,
    profile: &str,
    format: OutputFormat,
    source: &ConfigSource,
) -> Result<()> {
    let config = source.load()?;

    let service = SnapshotService::from_file(snapshot)
        .with_context(|| format!("Failed to load snapshot: {}", snapshot.display()))?;

    tracing::debug!("Snapshot profiles: {:?}", service.profile_keys());

    let response = ResponseAssembler::new(&config)
        .assemble(language, profile, &service)
        .await
        .map_err(|e| {
            // Render code and help before the error is flattened by anyhow.
            eprintln!("{:?}", miette::Report::new(e));
            anyhow!("Export of quality profile `{profile}` failed")
        })?;

    super::output::print(&response, format)
}
