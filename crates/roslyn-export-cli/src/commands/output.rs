//! Output formatting for export results.

use anyhow::Result;
use roslyn_export_core::{ExportResponse, SONARLINT_FILE_NAME};

use crate::OutputFormat;

/// Print the export response in the specified format.
pub fn print(response: &ExportResponse, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => return print_json(response),
        OutputFormat::Summary => print_summary(response),
    }
    Ok(())
}

fn print_json(response: &ExportResponse) -> Result<()> {
    let json = serde_json::to_string_pretty(response)?;
    println!("{json}");
    Ok(())
}

fn print_summary(response: &ExportResponse) {
    let rule_set = &response.rule_set;
    println!("{} (ToolsVersion {})", rule_set.name, rule_set.tools_version);

    for group in &rule_set.groups {
        let active = group
            .rules
            .iter()
            .filter(|r| r.action != roslyn_export_core::RuleAction::None)
            .count();
        println!(
            "  {} [{}]: {} rule(s), {} enabled",
            group.analyzer_id,
            group.rule_namespace,
            group.rules.len(),
            active
        );
    }

    let config = &response.sonar_lint_config;
    println!(
        "\n{}: {} setting(s), {} rule(s)",
        SONARLINT_FILE_NAME,
        config.settings.len(),
        config.rules.len()
    );

    println!("\nAnalyzer packages:");
    if response.plugin_references.is_empty() {
        println!("  (none)");
    }
    for plugin in &response.plugin_references {
        println!("  {} {}", plugin.id, plugin.version);
    }
}
