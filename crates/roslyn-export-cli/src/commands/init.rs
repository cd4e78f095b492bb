//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# roslyn-export configuration

[rule_set]
# Action written for active rules: none, hidden, info, warning, error
# Inactive rules are always written as "None".
active_action = "warning"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("roslyn-export.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created roslyn-export.toml");
    println!("\nNext steps:");
    println!("  1. Edit roslyn-export.toml to choose the active rule action");
    println!("  2. Run: roslyn-export export --snapshot <file> --language cs --profile <key>");

    Ok(())
}
