//! Languages command implementation.

use roslyn_export_core::Language;

/// Runs the languages command.
pub fn run() {
    println!("Supported languages:\n");
    println!("{:<10} {:<15} Analyzer group", "Key", "Repository");
    println!("{}", "-".repeat(50));

    for language in Language::ALL {
        println!(
            "{:<10} {:<15} {}",
            language.key(),
            language.repository_key(),
            language.analyzer_group_key()
        );
    }

    println!("\nRules from `roslyn.<name>` repositories use the analyzer group `<name>`.");
}
