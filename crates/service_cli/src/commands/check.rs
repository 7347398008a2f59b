//! Check command implementation
//!
//! Validates the configuration file and prints the effective settings.

use std::path::Path;

use infra_config::RegisterConfig;
use tracing::info;

use crate::Result;

/// Run the check command
pub fn run(config_path: &Path) -> Result<()> {
    info!("Checking configuration...");

    if config_path.exists() {
        println!("Config file: {}", config_path.display());
    } else {
        println!("Config file: {} (not found, using defaults)", config_path.display());
    }

    let config = RegisterConfig::load_with_env_and_validate(config_path)?;
    let analytics = &config.analytics;

    println!("  log_level: {}", config.log_level);
    println!("  export.date_format: {}", config.export.date_format);
    println!("  analytics.timeline_length: {}", analytics.timeline_length);
    println!(
        "  analytics.high_risk_levels: {}",
        analytics
            .high_risk_levels
            .iter()
            .map(|l| l.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  analytics.trend.window_days: {}", analytics.trend.window_days);

    println!("Configuration OK");
    info!("Check complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_check_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&dir.path().join("riskreg.toml")).is_ok());
    }

    #[test]
    fn test_check_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("riskreg.toml");
        std::fs::write(&path, "log_level = \"loud\"\n").unwrap();
        assert!(matches!(run(&path), Err(CliError::Config(_))));
    }
}
