//! CLI error types

use adapter_xlsx::ExportError;
use infra_config::ConfigError;
use thiserror::Error;

/// Errors surfaced by `riskreg` commands
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Bad command-line value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Import aborted without producing records
    #[error("Import failed: {}", .0.join("; "))]
    Import(Vec<String>),

    /// Workbook generation failed
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_joins_messages() {
        let err = CliError::Import(vec![
            "Missing required column: probability/likelihood".to_string(),
            "Missing required column: impact/severity".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Import failed: Missing required column: probability/likelihood; \
             Missing required column: impact/severity"
        );
    }

    #[test]
    fn test_config_error_wraps() {
        let err: CliError = ConfigError::Validation(vec!["bad level".to_string()]).into();
        assert!(err.to_string().starts_with("Configuration error: "));
    }

    #[test]
    fn test_export_error_wraps() {
        let err: CliError = ExportError::InvalidDateFormat("%Q".to_string()).into();
        assert!(err.to_string().starts_with("Export error: "));
    }
}
