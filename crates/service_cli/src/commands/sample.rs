//! Sample command implementation
//!
//! Writes the demonstration register as a workbook or JSON.

use std::path::Path;

use adapter_xlsx::save_workbook;
use chrono::Utc;
use infra_config::RegisterConfig;
use infra_store::RiskStore;
use tracing::info;

use super::export::{build_workbook, ExportKind};
use super::{load_register, print_json, OutputFormat};
use crate::Result;

/// Default sample workbook file name
pub const DEFAULT_SAMPLE_PATH: &str = "sample_risk_register.xlsx";

/// Run the sample command
///
/// With `--format json` the register is printed instead of written.
pub fn run(config: &RegisterConfig, output: &Path, format: OutputFormat) -> Result<()> {
    let store = load_register(None)?;

    if format == OutputFormat::Json {
        return print_json(&store.list());
    }

    let mut workbook = build_workbook(config, store.list(), ExportKind::Register, Utc::now())?;
    save_workbook(&mut workbook, output)?;
    info!("Sample register with {} risks written", store.len());
    println!("Wrote {}", output.display());
    Ok(())
}
