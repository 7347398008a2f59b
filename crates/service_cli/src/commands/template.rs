//! Template command implementation

use std::path::Path;

use adapter_xlsx::{save_workbook, template_workbook};
use tracing::info;

use crate::Result;

/// Default template file name
pub const DEFAULT_TEMPLATE_PATH: &str = "risk_register_template.xlsx";

/// Run the template command
pub fn run(output: &Path) -> Result<()> {
    let mut workbook = template_workbook()?;
    save_workbook(&mut workbook, output)?;
    info!("Template written to {}", output.display());
    println!("Wrote {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter_xlsx::import_file;

    #[test]
    fn test_template_file_imports() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join(DEFAULT_TEMPLATE_PATH);
        run(&output).unwrap();

        let result = import_file(&output);
        assert!(result.success, "{:?}", result.errors);
        assert_eq!(result.records.len(), 2);
    }
}
