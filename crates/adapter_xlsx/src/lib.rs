//! # Adapter XLSX (Spreadsheet Layer)
//!
//! Moves risk registers in and out of spreadsheets.
//!
//! Import reads the first sheet of a workbook (xlsx, xlsm, xlsb, xls,
//! ods) or a CSV file, sniffs the header row for known columns and turns
//! every valid row into a scored [`RiskDraft`](risk_core::types::RiskDraft).
//! Invalid rows are reported by row number and skipped.
//!
//! Export builds `rust_xlsxwriter` workbooks:
//! - [`register_workbook`]: full register plus the risk matrix legend
//! - [`project_summary_workbook`]: per-project rollups and timelines
//! - [`cause_effect_workbook`]: causal links and root causes
//! - [`template_workbook`]: blank import template with example rows
//!
//! ## Example
//!
//! ```
//! use adapter_xlsx::{import_grid, Grid};
//!
//! let grid = Grid::from_text_rows([
//!     ["Risk", "Likelihood", "Severity"],
//!     ["Grid connection delay", "4", "4"],
//! ]);
//! let result = import_grid(&grid);
//! assert!(result.success);
//! assert_eq!(result.records[0].score(), 16);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod columns;
pub mod error;
pub mod export;
pub mod grid;
pub mod import;
pub mod template;

pub use columns::{ColumnMap, Field};
pub use error::{ExportError, ExportResult, SheetError};
pub use export::{
    cause_effect_workbook, matrix_sheet, project_summary_workbook, register_workbook,
    save_workbook, ExportOptions, SheetNames,
};
pub use grid::{Cell, Grid, SheetFormat};
pub use import::{
    import_bytes, import_file, import_file_at, import_grid, import_grid_at, normalize_status,
    read_rows, ImportResult,
};
pub use template::template_workbook;

pub use rust_xlsxwriter::Workbook;
