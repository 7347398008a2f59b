//! Matrix command implementation
//!
//! Prints the 5x5 probability × impact matrix and the level legend.

use risk_core::scoring::{classify, RISK_MATRIX};
use risk_core::types::RiskLevel;
use serde::Serialize;

use super::{print_json, print_table, OutputFormat};
use crate::Result;

#[derive(Serialize)]
struct LevelBand {
    level: RiskLevel,
    range: String,
    color: &'static str,
}

#[derive(Serialize)]
struct MatrixReport {
    matrix: Vec<Vec<u8>>,
    levels: Vec<LevelBand>,
}

fn matrix_rows() -> Vec<Vec<String>> {
    RISK_MATRIX
        .rows()
        .iter()
        .enumerate()
        .map(|(p, row)| {
            let mut cells = vec![format!("Probability {}", p + 1)];
            cells.extend(
                row.iter()
                    .map(|score| format!("{} {}", score, classify(f64::from(*score)).name())),
            );
            cells
        })
        .collect()
}

/// Run the matrix command
pub fn run(format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        let report = MatrixReport {
            matrix: RISK_MATRIX.rows().iter().map(|row| row.to_vec()).collect(),
            levels: RiskLevel::ALL
                .iter()
                .map(|level| LevelBand {
                    level: *level,
                    range: level.score_range_label(),
                    color: level.color(),
                })
                .collect(),
        };
        return print_json(&report);
    }

    let headers: Vec<String> = std::iter::once(String::new())
        .chain((1..=RISK_MATRIX.size()).map(|i| format!("Impact {}", i)))
        .collect();
    let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
    print_table(&headers, &matrix_rows());

    println!("\nRisk Level Categories:");
    for level in RiskLevel::ALL {
        println!("  {}: {}", level.score_range_label(), level.name());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_rows() {
        let rows = matrix_rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[2][4], "12 HIGH");
        assert_eq!(rows[4][5], "25 PROCEED AT YOUR OWN RISK");
        assert_eq!(rows[0][1], "1 ACCEPTABLE");
    }
}
