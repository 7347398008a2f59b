//! Probability × impact score matrix.
//!
//! Rows are probability 1-5, columns impact 1-5. The matrix is the
//! display form of the scoring rule and is also used for score lookup;
//! every cell equals the product of its row and column ratings.

use super::{MAX_RATING, MIN_RATING};

const SIZE: usize = MAX_RATING as usize;

const fn build_matrix() -> [[u8; SIZE]; SIZE] {
    let mut cells = [[0u8; SIZE]; SIZE];
    let mut p = 0;
    while p < SIZE {
        let mut i = 0;
        while i < SIZE {
            cells[p][i] = ((p + 1) * (i + 1)) as u8;
            i += 1;
        }
        p += 1;
    }
    cells
}

/// The 5x5 risk matrix.
pub const RISK_MATRIX: RiskMatrix = RiskMatrix {
    cells: build_matrix(),
};

/// Score matrix indexed by probability (row) and impact (column).
///
/// # Examples
///
/// ```
/// use risk_core::scoring::RISK_MATRIX;
///
/// assert_eq!(RISK_MATRIX.lookup(3, 4), Some(12));
/// assert_eq!(RISK_MATRIX.lookup(5, 5), Some(25));
/// assert_eq!(RISK_MATRIX.lookup(0, 4), None);
/// assert_eq!(RISK_MATRIX.lookup(6, 1), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RiskMatrix {
    cells: [[u8; SIZE]; SIZE],
}

impl RiskMatrix {
    /// Score at (`probability`, `impact`), or `None` outside the scale.
    pub fn lookup(&self, probability: u8, impact: u8) -> Option<u8> {
        let row = usize::from(probability.checked_sub(MIN_RATING)?);
        let col = usize::from(impact.checked_sub(MIN_RATING)?);
        self.cells.get(row)?.get(col).copied()
    }

    /// Matrix rows, probability 1 first.
    pub fn rows(&self) -> &[[u8; SIZE]; SIZE] {
        &self.cells
    }

    /// Number of ratings on each axis.
    pub fn size(&self) -> usize {
        SIZE
    }
}

/// Whether `score` appears anywhere in the matrix.
pub fn is_attainable_score(score: u8) -> bool {
    RISK_MATRIX
        .rows()
        .iter()
        .any(|row| row.iter().any(|cell| *cell == score))
}
