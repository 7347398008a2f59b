//! Risk level table.
//!
//! Seven named bands over the 1-25 score range of a 5x5 probability/impact
//! scale. Each band is identified by the inclusive lower bound of its score
//! range; [`RiskLevel::ALL`] lists them in ascending threshold order.
//!
//! # Examples
//!
//! ```
//! use risk_core::types::RiskLevel;
//!
//! assert_eq!(RiskLevel::Significant.threshold(), 8);
//! assert_eq!(RiskLevel::ProceedAtOwnRisk.name(), "PROCEED AT YOUR OWN RISK");
//!
//! let level: RiskLevel = "very high".parse().unwrap();
//! assert_eq!(level, RiskLevel::VeryHigh);
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::ParseError;

/// Named risk category assigned to a score by threshold lookup.
///
/// The derived ordering follows the threshold order, so
/// `RiskLevel::Low < RiskLevel::High`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskLevel {
    /// Scores 1-2
    #[cfg_attr(feature = "serde", serde(rename = "ACCEPTABLE"))]
    Acceptable,
    /// Scores 3-4
    #[cfg_attr(feature = "serde", serde(rename = "VERY LOW"))]
    VeryLow,
    /// Scores 5-7
    #[cfg_attr(feature = "serde", serde(rename = "LOW"))]
    Low,
    /// Scores 8-9
    #[cfg_attr(feature = "serde", serde(rename = "SIGNIFICANT"))]
    Significant,
    /// Scores 10-14
    #[cfg_attr(feature = "serde", serde(rename = "HIGH"))]
    High,
    /// Scores 15-19
    #[cfg_attr(feature = "serde", serde(rename = "VERY HIGH"))]
    VeryHigh,
    /// Scores 20-25
    #[cfg_attr(feature = "serde", serde(rename = "PROCEED AT YOUR OWN RISK"))]
    ProceedAtOwnRisk,
}

impl RiskLevel {
    /// All levels in ascending threshold order.
    pub const ALL: [RiskLevel; 7] = [
        RiskLevel::Acceptable,
        RiskLevel::VeryLow,
        RiskLevel::Low,
        RiskLevel::Significant,
        RiskLevel::High,
        RiskLevel::VeryHigh,
        RiskLevel::ProceedAtOwnRisk,
    ];

    /// Inclusive lower score bound of this level.
    pub fn threshold(&self) -> u8 {
        match self {
            RiskLevel::Acceptable => 1,
            RiskLevel::VeryLow => 3,
            RiskLevel::Low => 5,
            RiskLevel::Significant => 8,
            RiskLevel::High => 10,
            RiskLevel::VeryHigh => 15,
            RiskLevel::ProceedAtOwnRisk => 20,
        }
    }

    /// Display name of this level.
    pub fn name(&self) -> &'static str {
        match self {
            RiskLevel::Acceptable => "ACCEPTABLE",
            RiskLevel::VeryLow => "VERY LOW",
            RiskLevel::Low => "LOW",
            RiskLevel::Significant => "SIGNIFICANT",
            RiskLevel::High => "HIGH",
            RiskLevel::VeryHigh => "VERY HIGH",
            RiskLevel::ProceedAtOwnRisk => "PROCEED AT YOUR OWN RISK",
        }
    }

    /// Background colour (hex RGB) used when rendering this level.
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Acceptable => "#99F6E4",
            RiskLevel::VeryLow => "#4ADE80",
            RiskLevel::Low => "#FDE047",
            RiskLevel::Significant => "#FB923C",
            RiskLevel::High => "#F87171",
            RiskLevel::VeryHigh => "#DC2626",
            RiskLevel::ProceedAtOwnRisk => "#991B1B",
        }
    }

    /// Text colour (hex RGB) paired with [`RiskLevel::color`].
    pub fn text_color(&self) -> &'static str {
        match self {
            RiskLevel::Acceptable => "#115E59",
            RiskLevel::VeryLow => "#166534",
            RiskLevel::Low => "#854D0E",
            RiskLevel::Significant => "#9A3412",
            RiskLevel::High | RiskLevel::VeryHigh | RiskLevel::ProceedAtOwnRisk => "#FEE2E2",
        }
    }

    /// The lowest-threshold level, returned for scores below every band.
    pub fn lowest() -> RiskLevel {
        Self::ALL[0]
    }

    /// Human-readable score range of this level on the 5x5 matrix,
    /// e.g. `"10-12"` for [`RiskLevel::High`].
    ///
    /// Only products of two ratings in 1-5 can occur, so the upper bound is
    /// the largest attainable score below the next threshold.
    pub fn score_range_label(&self) -> String {
        let lower = self.threshold();
        let next = Self::ALL
            .iter()
            .find(|level| level.threshold() > lower)
            .map(|level| level.threshold())
            .unwrap_or(u8::MAX);
        let upper = (lower..next)
            .filter(|s| crate::scoring::is_attainable_score(*s))
            .max()
            .unwrap_or(lower);
        format!("{}-{}", lower, upper)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RiskLevel {
    type Err = ParseError;

    /// Parses a level name case-insensitively; `_` and `-` are accepted as spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().replace(['_', '-'], " ").to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.name() == normalised)
            .ok_or_else(|| ParseError::UnknownLevel(s.to_string()))
    }
}
