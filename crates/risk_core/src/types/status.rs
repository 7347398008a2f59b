//! Lifecycle status of a risk.

use std::fmt;
use std::str::FromStr;

use super::error::ParseError;

/// Lifecycle status of a risk, changed by user action.
///
/// # Examples
///
/// ```
/// use risk_core::types::RiskStatus;
///
/// assert_eq!(RiskStatus::default(), RiskStatus::Open);
/// assert_eq!(RiskStatus::InProgress.to_string(), "In Progress");
/// assert!(RiskStatus::InProgress.is_active());
/// assert!(RiskStatus::Closed.is_resolved());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskStatus {
    /// Identified, no action yet
    #[default]
    Open,
    /// Mitigation under way
    #[cfg_attr(feature = "serde", serde(rename = "In Progress"))]
    InProgress,
    /// Controls in place
    Mitigated,
    /// No longer tracked
    Closed,
}

impl RiskStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [RiskStatus; 4] = [
        RiskStatus::Open,
        RiskStatus::InProgress,
        RiskStatus::Mitigated,
        RiskStatus::Closed,
    ];

    /// Display name of this status.
    pub fn name(&self) -> &'static str {
        match self {
            RiskStatus::Open => "Open",
            RiskStatus::InProgress => "In Progress",
            RiskStatus::Mitigated => "Mitigated",
            RiskStatus::Closed => "Closed",
        }
    }

    /// `Open` or `In Progress`.
    pub fn is_active(&self) -> bool {
        matches!(self, RiskStatus::Open | RiskStatus::InProgress)
    }

    /// `Mitigated` or `Closed`.
    pub fn is_resolved(&self) -> bool {
        matches!(self, RiskStatus::Mitigated | RiskStatus::Closed)
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RiskStatus {
    type Err = ParseError;

    /// Exact status names, case-insensitive. `in_progress` and `in-progress`
    /// are accepted for `In Progress`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().replace(['_', '-'], " ").to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.name().to_lowercase() == normalised)
            .ok_or_else(|| ParseError::UnknownStatus(s.to_string()))
    }
}
