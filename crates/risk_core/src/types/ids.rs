//! Identifier type for risk records.

use std::fmt;

/// Opaque unique identifier of a risk record.
///
/// Assigned once when a draft is admitted to a register and never changed.
///
/// # Examples
///
/// ```
/// use risk_core::types::RiskId;
///
/// let id = RiskId::new("k3j9x0q2a");
/// assert_eq!(id.as_str(), "k3j9x0q2a");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RiskId(String);

impl RiskId {
    /// Creates a new risk ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RiskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RiskId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RiskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
