//! Risk record model.
//!
//! A [`Risk`] is generic over its identifier so that the record factory can
//! hand out records before an id has been assigned:
//! - [`RiskDraft`] (`Risk<()>`): produced by the factory, no id yet
//! - [`RiskRecord`] (`Risk<RiskId>`): a register member
//!
//! The scoring inputs (probability, impact, mitigation effectiveness) and
//! the derived [`RiskMetrics`] are only writable through
//! [`crate::factory`], which recomputes the metrics whenever an input
//! changes. Deserialization validates the inputs and recomputes the metrics
//! too; serialized metric fields are ignored. Everything else is plain data.

use chrono::{DateTime, Utc};

use super::ids::RiskId;
use super::level::RiskLevel;
use super::status::RiskStatus;
#[cfg(feature = "serde")]
use super::error::RecordError;
#[cfg(feature = "serde")]
use crate::scoring::{compute_metrics, validate_assessment_inputs, validate_mitigation};

/// Derived scoring fields of a risk.
///
/// Always computed by [`crate::scoring::compute_metrics`], never edited.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskMetrics {
    /// probability × impact, in [1, 25]
    pub score: u8,
    /// Level of `score`
    pub risk_level: RiskLevel,
    /// score × (1 − mitigation effectiveness), rounded to one decimal
    pub residual_score: f64,
    /// Level of `residual_score`
    pub residual_risk_level: RiskLevel,
}

/// Inputs to the financial impact estimate.
///
/// e.g. $15,000 per day over 20 days, or $250,000 per single occurrence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinancialExposure {
    /// Currency amount lost per exposure unit
    pub dollar_effect_per_unit: f64,
    /// Number of exposure units at stake
    pub exposure_units: f64,
    /// Unit label ("days", "MWh", "% tariff", ...)
    #[cfg_attr(feature = "serde", serde(default))]
    pub exposure_unit_type: Option<String>,
}

impl FinancialExposure {
    /// Creates an exposure of `units` at `per_unit` each.
    pub fn new(per_unit: f64, units: f64) -> Self {
        Self {
            dollar_effect_per_unit: per_unit,
            exposure_units: units,
            exposure_unit_type: None,
        }
    }

    /// Sets the unit label.
    pub fn with_unit_type(mut self, unit_type: impl Into<String>) -> Self {
        self.exposure_unit_type = Some(unit_type.into());
        self
    }

    /// Full exposure before probability weighting.
    pub fn gross(&self) -> f64 {
        self.dollar_effect_per_unit * self.exposure_units
    }
}

/// A risk entry, generic over its identifier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RiskRepr<Id>"))]
pub struct Risk<Id = RiskId> {
    /// Identifier (`()` for drafts)
    pub id: Id,
    /// Non-empty description of the risk
    pub description: String,
    pub(crate) probability: u8,
    pub(crate) impact: u8,
    pub(crate) mitigation_effectiveness: f64,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub(crate) metrics: RiskMetrics,
    /// Responsible person or team
    pub owner: Option<String>,
    /// Free-text category
    pub category: Option<String>,
    /// Project grouping key
    pub project: Option<String>,
    /// Lifecycle status
    pub status: RiskStatus,
    /// Working notes
    pub notes: Option<String>,
    /// Comments and lessons learned
    pub comments: Option<String>,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Set on every mutation
    pub updated_at: DateTime<Utc>,
    /// When mitigation was implemented
    pub mitigation_date: Option<DateTime<Utc>>,
    /// When the risk was closed out
    pub completion_date: Option<DateTime<Utc>>,
    /// Risks that cause this one
    #[cfg_attr(feature = "serde", serde(default))]
    pub causes: Vec<RiskId>,
    /// Risks this one causes
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<RiskId>,
    /// Whether this is a root cause
    #[cfg_attr(feature = "serde", serde(default))]
    pub root_cause: bool,
    /// High-priority flag
    #[cfg_attr(feature = "serde", serde(default))]
    pub high_priority: bool,
    /// Financial exposure inputs
    #[cfg_attr(feature = "serde", serde(default))]
    pub exposure: Option<FinancialExposure>,
    /// Precomputed mitigation savings; authoritative when present
    #[cfg_attr(feature = "serde", serde(default))]
    pub mitigation_savings: Option<f64>,
}

/// A risk that has not been assigned an id.
pub type RiskDraft = Risk<()>;

/// A risk held in a register.
pub type RiskRecord = Risk<RiskId>;

impl<Id> Risk<Id> {
    /// Probability rating (1-5).
    pub fn probability(&self) -> u8 {
        self.probability
    }

    /// Impact rating (1-5).
    pub fn impact(&self) -> u8 {
        self.impact
    }

    /// Mitigation effectiveness in [0, 1].
    pub fn mitigation_effectiveness(&self) -> f64 {
        self.mitigation_effectiveness
    }

    /// All derived scoring fields.
    pub fn metrics(&self) -> &RiskMetrics {
        &self.metrics
    }

    /// Risk score.
    pub fn score(&self) -> u8 {
        self.metrics.score
    }

    /// Level of the risk score.
    pub fn risk_level(&self) -> RiskLevel {
        self.metrics.risk_level
    }

    /// Residual score after mitigation.
    pub fn residual_score(&self) -> f64 {
        self.metrics.residual_score
    }

    /// Level of the residual score.
    pub fn residual_risk_level(&self) -> RiskLevel {
        self.metrics.residual_risk_level
    }

    /// Whether this risk takes part in a cause/effect relationship.
    pub fn has_relationships(&self) -> bool {
        !self.causes.is_empty() || !self.effects.is_empty()
    }

    /// Replaces the identifier, keeping every other field.
    pub fn with_id<NewId>(self, id: NewId) -> Risk<NewId> {
        Risk {
            id,
            description: self.description,
            probability: self.probability,
            impact: self.impact,
            mitigation_effectiveness: self.mitigation_effectiveness,
            metrics: self.metrics,
            owner: self.owner,
            category: self.category,
            project: self.project,
            status: self.status,
            notes: self.notes,
            comments: self.comments,
            created_at: self.created_at,
            updated_at: self.updated_at,
            mitigation_date: self.mitigation_date,
            completion_date: self.completion_date,
            causes: self.causes,
            effects: self.effects,
            root_cause: self.root_cause,
            high_priority: self.high_priority,
            exposure: self.exposure,
            mitigation_savings: self.mitigation_savings,
        }
    }
}

/// Serialized form of a [`Risk`]: the raw inputs without metrics.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RiskRepr<Id> {
    id: Id,
    description: String,
    probability: u8,
    impact: u8,
    #[serde(default)]
    mitigation_effectiveness: f64,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    project: Option<String>,
    #[serde(default)]
    status: RiskStatus,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    comments: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    mitigation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    causes: Vec<RiskId>,
    #[serde(default)]
    effects: Vec<RiskId>,
    #[serde(default)]
    root_cause: bool,
    #[serde(default)]
    high_priority: bool,
    #[serde(default)]
    exposure: Option<FinancialExposure>,
    #[serde(default)]
    mitigation_savings: Option<f64>,
}

#[cfg(feature = "serde")]
impl<Id> TryFrom<RiskRepr<Id>> for Risk<Id> {
    type Error = RecordError;

    fn try_from(repr: RiskRepr<Id>) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();
        if repr.description.trim().is_empty() {
            errors.push("Description is required".to_string());
        }
        errors.extend(validate_assessment_inputs(
            f64::from(repr.probability),
            f64::from(repr.impact),
        ));
        errors.extend(validate_mitigation(repr.mitigation_effectiveness));
        if !errors.is_empty() {
            return Err(RecordError::Validation(errors));
        }

        let metrics = compute_metrics(repr.probability, repr.impact, repr.mitigation_effectiveness)?;

        Ok(Risk {
            id: repr.id,
            description: repr.description,
            probability: repr.probability,
            impact: repr.impact,
            mitigation_effectiveness: repr.mitigation_effectiveness,
            metrics,
            owner: repr.owner,
            category: repr.category,
            project: repr.project,
            status: repr.status,
            notes: repr.notes,
            comments: repr.comments,
            created_at: repr.created_at,
            updated_at: repr.updated_at,
            mitigation_date: repr.mitigation_date,
            completion_date: repr.completion_date,
            causes: repr.causes,
            effects: repr.effects,
            root_cause: repr.root_cause,
            high_priority: repr.high_priority,
            exposure: repr.exposure,
            mitigation_savings: repr.mitigation_savings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{create_record, RiskInput};

    #[test]
    fn test_with_id_preserves_fields() {
        let draft = create_record(
            RiskInput::new("Module price tariff", 3, 4)
                .with_mitigation(0.5)
                .with_project("Solar"),
        )
        .unwrap();
        let record = draft.clone().with_id(RiskId::new("R1"));

        assert_eq!(record.id.as_str(), "R1");
        assert_eq!(record.description, draft.description);
        assert_eq!(record.metrics(), draft.metrics());
        assert_eq!(record.created_at, draft.created_at);
        assert_eq!(record.project.as_deref(), Some("Solar"));
    }

    #[test]
    fn test_financial_exposure_gross() {
        let exposure = FinancialExposure::new(15_000.0, 20.0).with_unit_type("days");
        assert_eq!(exposure.gross(), 300_000.0);
        assert_eq!(exposure.exposure_unit_type.as_deref(), Some("days"));
    }

    #[test]
    fn test_has_relationships() {
        let mut record = create_record(RiskInput::new("Port congestion", 5, 2))
            .unwrap()
            .with_id(RiskId::new("R2"));
        assert!(!record.has_relationships());
        record.effects.push(RiskId::new("R3"));
        assert!(record.has_relationships());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_recomputes_metrics() {
        let record = create_record(RiskInput::new("Grid curtailment", 1, 1))
            .unwrap()
            .with_id(RiskId::new("R1"));
        let mut json = serde_json::to_value(&record).unwrap();
        json["probability"] = 5.into();
        json["impact"] = 5.into();

        let edited: RiskRecord = serde_json::from_value(json).unwrap();
        assert_eq!(edited.score(), 25);
        assert_eq!(edited.risk_level(), RiskLevel::ProceedAtOwnRisk);
        assert_eq!(edited.residual_score(), 25.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_round_trip() {
        let record = create_record(
            RiskInput::new("Module price tariff", 3, 4)
                .with_mitigation(0.5)
                .with_project("Solar"),
        )
        .unwrap()
        .with_id(RiskId::new("R2"));
        let json = serde_json::to_string(&record).unwrap();
        let back: RiskRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_invalid_inputs() {
        let record = create_record(RiskInput::new("Port congestion", 5, 2))
            .unwrap()
            .with_id(RiskId::new("R3"));
        let mut json = serde_json::to_value(&record).unwrap();
        json["impact"] = 9.into();
        json["mitigation_effectiveness"] = 1.5.into();

        let err = serde_json::from_value::<RiskRecord>(json).unwrap_err();
        assert!(err.to_string().contains("Impact must be between 1 and 5"));
        assert!(err.to_string().contains("Mitigation effectiveness"));
    }
}
