//! Risk record factory.
//!
//! Builds complete records from raw input and applies edits, recomputing the
//! derived metrics through [`compute_metrics`] whenever a scoring input
//! changes. The factory never assigns ids: [`create_record`] returns a
//! [`RiskDraft`] and the owning register decides the id.
//!
//! Every operation has an `_at` variant taking the timestamp explicitly;
//! the plain variants use the current time.

use chrono::{DateTime, Utc};

use crate::scoring::{compute_metrics, validate_assessment_inputs, validate_mitigation};
use crate::types::{
    FinancialExposure, RecordError, RiskDraft, RiskId, RiskRecord, RiskStatus,
};

/// Raw fields for a new risk.
///
/// # Examples
///
/// ```
/// use risk_core::factory::RiskInput;
/// use risk_core::types::RiskStatus;
///
/// let input = RiskInput::new("Regulatory penalty", 4, 4)
///     .with_mitigation(0.3)
///     .with_owner("Project Director")
///     .with_status(RiskStatus::InProgress);
/// assert_eq!(input.probability, 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RiskInput {
    /// Description (must not be blank)
    pub description: String,
    /// Probability rating (1-5)
    pub probability: u8,
    /// Impact rating (1-5)
    pub impact: u8,
    /// Mitigation effectiveness in [0, 1]
    pub mitigation_effectiveness: f64,
    /// Responsible person or team
    pub owner: Option<String>,
    /// Category
    pub category: Option<String>,
    /// Project grouping key
    pub project: Option<String>,
    /// Initial status; `Open` when absent
    pub status: Option<RiskStatus>,
    /// Notes
    pub notes: Option<String>,
    /// Comments and lessons learned
    pub comments: Option<String>,
    /// When mitigation was implemented
    pub mitigation_date: Option<DateTime<Utc>>,
    /// When the risk was closed out
    pub completion_date: Option<DateTime<Utc>>,
    /// Causing risks
    pub causes: Vec<RiskId>,
    /// Caused risks
    pub effects: Vec<RiskId>,
    /// Root-cause flag
    pub root_cause: bool,
    /// High-priority flag
    pub high_priority: bool,
    /// Financial exposure inputs
    pub exposure: Option<FinancialExposure>,
    /// Precomputed mitigation savings
    pub mitigation_savings: Option<f64>,
}

impl RiskInput {
    /// Creates an input with the three required fields.
    pub fn new(description: impl Into<String>, probability: u8, impact: u8) -> Self {
        Self {
            description: description.into(),
            probability,
            impact,
            ..Self::default()
        }
    }

    /// Sets mitigation effectiveness.
    pub fn with_mitigation(mut self, effectiveness: f64) -> Self {
        self.mitigation_effectiveness = effectiveness;
        self
    }

    /// Sets the owner.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the project.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Sets the initial status.
    pub fn with_status(mut self, status: RiskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets comments.
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    /// Sets the mitigation date.
    pub fn with_mitigation_date(mut self, date: DateTime<Utc>) -> Self {
        self.mitigation_date = Some(date);
        self
    }

    /// Sets the financial exposure.
    pub fn with_exposure(mut self, exposure: FinancialExposure) -> Self {
        self.exposure = Some(exposure);
        self
    }

    /// Sets the cause/effect links and root-cause flag.
    pub fn with_relationships(
        mut self,
        causes: Vec<RiskId>,
        effects: Vec<RiskId>,
        root_cause: bool,
    ) -> Self {
        self.causes = causes;
        self.effects = effects;
        self.root_cause = root_cause;
        self
    }
}

/// Validates every input field, returning one message per problem.
pub fn validate_input(input: &RiskInput) -> Vec<String> {
    let mut errors = Vec::new();

    if input.description.trim().is_empty() {
        errors.push("Description is required".to_string());
    }
    errors.extend(validate_assessment_inputs(
        f64::from(input.probability),
        f64::from(input.impact),
    ));
    errors.extend(validate_mitigation(input.mitigation_effectiveness));

    errors
}

/// Builds a draft record stamped with the current time.
///
/// # Errors
///
/// [`RecordError::Validation`] with every failing field.
pub fn create_record(input: RiskInput) -> Result<RiskDraft, RecordError> {
    create_record_at(input, Utc::now())
}

/// Builds a draft record with `created_at = updated_at = now`.
///
/// # Errors
///
/// [`RecordError::Validation`] with every failing field.
pub fn create_record_at(input: RiskInput, now: DateTime<Utc>) -> Result<RiskDraft, RecordError> {
    let errors = validate_input(&input);
    if !errors.is_empty() {
        return Err(RecordError::Validation(errors));
    }

    let metrics = compute_metrics(
        input.probability,
        input.impact,
        input.mitigation_effectiveness,
    )?;

    Ok(RiskDraft {
        id: (),
        description: input.description,
        probability: input.probability,
        impact: input.impact,
        mitigation_effectiveness: input.mitigation_effectiveness,
        metrics,
        owner: input.owner,
        category: input.category,
        project: input.project,
        status: input.status.unwrap_or_default(),
        notes: input.notes,
        comments: input.comments,
        created_at: now,
        updated_at: now,
        mitigation_date: input.mitigation_date,
        completion_date: input.completion_date,
        causes: input.causes,
        effects: input.effects,
        root_cause: input.root_cause,
        high_priority: input.high_priority,
        exposure: input.exposure,
        mitigation_savings: input.mitigation_savings,
    })
}

/// Field changes applied by [`update_record`].
///
/// `None` leaves a field untouched. Optional text and date fields take
/// `Some(None)` to clear them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RiskChanges {
    /// New description
    pub description: Option<String>,
    /// New probability
    pub probability: Option<u8>,
    /// New impact
    pub impact: Option<u8>,
    /// New mitigation effectiveness
    pub mitigation_effectiveness: Option<f64>,
    /// New owner
    pub owner: Option<Option<String>>,
    /// New category
    pub category: Option<Option<String>>,
    /// New project
    pub project: Option<Option<String>>,
    /// New status
    pub status: Option<RiskStatus>,
    /// New notes
    pub notes: Option<Option<String>>,
    /// New comments
    pub comments: Option<Option<String>>,
    /// New mitigation date
    pub mitigation_date: Option<Option<DateTime<Utc>>>,
    /// New completion date
    pub completion_date: Option<Option<DateTime<Utc>>>,
    /// New causes
    pub causes: Option<Vec<RiskId>>,
    /// New effects
    pub effects: Option<Vec<RiskId>>,
    /// New root-cause flag
    pub root_cause: Option<bool>,
    /// New high-priority flag
    pub high_priority: Option<bool>,
    /// New financial exposure
    pub exposure: Option<Option<FinancialExposure>>,
    /// New precomputed mitigation savings
    pub mitigation_savings: Option<Option<f64>>,
}

impl RiskChanges {
    /// No changes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Changes the probability.
    pub fn probability(mut self, probability: u8) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Changes the impact.
    pub fn impact(mut self, impact: u8) -> Self {
        self.impact = Some(impact);
        self
    }

    /// Changes mitigation effectiveness.
    pub fn mitigation(mut self, effectiveness: f64) -> Self {
        self.mitigation_effectiveness = Some(effectiveness);
        self
    }

    /// Changes the status.
    pub fn status(mut self, status: RiskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Changes the owner.
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(Some(owner.into()));
        self
    }

    /// Clears the owner.
    pub fn clear_owner(mut self) -> Self {
        self.owner = Some(None);
        self
    }

    /// Changes the project.
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(Some(project.into()));
        self
    }

    /// Sets the mitigation date.
    pub fn mitigation_date(mut self, date: DateTime<Utc>) -> Self {
        self.mitigation_date = Some(Some(date));
        self
    }

    /// Whether any scoring input is changed.
    pub fn touches_scoring(&self) -> bool {
        self.probability.is_some()
            || self.impact.is_some()
            || self.mitigation_effectiveness.is_some()
    }
}

/// Applies `changes` to `existing` at the current time.
///
/// # Errors
///
/// [`RecordError::Validation`] if a changed field is invalid; `existing` is
/// left as it was.
pub fn update_record(existing: &RiskRecord, changes: RiskChanges) -> Result<RiskRecord, RecordError> {
    update_record_at(existing, changes, Utc::now())
}

/// Applies `changes` to `existing`, returning the updated record.
///
/// Metrics are recomputed when probability, impact or mitigation changed;
/// `updated_at` becomes `now`; `id` and `created_at` are preserved.
///
/// # Errors
///
/// [`RecordError::Validation`] if a changed field is invalid.
pub fn update_record_at(
    existing: &RiskRecord,
    changes: RiskChanges,
    now: DateTime<Utc>,
) -> Result<RiskRecord, RecordError> {
    let mut record = existing.clone();
    let rescore = changes.touches_scoring();

    if let Some(description) = changes.description {
        if description.trim().is_empty() {
            return Err(RecordError::Validation(vec![
                "Description is required".to_string(),
            ]));
        }
        record.description = description;
    }

    if rescore {
        let probability = changes.probability.unwrap_or(record.probability);
        let impact = changes.impact.unwrap_or(record.impact);
        let effectiveness = changes
            .mitigation_effectiveness
            .unwrap_or(record.mitigation_effectiveness);

        let mut errors = validate_assessment_inputs(f64::from(probability), f64::from(impact));
        errors.extend(validate_mitigation(effectiveness));
        if !errors.is_empty() {
            return Err(RecordError::Validation(errors));
        }

        record.metrics = compute_metrics(probability, impact, effectiveness)?;
        record.probability = probability;
        record.impact = impact;
        record.mitigation_effectiveness = effectiveness;
    }

    if let Some(owner) = changes.owner {
        record.owner = owner;
    }
    if let Some(category) = changes.category {
        record.category = category;
    }
    if let Some(project) = changes.project {
        record.project = project;
    }
    if let Some(status) = changes.status {
        record.status = status;
    }
    if let Some(notes) = changes.notes {
        record.notes = notes;
    }
    if let Some(comments) = changes.comments {
        record.comments = comments;
    }
    if let Some(date) = changes.mitigation_date {
        record.mitigation_date = date;
    }
    if let Some(date) = changes.completion_date {
        record.completion_date = date;
    }
    if let Some(causes) = changes.causes {
        record.causes = causes;
    }
    if let Some(effects) = changes.effects {
        record.effects = effects;
    }
    if let Some(root_cause) = changes.root_cause {
        record.root_cause = root_cause;
    }
    if let Some(high_priority) = changes.high_priority {
        record.high_priority = high_priority;
    }
    if let Some(exposure) = changes.exposure {
        record.exposure = exposure;
    }
    if let Some(savings) = changes.mitigation_savings {
        record.mitigation_savings = savings;
    }

    record.updated_at = now;
    Ok(record)
}
