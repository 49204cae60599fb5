//! Wire types for the REST API.
//!
//! These are the JSON shapes exposed to external callers, converted from the
//! core domain types at the handler boundary. Conditions always present a
//! single `treatmentSummary` field regardless of which catalog source shape
//! the record came from.

use serde::{Deserialize, Serialize};
use sra_catalog::{Condition, PersonalFactors, RecoveryStage, RecoveryTask};
use sra_core::{MatchResult, RecoveryPlan};
use utoipa::ToSchema;

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Compact condition view used in listings and match results.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConditionSummary {
    pub id: String,
    pub name: String,
    /// Name-derived slug used in links to the condition detail view.
    pub slug: String,
    pub category: String,
    pub urgency: String,
    pub description: String,
    pub recovery_time: String,
    pub treatment_summary: String,
}

impl From<&Condition> for ConditionSummary {
    fn from(condition: &Condition) -> Self {
        Self {
            id: condition.id.as_str().to_owned(),
            name: condition.name.as_str().to_owned(),
            slug: condition.slug().as_str().to_owned(),
            category: condition.category.clone(),
            urgency: condition.urgency.to_string(),
            description: condition.description.clone(),
            recovery_time: condition.recovery_time.clone(),
            treatment_summary: condition.treatment_summary.clone(),
        }
    }
}

/// Full condition view for the detail endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConditionDetailRes {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub urgency: String,
    pub symptoms: Vec<String>,
    pub description: String,
    pub detailed_description: String,
    pub recovery_time: String,
    pub causes: Vec<String>,
    pub treatment_summary: String,
    pub recovery_stages: Vec<StageRes>,
    pub when_to_see_doctor: String,
    pub prevention_tips: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dos_and_donts: Option<DosAndDontsRes>,
}

impl From<&Condition> for ConditionDetailRes {
    fn from(condition: &Condition) -> Self {
        Self {
            id: condition.id.as_str().to_owned(),
            name: condition.name.as_str().to_owned(),
            slug: condition.slug().as_str().to_owned(),
            category: condition.category.clone(),
            subtype: condition.subtype.clone(),
            urgency: condition.urgency.to_string(),
            symptoms: condition.symptoms.clone(),
            description: condition.description.clone(),
            detailed_description: condition.detailed_description.clone(),
            recovery_time: condition.recovery_time.clone(),
            causes: condition.causes.clone(),
            treatment_summary: condition.treatment_summary.clone(),
            recovery_stages: condition.recovery_stages.iter().map(StageRes::from).collect(),
            when_to_see_doctor: condition.when_to_see_doctor.clone(),
            prevention_tips: condition.prevention_tips.clone(),
            dos_and_donts: condition.dos_and_donts.as_ref().map(|d| DosAndDontsRes {
                dos: d.dos.clone(),
                donts: d.donts.clone(),
            }),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DosAndDontsRes {
    pub dos: Vec<String>,
    pub donts: Vec<String>,
}

/// One recovery stage with its tasks.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageRes {
    pub name: String,
    pub timeframe: String,
    pub description: String,
    pub milestones: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub watch_out_for: Vec<String>,
    pub tasks: Vec<TaskRes>,
}

impl From<&RecoveryStage> for StageRes {
    fn from(stage: &RecoveryStage) -> Self {
        Self {
            name: stage.name.clone(),
            timeframe: stage.timeframe.clone(),
            description: stage.description.clone(),
            milestones: stage.milestones.clone(),
            watch_out_for: stage.watch_out_for.clone(),
            tasks: stage.tasks.iter().map(TaskRes::from).collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskRes {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub frequency: String,
    pub completed: bool,
}

impl From<&RecoveryTask> for TaskRes {
    fn from(task: &RecoveryTask) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            duration: task.duration.clone(),
            frequency: task.frequency.clone(),
            completed: task.completed,
        }
    }
}

/// Symptom match request.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchReq {
    /// Free-text symptom strings; an empty list produces an empty ranking.
    pub symptoms: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub personal_factors: Option<PersonalFactors>,
}

/// One ranked match entry.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchEntryRes {
    pub condition: ConditionSummary,
    /// Normalised overlap ratio in (0, 1].
    pub match_score: f64,
    /// Rounded integer percentage with a `%` suffix.
    pub match_percentage: String,
    pub key_factors: Vec<String>,
}

impl From<&MatchResult> for MatchEntryRes {
    fn from(result: &MatchResult) -> Self {
        Self {
            condition: ConditionSummary::from(result.condition.as_ref()),
            match_score: result.match_score,
            match_percentage: result.match_percentage.clone(),
            key_factors: result.key_factors.clone(),
        }
    }
}

/// Ranked match response.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchRes {
    /// RFC 3339 timestamp stamped by the server, not by the core.
    pub generated_at: String,
    pub results: Vec<MatchEntryRes>,
}

/// Condition listing response.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListConditionsRes {
    pub conditions: Vec<ConditionSummary>,
}

/// Staged recovery plan response.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanRes {
    pub condition: ConditionDetailRes,
    pub stages: Vec<StageRes>,
}

impl From<&RecoveryPlan> for PlanRes {
    fn from(plan: &RecoveryPlan) -> Self {
        Self {
            condition: ConditionDetailRes::from(plan.condition.as_ref()),
            stages: plan.stages.iter().map(StageRes::from).collect(),
        }
    }
}
