//! Recovery plan derivation.
//!
//! A plan is the condition plus its staged tasks. Authored stage content
//! always wins; when stages exist without tasks, a standard task set is
//! synthesized per stage, and a separate generator produces generic tasks for
//! conditions with no stage data at all. Task ids are derived purely from
//! condition id, stage identifier and task index, so regeneration is
//! deterministic: no randomness, no wall clock.

use std::sync::Arc;

use sra_catalog::{Catalog, Condition, RecoveryStage, RecoveryTask};

use crate::lookup::{find_condition, ConditionKey};

/// A staged recovery plan for one condition.
#[derive(Clone, Debug)]
pub struct RecoveryPlan {
    pub condition: Arc<Condition>,
    /// Ordered earliest-stage-first, exactly as authored.
    pub stages: Vec<RecoveryStage>,
}

/// Derives recovery plans from catalog data.
#[derive(Clone)]
pub struct RecoveryPlanner {
    catalog: Arc<Catalog>,
}

impl RecoveryPlanner {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Builds the staged plan for a condition.
    ///
    /// Returns `None` when the identifier resolves to no condition. If any
    /// authored stage carries tasks the authored stages are returned
    /// unchanged; otherwise each authored stage gets the standard synthesized
    /// task set, with the stage's timeframe as its display name. A condition
    /// without stages yields a plan with no stages (callers turn to
    /// [`default_tasks`](Self::default_tasks) for those).
    pub fn build_plan(&self, key: &ConditionKey) -> Option<RecoveryPlan> {
        let condition = find_condition(&self.catalog, key)?;

        if condition.recovery_stages.iter().any(|stage| !stage.tasks.is_empty()) {
            return Some(RecoveryPlan {
                condition: condition.clone(),
                stages: condition.recovery_stages.clone(),
            });
        }

        let stages = condition
            .recovery_stages
            .iter()
            .map(|stage| synthesize_stage(condition.id.as_str(), stage))
            .collect();
        Some(RecoveryPlan {
            condition: condition.clone(),
            stages,
        })
    }

    /// Generic tasks for a condition with no stage-specific data.
    ///
    /// Returns exactly three tasks with ids
    /// `<conditionId>-default-<stageNumber>-<index>`, or an empty vector when
    /// the identifier resolves to no condition.
    pub fn default_tasks(&self, key: &ConditionKey, stage_number: u32) -> Vec<RecoveryTask> {
        let Some(condition) = find_condition(&self.catalog, key) else {
            return Vec::new();
        };
        let id = condition.id.as_str();
        vec![
            RecoveryTask {
                id: format!("{id}-default-{stage_number}-1"),
                title: "Follow medical advice".to_owned(),
                description: "Follow all instructions from your healthcare provider.".to_owned(),
                duration: "Ongoing".to_owned(),
                frequency: "Daily".to_owned(),
                completed: false,
            },
            RecoveryTask {
                id: format!("{id}-default-{stage_number}-2"),
                title: "Track symptoms".to_owned(),
                description: "Keep a journal of your symptoms and recovery progress.".to_owned(),
                duration: "5 min".to_owned(),
                frequency: "Daily".to_owned(),
                completed: false,
            },
            RecoveryTask {
                id: format!("{id}-default-{stage_number}-3"),
                title: "Maintain healthy habits".to_owned(),
                description: "Stay hydrated, eat nutritious foods, and get adequate rest."
                    .to_owned(),
                duration: "Ongoing".to_owned(),
                frequency: "Daily".to_owned(),
                completed: false,
            },
        ]
    }
}

fn synthesize_stage(condition_id: &str, stage: &RecoveryStage) -> RecoveryStage {
    let timeframe_id = sanitize_timeframe(&stage.timeframe);
    let task = |index: usize, title: &str, description: &str, duration: &str| RecoveryTask {
        id: format!("{condition_id}-task-{index}-{timeframe_id}"),
        title: title.to_owned(),
        description: description.to_owned(),
        duration: duration.to_owned(),
        frequency: "Daily".to_owned(),
        completed: false,
    };

    RecoveryStage {
        // the timeframe doubles as the display name for synthesized stages
        name: stage.timeframe.clone(),
        timeframe: stage.timeframe.clone(),
        description: stage.description.clone(),
        milestones: stage.milestones.clone(),
        watch_out_for: stage.watch_out_for.clone(),
        tasks: vec![
            task(
                1,
                "Follow treatment plan",
                "Follow the treatment plan as prescribed by your healthcare provider.",
                "Ongoing",
            ),
            task(
                2,
                "Monitor symptoms",
                "Keep track of your symptoms and report any changes to your healthcare provider.",
                "5 min",
            ),
            task(
                3,
                "Rest and recover",
                "Get adequate rest to support your body's healing process.",
                "As needed",
            ),
        ],
    }
}

/// Collapses whitespace runs in a timeframe to hyphens for use in task ids.
fn sanitize_timeframe(timeframe: &str) -> String {
    timeframe.split_whitespace().collect::<Vec<_>>().join("-")
}
