//! Strict wire models for the two catalog source shapes.
//!
//! The primary source carries richly annotated records with string ids and a
//! `treatmentSummary` field; the legacy source carries simpler records with
//! numeric ids and a `treatmentSimple` field. Both deserialise strictly
//! (camelCase, unknown fields rejected) and normalise into the canonical
//! [`Condition`](crate::Condition) representation, so downstream consumers
//! see a single shape regardless of provenance.

use serde::Deserialize;
use sra_types::NonEmptyText;

use crate::error::{CatalogError, CatalogResult};
use crate::model::{
    CatalogSource, Condition, ConditionId, DosAndDonts, RecoveryStage, RecoveryTask, Severity,
    Symptom, Urgency,
};

/// Top-level shape of the primary catalog document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrimaryCatalogWire {
    #[serde(default)]
    pub symptoms: Vec<SymptomWire>,
    #[serde(default)]
    pub conditions: Vec<PrimaryConditionWire>,
}

/// The legacy catalog document is a bare array of condition records.
pub type LegacyCatalogWire = Vec<LegacyConditionWire>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SymptomWire {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body_parts: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrimaryConditionWire {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, rename = "type")]
    pub subtype: Option<String>,
    pub symptoms: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub detailed_description: String,
    pub recovery_time: String,
    pub urgency: String,
    #[serde(default)]
    pub causes: Vec<String>,
    pub treatment_summary: String,
    #[serde(default)]
    pub recovery_stages: Vec<RecoveryStageWire>,
    #[serde(default)]
    pub when_to_see_doctor: String,
    #[serde(default)]
    pub prevention_tips: Vec<String>,
    #[serde(default)]
    pub dos_and_donts: Option<DosAndDontsWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LegacyConditionWire {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub symptoms: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub detailed_description: String,
    pub recovery_time: String,
    pub urgency: String,
    #[serde(default)]
    pub causes: Vec<String>,
    pub treatment_simple: String,
    /// Present in legacy data but never populated; accepted and discarded.
    #[serde(default)]
    pub treatment_detailed: Vec<String>,
    #[serde(default)]
    pub recovery_stages: Vec<RecoveryStageWire>,
    #[serde(default)]
    pub when_to_see_doctor: String,
    #[serde(default)]
    pub prevention_tips: Vec<String>,
    #[serde(default)]
    pub dos_and_donts: Option<DosAndDontsWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecoveryStageWire {
    /// Legacy stages have no display name; normalisation falls back to the
    /// timeframe.
    #[serde(default)]
    pub name: Option<String>,
    pub timeframe: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub milestones: Vec<String>,
    #[serde(default)]
    pub watch_out_for: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<RecoveryTaskWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecoveryTaskWire {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration: String,
    pub frequency: String,
    #[serde(default)]
    pub completed: bool,
}

impl SymptomWire {
    pub fn into_domain(self) -> CatalogResult<Symptom> {
        let name = NonEmptyText::new(&self.name)
            .map_err(|_| CatalogError::InvalidInput(format!("symptom {} has an empty name", self.id)))?;
        Ok(Symptom {
            id: self.id,
            name,
            aliases: self.aliases,
            description: self.description,
            body_parts: self.body_parts,
            category: self.category,
            severity: self.severity,
        })
    }
}

impl RecoveryStageWire {
    fn into_domain(self) -> RecoveryStage {
        let name = self.name.unwrap_or_else(|| self.timeframe.clone());
        RecoveryStage {
            name,
            timeframe: self.timeframe,
            description: self.description,
            milestones: self.milestones,
            watch_out_for: self.watch_out_for,
            tasks: self.tasks.into_iter().map(RecoveryTaskWire::into_domain).collect(),
        }
    }
}

impl RecoveryTaskWire {
    fn into_domain(self) -> RecoveryTask {
        RecoveryTask {
            id: self.id,
            title: self.title,
            description: self.description,
            duration: self.duration,
            frequency: self.frequency,
            completed: self.completed,
        }
    }
}

impl DosAndDontsWire {
    fn into_domain(self) -> DosAndDonts {
        DosAndDonts {
            dos: self.dos,
            donts: self.donts,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DosAndDontsWire {
    #[serde(default)]
    pub dos: Vec<String>,
    #[serde(default)]
    pub donts: Vec<String>,
}

impl PrimaryConditionWire {
    pub fn into_domain(self) -> CatalogResult<Condition> {
        let urgency = Urgency::parse(&self.urgency).ok_or_else(|| CatalogError::UnknownUrgency {
            id: self.id.clone(),
            value: self.urgency.clone(),
        })?;
        let name = NonEmptyText::new(&self.name)
            .map_err(|_| CatalogError::InvalidInput(format!("condition {} has an empty name", self.id)))?;
        Ok(Condition {
            id: ConditionId::new(self.id),
            name,
            category: self.category,
            subtype: self.subtype,
            symptoms: self.symptoms,
            description: self.description,
            detailed_description: self.detailed_description,
            recovery_time: self.recovery_time,
            urgency,
            causes: self.causes,
            treatment_summary: self.treatment_summary,
            recovery_stages: self
                .recovery_stages
                .into_iter()
                .map(RecoveryStageWire::into_domain)
                .collect(),
            when_to_see_doctor: self.when_to_see_doctor,
            prevention_tips: self.prevention_tips,
            dos_and_donts: self.dos_and_donts.map(DosAndDontsWire::into_domain),
            source: CatalogSource::Primary,
        })
    }
}

impl LegacyConditionWire {
    pub fn into_domain(self) -> CatalogResult<Condition> {
        let id = self.id.to_string();
        // Legacy urgency strings include ranges like "Low to Medium".
        let urgency =
            Urgency::parse_lenient(&self.urgency).ok_or_else(|| CatalogError::UnknownUrgency {
                id: id.clone(),
                value: self.urgency.clone(),
            })?;
        let name = NonEmptyText::new(&self.name)
            .map_err(|_| CatalogError::InvalidInput(format!("condition {} has an empty name", id)))?;
        if !self.treatment_detailed.is_empty() {
            tracing::warn!(
                condition = %id,
                "legacy treatmentDetailed entries are not carried into the canonical model"
            );
        }
        Ok(Condition {
            id: ConditionId::new(id),
            name,
            category: self.category,
            subtype: None,
            symptoms: self.symptoms,
            description: self.description,
            detailed_description: self.detailed_description,
            recovery_time: self.recovery_time,
            urgency,
            causes: self.causes,
            // Field-rename contract: downstream consumers always see a single
            // treatment-summary field.
            treatment_summary: self.treatment_simple,
            recovery_stages: self
                .recovery_stages
                .into_iter()
                .map(RecoveryStageWire::into_domain)
                .collect(),
            when_to_see_doctor: self.when_to_see_doctor,
            prevention_tips: self.prevention_tips,
            dos_and_donts: self.dos_and_donts.map(DosAndDontsWire::into_domain),
            source: CatalogSource::Legacy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_condition_normalises_id_and_treatment_field() {
        let wire: LegacyConditionWire = serde_json::from_str(
            r#"{
                "id": 3,
                "name": "Sprain",
                "category": "Bone & Joint Injuries",
                "symptoms": ["Swelling", "Bruising"],
                "description": "Stretching or tearing of ligaments",
                "recoveryTime": "1-2 weeks",
                "urgency": "Medium",
                "treatmentSimple": "RICE and rehabilitation"
            }"#,
        )
        .unwrap();
        let condition = wire.into_domain().unwrap();
        assert_eq!(condition.id.as_str(), "3");
        assert_eq!(condition.treatment_summary, "RICE and rehabilitation");
        assert_eq!(condition.urgency, Urgency::Medium);
        assert_eq!(condition.source, CatalogSource::Legacy);
    }

    #[test]
    fn test_legacy_condition_accepts_ranged_urgency() {
        let wire: LegacyConditionWire = serde_json::from_str(
            r#"{
                "id": 9,
                "name": "Muscle Strain",
                "category": "Musculoskeletal Conditions",
                "symptoms": ["Pain"],
                "description": "An injury to a muscle",
                "recoveryTime": "2 days to 3 weeks",
                "urgency": "Low to Medium",
                "treatmentSimple": "RICE"
            }"#,
        )
        .unwrap();
        assert_eq!(wire.into_domain().unwrap().urgency, Urgency::Medium);
    }

    #[test]
    fn test_primary_condition_requires_canonical_urgency() {
        let wire: PrimaryConditionWire = serde_json::from_str(
            r#"{
                "id": "tension-headache",
                "name": "Tension Headache",
                "category": "Neurological Conditions",
                "symptoms": ["Headache"],
                "description": "A common headache",
                "recoveryTime": "Hours to days",
                "urgency": "low",
                "treatmentSummary": "Rest"
            }"#,
        )
        .unwrap();
        let err = wire.into_domain().expect_err("lowercase urgency should be rejected");
        assert!(matches!(err, CatalogError::UnknownUrgency { .. }));
    }

    #[test]
    fn test_stage_without_name_falls_back_to_timeframe() {
        let wire: RecoveryStageWire = serde_json::from_str(
            r#"{
                "timeframe": "Week 1",
                "description": "Initial rest",
                "milestones": ["Pain decreasing"]
            }"#,
        )
        .unwrap();
        let stage = wire.into_domain();
        assert_eq!(stage.name, "Week 1");
        assert!(stage.tasks.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<SymptomWire, _> = serde_json::from_str(
            r#"{ "id": "s1", "name": "Headache", "bogus": true }"#,
        );
        assert!(result.is_err());
    }
}
