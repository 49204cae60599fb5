//! Canonical domain model for catalog entities.
//!
//! Both catalog source shapes (the richly annotated primary set and the
//! simpler legacy set) normalise into the types defined here before any
//! matching or plan derivation runs. Catalog entities are constructed once at
//! load time and never mutated afterwards.

use serde::{Deserialize, Serialize};
use sra_types::{NonEmptyText, Slug};

/// Stable identifier of a condition record.
///
/// Primary records carry authored string ids; legacy records carry numeric
/// ids which are stringified during normalisation so the rest of the system
/// deals with a single id representation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionId(String);

impl ConditionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConditionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which catalog source a normalised condition came from.
///
/// Lookup gives primary records precedence when both sources resolve the
/// same identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Primary,
    Legacy,
}

/// Urgency of seeking care for a condition.
///
/// Ordered from least to most urgent; the ordering is what display layers key
/// severity coding off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    Medium,
    High,
    Emergency,
}

impl Urgency {
    /// Parse the exact canonical form used by the primary catalog source.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(Urgency::Low),
            "Medium" => Some(Urgency::Medium),
            "High" => Some(Urgency::High),
            "Emergency" => Some(Urgency::Emergency),
            _ => None,
        }
    }

    /// Parse the looser strings found in legacy catalog data.
    ///
    /// Legacy records contain ranges such as "Low to Medium"; the highest
    /// level named anywhere in the string wins. Returns `None` when the
    /// string names no level at all.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if lower.contains("emergency") {
            Some(Urgency::Emergency)
        } else if lower.contains("high") {
            Some(Urgency::High)
        } else if lower.contains("medium") {
            Some(Urgency::Medium)
        } else if lower.contains("low") {
            Some(Urgency::Low)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
            Urgency::Emergency => "Emergency",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subjective severity of a symptom as authored in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

/// A catalogued symptom with the alternative phrasings users reach for.
///
/// `name` is the canonical form; `aliases` never duplicate another symptom's
/// canonical name (enforced at load time).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Symptom {
    pub id: String,
    pub name: NonEmptyText,
    pub aliases: Vec<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub body_parts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

/// One phase of a recovery progression.
///
/// Stage order is the clinically intended progression (earliest first) and is
/// preserved exactly as authored.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryStage {
    pub name: String,
    pub timeframe: String,
    pub description: String,
    pub milestones: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub watch_out_for: Vec<String>,
    pub tasks: Vec<RecoveryTask>,
}

/// A concrete task within a recovery stage.
///
/// Task ids are stable: authored tasks keep their authored ids, synthesized
/// tasks derive theirs deterministically from condition id, stage identifier
/// and task index.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub frequency: String,
    pub completed: bool,
}

/// Authored do/don't guidance for a condition.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DosAndDonts {
    pub dos: Vec<String>,
    pub donts: Vec<String>,
}

/// A catalogued health condition in canonical form.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub id: ConditionId,
    pub name: NonEmptyText,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Symptom phrasings this condition is matched against. Free text; not
    /// required to be canonical symptom names.
    pub symptoms: Vec<String>,
    pub description: String,
    pub detailed_description: String,
    pub recovery_time: String,
    pub urgency: Urgency,
    pub causes: Vec<String>,
    /// Single treatment-summary field regardless of which source shape the
    /// record came from (legacy `treatmentSimple` is renamed here).
    pub treatment_summary: String,
    pub recovery_stages: Vec<RecoveryStage>,
    pub when_to_see_doctor: String,
    pub prevention_tips: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dos_and_donts: Option<DosAndDonts>,
    pub source: CatalogSource,
}

impl Condition {
    /// The name-derived slug used in links to this condition.
    pub fn slug(&self) -> Slug {
        // name is non-empty by construction, so the slug always exists
        Slug::new(self.name.as_str()).expect("non-empty name produces a slug")
    }
}

/// Biological sex as reported by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

/// Self-reported activity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Very,
    Athlete,
}

/// Lifestyle flags supplied alongside personal factors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifestyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcohol: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<bool>,
}

/// Optional personal context supplied by the caller with a match request.
///
/// Personal factors never change match scores; they only feed key-factor
/// annotations on the results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalFactors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_existing_conditions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<Lifestyle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_parse_canonical_levels() {
        assert_eq!(Urgency::parse("Low"), Some(Urgency::Low));
        assert_eq!(Urgency::parse("Emergency"), Some(Urgency::Emergency));
        assert_eq!(Urgency::parse("low"), None);
        assert_eq!(Urgency::parse("Critical"), None);
    }

    #[test]
    fn test_urgency_parse_lenient_takes_highest_named_level() {
        assert_eq!(Urgency::parse_lenient("Low to Medium"), Some(Urgency::Medium));
        assert_eq!(Urgency::parse_lenient("medium, sometimes HIGH"), Some(Urgency::High));
        assert_eq!(Urgency::parse_lenient("Low"), Some(Urgency::Low));
        assert_eq!(Urgency::parse_lenient("unknown"), None);
    }

    #[test]
    fn test_urgency_ordering() {
        assert!(Urgency::Low < Urgency::Medium);
        assert!(Urgency::High < Urgency::Emergency);
    }

    #[test]
    fn test_personal_factors_deserialize_camel_case() {
        let factors: PersonalFactors = serde_json::from_str(
            r#"{
                "age": 62,
                "sex": "female",
                "activityLevel": "light",
                "preExistingConditions": ["osteoporosis"],
                "lifestyle": { "smoking": true }
            }"#,
        )
        .unwrap();
        assert_eq!(factors.age, Some(62));
        assert_eq!(factors.sex, Some(Sex::Female));
        assert_eq!(factors.activity_level, Some(ActivityLevel::Light));
        assert_eq!(factors.pre_existing_conditions, vec!["osteoporosis"]);
        assert_eq!(factors.lifestyle.unwrap().smoking, Some(true));
    }

    #[test]
    fn test_personal_factors_all_fields_optional() {
        let factors: PersonalFactors = serde_json::from_str("{}").unwrap();
        assert_eq!(factors, PersonalFactors::default());
    }
}
