//! The immutable, explicitly constructed catalog.
//!
//! The catalog is built once at startup from two read-only sources (a primary
//! richly-annotated collection and a secondary legacy collection), validated,
//! normalised, and then shared read-only for the process lifetime. No code
//! path mutates it after construction, so concurrent readers need no
//! coordination.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::error::{CatalogError, CatalogResult};
use crate::model::{Condition, Symptom};
use crate::wire::{LegacyCatalogWire, PrimaryCatalogWire};

/// File name of the primary catalog document inside a catalog directory.
pub const PRIMARY_FILE: &str = "comprehensive.json";
/// File name of the legacy catalog document inside a catalog directory.
pub const LEGACY_FILE: &str = "conditions.json";

const EMBEDDED_PRIMARY: &str = include_str!("../data/comprehensive.json");
const EMBEDDED_LEGACY: &str = include_str!("../data/conditions.json");

/// The static reference data every core operation reads from.
///
/// Conditions are held behind `Arc` so match results can reference them
/// without cloning record bodies per query.
#[derive(Debug)]
pub struct Catalog {
    symptoms: Vec<Symptom>,
    primary: Vec<Arc<Condition>>,
    legacy: Vec<Arc<Condition>>,
    /// Primary records followed by legacy records that no primary record
    /// shadows (same id or same name slug). This is the scan order for
    /// matching, which makes ranking ties deterministic.
    merged: Vec<Arc<Condition>>,
}

impl Catalog {
    /// Build a catalog from already-parsed wire documents.
    ///
    /// Validates both sources (unique ids and names, alias integrity,
    /// recognised urgency levels) and normalises every record into the
    /// canonical [`Condition`] shape.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] describing the first offending record when
    /// validation fails. Load-time validation is the only place the catalog
    /// can fail; after construction every read is total.
    pub fn from_wire(
        primary: PrimaryCatalogWire,
        legacy: LegacyCatalogWire,
    ) -> CatalogResult<Self> {
        let symptoms = primary
            .symptoms
            .into_iter()
            .map(|w| w.into_domain())
            .collect::<CatalogResult<Vec<_>>>()?;
        validate_symptoms(&symptoms)?;

        let primary_conditions = primary
            .conditions
            .into_iter()
            .map(|w| w.into_domain().map(Arc::new))
            .collect::<CatalogResult<Vec<_>>>()?;
        validate_conditions("primary", &primary_conditions)?;

        let legacy_conditions = legacy
            .into_iter()
            .map(|w| w.into_domain().map(Arc::new))
            .collect::<CatalogResult<Vec<_>>>()?;
        validate_conditions("legacy", &legacy_conditions)?;

        let merged = merge_sources(&primary_conditions, &legacy_conditions);

        tracing::debug!(
            symptoms = symptoms.len(),
            primary = primary_conditions.len(),
            legacy = legacy_conditions.len(),
            merged = merged.len(),
            "catalog loaded"
        );

        Ok(Self {
            symptoms,
            primary: primary_conditions,
            legacy: legacy_conditions,
            merged,
        })
    }

    /// Parse and build a catalog from the two JSON documents.
    pub fn from_json(primary_json: &str, legacy_json: &str) -> CatalogResult<Self> {
        let primary: PrimaryCatalogWire =
            serde_json::from_str(primary_json).map_err(CatalogError::Parse)?;
        let legacy: LegacyCatalogWire =
            serde_json::from_str(legacy_json).map_err(CatalogError::Parse)?;
        Self::from_wire(primary, legacy)
    }

    /// Load a catalog from a directory containing [`PRIMARY_FILE`] and
    /// [`LEGACY_FILE`].
    ///
    /// Used for the startup override; missing files are an error rather than
    /// a silent fallback so a misconfigured deployment is caught immediately.
    pub fn from_dir(dir: &Path) -> CatalogResult<Self> {
        let primary_json =
            std::fs::read_to_string(dir.join(PRIMARY_FILE)).map_err(CatalogError::FileRead)?;
        let legacy_json =
            std::fs::read_to_string(dir.join(LEGACY_FILE)).map_err(CatalogError::FileRead)?;
        Self::from_json(&primary_json, &legacy_json)
    }

    /// Build the catalog from the data sets compiled into this crate.
    pub fn embedded() -> CatalogResult<Self> {
        Self::from_json(EMBEDDED_PRIMARY, EMBEDDED_LEGACY)
    }

    /// All conditions in scan order: primary records first, then legacy
    /// records not shadowed by a primary record.
    pub fn conditions(&self) -> &[Arc<Condition>] {
        &self.merged
    }

    /// Primary-source conditions in authored order.
    pub fn primary(&self) -> &[Arc<Condition>] {
        &self.primary
    }

    /// Legacy-source conditions in authored order.
    pub fn legacy(&self) -> &[Arc<Condition>] {
        &self.legacy
    }

    /// Canonical symptoms with their aliases.
    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }
}

fn validate_symptoms(symptoms: &[Symptom]) -> CatalogResult<()> {
    let mut names = HashSet::new();
    for symptom in symptoms {
        if !names.insert(symptom.name.as_str().to_lowercase()) {
            return Err(CatalogError::DuplicateSymptomName {
                name: symptom.name.as_str().to_owned(),
            });
        }
    }
    for symptom in symptoms {
        for alias in &symptom.aliases {
            let alias_lower = alias.to_lowercase();
            let shadows_other = symptoms.iter().any(|other| {
                other.id != symptom.id && other.name.as_str().to_lowercase() == alias_lower
            });
            if shadows_other {
                return Err(CatalogError::AliasShadowsSymptom {
                    symptom: symptom.name.as_str().to_owned(),
                    alias: alias.clone(),
                });
            }
        }
    }
    Ok(())
}

fn validate_conditions(source: &'static str, conditions: &[Arc<Condition>]) -> CatalogResult<()> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for condition in conditions {
        if !ids.insert(condition.id.as_str().to_owned()) {
            return Err(CatalogError::DuplicateConditionId {
                origin: source,
                id: condition.id.as_str().to_owned(),
            });
        }
        if !names.insert(condition.name.as_str().to_lowercase()) {
            return Err(CatalogError::DuplicateConditionName {
                origin: source,
                name: condition.name.as_str().to_owned(),
            });
        }
    }
    Ok(())
}

fn merge_sources(
    primary: &[Arc<Condition>],
    legacy: &[Arc<Condition>],
) -> Vec<Arc<Condition>> {
    let primary_ids: HashSet<&str> = primary.iter().map(|c| c.id.as_str()).collect();
    let primary_slugs: HashSet<String> =
        primary.iter().map(|c| c.slug().as_str().to_owned()).collect();

    let mut merged: Vec<Arc<Condition>> = primary.to_vec();
    for condition in legacy {
        let shadowed = primary_ids.contains(condition.id.as_str())
            || primary_slugs.contains(condition.slug().as_str());
        if shadowed {
            tracing::warn!(
                id = %condition.id,
                name = %condition.name,
                "legacy condition shadowed by a primary record"
            );
            continue;
        }
        merged.push(condition.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CatalogSource, Urgency};

    fn primary_json(conditions: &str) -> String {
        format!(r#"{{ "symptoms": [], "conditions": [{}] }}"#, conditions)
    }

    const MINIMAL_PRIMARY: &str = r#"{
        "id": "tension-headache",
        "name": "Tension Headache",
        "category": "Neurological Conditions",
        "symptoms": ["Headache"],
        "description": "A common headache",
        "recoveryTime": "Hours to days",
        "urgency": "Low",
        "treatmentSummary": "Rest and hydration"
    }"#;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert!(!catalog.symptoms().is_empty());
        assert!(catalog.primary().len() >= 2);
        assert_eq!(catalog.legacy().len(), 6);
        assert_eq!(
            catalog.conditions().len(),
            catalog.primary().len() + catalog.legacy().len()
        );
    }

    #[test]
    fn test_embedded_catalog_normalises_ranged_urgency() {
        let catalog = Catalog::embedded().unwrap();
        let strain = catalog
            .legacy()
            .iter()
            .find(|c| c.name.as_str() == "Muscle Strain")
            .unwrap();
        assert_eq!(strain.urgency, Urgency::Medium);
    }

    #[test]
    fn test_duplicate_condition_id_rejected() {
        let two = format!("{},{}", MINIMAL_PRIMARY, MINIMAL_PRIMARY.replace("Tension Headache", "Other Name"));
        let err = Catalog::from_json(&primary_json(&two), "[]").expect_err("duplicate id");
        assert!(matches!(err, CatalogError::DuplicateConditionId { .. }));
    }

    #[test]
    fn test_duplicate_condition_name_rejected() {
        let two = format!("{},{}", MINIMAL_PRIMARY, MINIMAL_PRIMARY.replace("tension-headache", "other-id"));
        let err = Catalog::from_json(&primary_json(&two), "[]").expect_err("duplicate name");
        assert!(matches!(err, CatalogError::DuplicateConditionName { .. }));
    }

    #[test]
    fn test_alias_shadowing_canonical_name_rejected() {
        let json = r#"{
            "symptoms": [
                { "id": "headache", "name": "Headache", "aliases": ["Head pain"], "description": "" },
                { "id": "head-pain", "name": "Head pain", "aliases": [], "description": "" }
            ],
            "conditions": []
        }"#;
        let err = Catalog::from_json(json, "[]").expect_err("alias shadows canonical name");
        assert!(matches!(err, CatalogError::AliasShadowsSymptom { .. }));
    }

    #[test]
    fn test_legacy_shadowed_by_primary_slug_is_excluded_from_scan_order() {
        let primary = primary_json(
            r#"{
                "id": "sprain-rich",
                "name": "Sprain",
                "category": "Bone & Joint Injuries",
                "symptoms": ["Swelling"],
                "description": "Rich sprain record",
                "recoveryTime": "1-2 weeks",
                "urgency": "Medium",
                "treatmentSummary": "RICE"
            }"#,
        );
        let legacy = r#"[{
            "id": 3,
            "name": "Sprain",
            "category": "Bone & Joint Injuries",
            "symptoms": ["Swelling", "Bruising"],
            "description": "Legacy sprain record",
            "recoveryTime": "1-2 weeks",
            "urgency": "Medium",
            "treatmentSimple": "RICE"
        }]"#;
        let catalog = Catalog::from_json(&primary, legacy).unwrap();
        assert_eq!(catalog.conditions().len(), 1);
        assert_eq!(catalog.conditions()[0].source, CatalogSource::Primary);
        // both sources remain individually addressable
        assert_eq!(catalog.legacy().len(), 1);
    }

    #[test]
    fn test_from_dir_reads_both_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PRIMARY_FILE), primary_json(MINIMAL_PRIMARY)).unwrap();
        std::fs::write(dir.path().join(LEGACY_FILE), "[]").unwrap();
        let catalog = Catalog::from_dir(dir.path()).unwrap();
        assert_eq!(catalog.primary().len(), 1);
        assert!(catalog.legacy().is_empty());
    }

    #[test]
    fn test_from_dir_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::from_dir(dir.path()).expect_err("missing files");
        assert!(matches!(err, CatalogError::FileRead(_)));
    }
}
