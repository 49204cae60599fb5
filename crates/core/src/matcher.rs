//! Condition scoring and ranking.
//!
//! Every catalog condition is scored against the input symptom set with a
//! normalised overlap ratio, zero scores are discarded, and the remainder is
//! stable-sorted descending so equal scores keep catalog order. The overlap
//! measure is a heuristic lexical comparison, not a diagnostic algorithm.

use std::sync::Arc;

use sra_catalog::{Catalog, Condition, PersonalFactors};

/// Decides whether one condition symptom counts as matched by one input
/// symptom.
///
/// A named seam so the comparison can be swapped (token-set, edit-distance)
/// without touching the ranking or formatting contract.
pub trait MatchStrategy: Send + Sync {
    fn is_match(&self, condition_symptom: &str, input_symptom: &str) -> bool;
}

/// Case-insensitive bidirectional substring overlap.
///
/// A condition symptom matches an input symptom when either string contains
/// the other after case-folding. Intentionally permissive so minor wording
/// differences still score; short tokens ("pain") will match many longer
/// symptom strings, which is accepted behaviour.
#[derive(Clone, Copy, Debug, Default)]
pub struct BidirectionalSubstring;

impl MatchStrategy for BidirectionalSubstring {
    fn is_match(&self, condition_symptom: &str, input_symptom: &str) -> bool {
        let condition_symptom = condition_symptom.to_lowercase();
        let input_symptom = input_symptom.to_lowercase();
        condition_symptom.contains(&input_symptom) || input_symptom.contains(&condition_symptom)
    }
}

/// Extension point for annotating match results with personal-factor
/// commentary.
///
/// Annotations never change scores or ordering; they only populate
/// [`MatchResult::key_factors`].
pub trait KeyFactorAnnotator: Send + Sync {
    fn annotate(&self, condition: &Condition, factors: &PersonalFactors) -> Vec<String>;
}

/// Default annotator: no commentary. Key factors stay empty unless a caller
/// installs an annotator or fills them in downstream.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAnnotations;

impl KeyFactorAnnotator for NoAnnotations {
    fn annotate(&self, _condition: &Condition, _factors: &PersonalFactors) -> Vec<String> {
        Vec::new()
    }
}

/// Built-in annotator deriving advisory strings from personal factors.
#[derive(Clone, Copy, Debug, Default)]
pub struct PersonalFactorAnnotator;

impl KeyFactorAnnotator for PersonalFactorAnnotator {
    fn annotate(&self, condition: &Condition, factors: &PersonalFactors) -> Vec<String> {
        let mut notes = Vec::new();
        if let Some(age) = factors.age {
            if age >= 65 {
                notes.push("Age over 65 may extend recovery time".to_owned());
            } else if age <= 12 {
                notes.push("Children should be assessed by a paediatrician".to_owned());
            }
        }
        if let Some(lifestyle) = &factors.lifestyle {
            if lifestyle.smoking == Some(true) && condition.category.contains("Respiratory") {
                notes.push("Smoking can worsen respiratory symptoms and slow recovery".to_owned());
            }
        }
        if let Some(level) = factors.activity_level {
            use sra_catalog::ActivityLevel;
            let impact_prone = condition.category.contains("Musculoskeletal")
                || condition.category.contains("Bone & Joint");
            if impact_prone && matches!(level, ActivityLevel::Very | ActivityLevel::Athlete) {
                notes.push("High activity levels increase re-injury risk during recovery".to_owned());
            }
        }
        notes
    }
}

/// One ranked entry returned by the matcher.
#[derive(Clone, Debug)]
pub struct MatchResult {
    pub condition: Arc<Condition>,
    /// Normalised overlap ratio in (0, 1].
    pub match_score: f64,
    /// `round(match_score * 100)` with a `%` suffix.
    pub match_percentage: String,
    /// Personal-factor commentary; empty unless an annotator produced notes.
    pub key_factors: Vec<String>,
}

/// Scores and ranks catalog conditions against an input symptom set.
pub struct ConditionMatcher {
    catalog: Arc<Catalog>,
    strategy: Box<dyn MatchStrategy>,
    annotator: Box<dyn KeyFactorAnnotator>,
}

impl ConditionMatcher {
    /// Matcher with the default bidirectional-substring strategy and no
    /// key-factor annotations.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            strategy: Box::new(BidirectionalSubstring),
            annotator: Box::new(NoAnnotations),
        }
    }

    /// Replaces the symptom comparison strategy.
    pub fn with_strategy(mut self, strategy: impl MatchStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Installs a key-factor annotator.
    pub fn with_annotator(mut self, annotator: impl KeyFactorAnnotator + 'static) -> Self {
        self.annotator = Box::new(annotator);
        self
    }

    /// Ranks every catalog condition against the input symptoms.
    ///
    /// - Empty input returns an empty list without scanning the catalog.
    /// - `match_score = match_count / max(input_len, condition_symptom_len)`,
    ///   so neither a short input nor a long condition symptom list inflates
    ///   the score. Conditions with zero overlap are discarded; a condition
    ///   with an empty symptom list can therefore never match.
    /// - The result is stable-sorted descending by score: equal scores keep
    ///   catalog order, which makes repeated calls deterministic.
    ///
    /// Personal factors never affect scores; when present they are handed to
    /// the annotator to populate `key_factors`.
    pub fn match_symptoms(
        &self,
        symptoms: &[String],
        factors: Option<&PersonalFactors>,
    ) -> Vec<MatchResult> {
        if symptoms.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<MatchResult> = Vec::new();
        for condition in self.catalog.conditions() {
            let match_count = condition
                .symptoms
                .iter()
                .filter(|condition_symptom| {
                    symptoms
                        .iter()
                        .any(|input| self.strategy.is_match(condition_symptom, input))
                })
                .count();

            let denominator = symptoms.len().max(condition.symptoms.len());
            let match_score = match_count as f64 / denominator as f64;
            if match_score > 0.0 {
                let key_factors = match factors {
                    Some(factors) => self.annotator.annotate(condition, factors),
                    None => Vec::new(),
                };
                results.push(MatchResult {
                    condition: condition.clone(),
                    match_score,
                    match_percentage: format_percentage(match_score),
                    key_factors,
                });
            }
        }

        // Vec::sort_by is stable, preserving catalog order on ties. Scores
        // are finite, so total_cmp gives the plain descending order.
        results.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));

        tracing::debug!(
            input = symptoms.len(),
            ranked = results.len(),
            "matched symptoms against catalog"
        );
        results
    }
}

/// Formats a score in [0, 1] as a rounded integer percentage.
///
/// Uses `f64::round`, which rounds half away from zero; for the non-negative
/// scores produced here that is identical to round-half-up.
fn format_percentage(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> ConditionMatcher {
        ConditionMatcher::new(Arc::new(Catalog::embedded().unwrap()))
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input_returns_empty_without_factors_or_with() {
        let matcher = matcher();
        assert!(matcher.match_symptoms(&[], None).is_empty());
        let factors = PersonalFactors {
            age: Some(70),
            ..PersonalFactors::default()
        };
        assert!(matcher.match_symptoms(&[], Some(&factors)).is_empty());
    }

    #[test]
    fn test_injury_scenario_ranks_fracture_and_sprain_over_common_cold() {
        let matcher = matcher();
        let results = matcher.match_symptoms(&strings(&["Sharp pain", "Swelling", "Bruising"]), None);
        let names: Vec<&str> = results.iter().map(|r| r.condition.name.as_str()).collect();
        assert!(names.contains(&"Fracture (Broken Bone)"));
        assert!(names.contains(&"Sprain"));
        assert!(!names.contains(&"Common Cold"));
    }

    #[test]
    fn test_scores_are_in_unit_interval_and_percentage_agrees() {
        let matcher = matcher();
        let results = matcher.match_symptoms(&strings(&["Swelling", "Bruising"]), None);
        assert!(!results.is_empty());
        for result in &results {
            assert!(result.match_score > 0.0 && result.match_score <= 1.0);
            let expected = format!("{}%", (result.match_score * 100.0).round() as i64);
            assert_eq!(result.match_percentage, expected);
        }
    }

    #[test]
    fn test_results_sorted_descending_with_stable_ties() {
        let matcher = matcher();
        let results = matcher.match_symptoms(&strings(&["Swelling", "Bruising", "Headache"]), None);
        for pair in results.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
        // Fracture (id 1) precedes Sprain (id 3) in catalog order; both score
        // 2 matches over 6 and 5 symptoms respectively, so no tie here, but
        // equal-scoring conditions must keep catalog order.
        let catalog = Catalog::embedded().unwrap();
        let catalog_order: Vec<String> = catalog
            .conditions()
            .iter()
            .map(|c| c.id.as_str().to_owned())
            .collect();
        for pair in results.windows(2) {
            if pair[0].match_score == pair[1].match_score {
                let first = catalog_order
                    .iter()
                    .position(|id| id == pair[0].condition.id.as_str())
                    .unwrap();
                let second = catalog_order
                    .iter()
                    .position(|id| id == pair[1].condition.id.as_str())
                    .unwrap();
                assert!(first < second, "tied conditions must keep catalog order");
            }
        }
    }

    #[test]
    fn test_match_is_idempotent() {
        let matcher = matcher();
        let input = strings(&["Sharp pain", "Swelling", "Bruising"]);
        let first = matcher.match_symptoms(&input, None);
        let second = matcher.match_symptoms(&input, None);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.condition.id, b.condition.id);
            assert_eq!(a.match_score, b.match_score);
            assert_eq!(a.match_percentage, b.match_percentage);
        }
    }

    #[test]
    fn test_unrecognised_symptoms_yield_no_matches() {
        let matcher = matcher();
        assert!(matcher
            .match_symptoms(&strings(&["spontaneous levitation"]), None)
            .is_empty());
    }

    #[test]
    fn test_short_token_substring_overlap_is_permissive() {
        // "Pain" is a substring of several longer symptom strings; the
        // strategy accepts that on purpose.
        let matcher = matcher();
        let results = matcher.match_symptoms(&strings(&["Pain"]), None);
        assert!(results
            .iter()
            .any(|r| r.condition.name.as_str() == "Muscle Strain"));
    }

    #[test]
    fn test_legacy_results_carry_treatment_summary() {
        let matcher = matcher();
        let results = matcher.match_symptoms(&strings(&["Runny nose"]), None);
        let cold = results
            .iter()
            .find(|r| r.condition.name.as_str() == "Common Cold")
            .expect("common cold should match");
        assert!(cold.condition.treatment_summary.starts_with("Rest, hydration"));
    }

    #[test]
    fn test_key_factors_empty_without_annotator_or_factors() {
        let matcher = matcher();
        let factors = PersonalFactors {
            age: Some(80),
            ..PersonalFactors::default()
        };
        let with_factors = matcher.match_symptoms(&strings(&["Swelling"]), Some(&factors));
        assert!(with_factors.iter().all(|r| r.key_factors.is_empty()));
    }

    #[test]
    fn test_personal_factor_annotator_populates_key_factors() {
        let catalog = Arc::new(Catalog::embedded().unwrap());
        let matcher = ConditionMatcher::new(catalog).with_annotator(PersonalFactorAnnotator);
        let factors = PersonalFactors {
            age: Some(72),
            ..PersonalFactors::default()
        };
        let results = matcher.match_symptoms(&strings(&["Swelling"]), Some(&factors));
        assert!(!results.is_empty());
        assert!(results
            .iter()
            .all(|r| r.key_factors.contains(&"Age over 65 may extend recovery time".to_owned())));

        // absent factors must not fail and must leave key factors empty
        let without = matcher.match_symptoms(&strings(&["Swelling"]), None);
        assert!(without.iter().all(|r| r.key_factors.is_empty()));
    }

    #[test]
    fn test_custom_strategy_is_honoured() {
        struct ExactMatch;
        impl MatchStrategy for ExactMatch {
            fn is_match(&self, condition_symptom: &str, input_symptom: &str) -> bool {
                condition_symptom.eq_ignore_ascii_case(input_symptom)
            }
        }
        let catalog = Arc::new(Catalog::embedded().unwrap());
        let matcher = ConditionMatcher::new(catalog).with_strategy(ExactMatch);
        // Under exact matching, "Pain" no longer hits "Sharp, severe pain".
        let results = matcher.match_symptoms(&strings(&["Pain"]), None);
        assert!(results
            .iter()
            .all(|r| r.condition.symptoms.iter().any(|s| s.eq_ignore_ascii_case("Pain"))));
    }

    #[test]
    fn test_format_percentage_rounds_half_up() {
        // 0.125 is exact in binary, so this really exercises the .5 case
        assert_eq!(format_percentage(0.125), "13%");
        assert_eq!(format_percentage(1.0), "100%");
        assert_eq!(format_percentage(1.0 / 3.0), "33%");
        assert_eq!(format_percentage(0.4), "40%");
    }
}
