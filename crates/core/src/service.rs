//! Service facade over the matching and planning components.

use std::sync::Arc;

use sra_catalog::{Catalog, Condition, PersonalFactors, RecoveryTask};

use crate::lookup::{find_condition, ConditionKey};
use crate::matcher::{ConditionMatcher, KeyFactorAnnotator, MatchResult, MatchStrategy};
use crate::planner::{RecoveryPlan, RecoveryPlanner};
use crate::resolver::SymptomResolver;

/// Symptom triage operations over one immutable catalog.
///
/// Constructed once with the loaded catalog and shared freely: every
/// operation is a read-only, bounded-time computation, so arbitrary
/// concurrent callers can use one instance without coordination.
#[derive(Clone)]
pub struct TriageService {
    catalog: Arc<Catalog>,
    resolver: SymptomResolver,
    matcher: Arc<ConditionMatcher>,
    planner: RecoveryPlanner,
}

impl TriageService {
    /// Service with the default matching strategy and no key-factor
    /// annotations.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let matcher = ConditionMatcher::new(catalog.clone());
        Self::with_matcher(catalog, matcher)
    }

    /// Service with a customised matcher (strategy or annotator overridden).
    pub fn with_matcher(catalog: Arc<Catalog>, matcher: ConditionMatcher) -> Self {
        Self {
            resolver: SymptomResolver::new(catalog.clone()),
            planner: RecoveryPlanner::new(catalog.clone()),
            matcher: Arc::new(matcher),
            catalog,
        }
    }

    /// Convenience constructor installing an annotator on the default
    /// matcher.
    pub fn with_annotator(
        catalog: Arc<Catalog>,
        annotator: impl KeyFactorAnnotator + 'static,
    ) -> Self {
        let matcher = ConditionMatcher::new(catalog.clone()).with_annotator(annotator);
        Self::with_matcher(catalog, matcher)
    }

    /// Convenience constructor overriding the matching strategy on the
    /// default matcher.
    pub fn with_strategy(catalog: Arc<Catalog>, strategy: impl MatchStrategy + 'static) -> Self {
        let matcher = ConditionMatcher::new(catalog.clone()).with_strategy(strategy);
        Self::with_matcher(catalog, matcher)
    }

    /// Ranks conditions against raw user symptom input.
    ///
    /// Input tokens are first expanded through the alias tables (unrecognised
    /// tokens pass through verbatim), then scored and ranked.
    pub fn match_symptoms(
        &self,
        symptoms: &[String],
        factors: Option<&PersonalFactors>,
    ) -> Vec<MatchResult> {
        let expanded = self.resolver.expand_all(symptoms);
        self.matcher.match_symptoms(&expanded, factors)
    }

    /// Ranks conditions against the symptom list exactly as given, skipping
    /// alias expansion.
    pub fn match_symptoms_raw(
        &self,
        symptoms: &[String],
        factors: Option<&PersonalFactors>,
    ) -> Vec<MatchResult> {
        self.matcher.match_symptoms(symptoms, factors)
    }

    /// Resolves a condition by id, stringified numeric id, or name slug.
    pub fn find_condition(&self, key: impl Into<ConditionKey>) -> Option<Arc<Condition>> {
        find_condition(&self.catalog, &key.into()).cloned()
    }

    /// Builds the staged recovery plan for a condition, or `None` when the
    /// identifier is unknown.
    pub fn recovery_plan(&self, key: impl Into<ConditionKey>) -> Option<RecoveryPlan> {
        self.planner.build_plan(&key.into())
    }

    /// Generic recovery tasks for a condition with no stage data; empty when
    /// the identifier is unknown.
    pub fn default_tasks(
        &self,
        key: impl Into<ConditionKey>,
        stage_number: u32,
    ) -> Vec<RecoveryTask> {
        self.planner.default_tasks(&key.into(), stage_number)
    }

    /// The alias resolver, for callers that want expansion without matching.
    pub fn resolver(&self) -> &SymptomResolver {
        &self.resolver
    }

    /// The underlying catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
