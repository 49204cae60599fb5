//! # SRA Core
//!
//! The matching and recovery-plan engine for the symptom assistant:
//! - symptom alias resolution ([`SymptomResolver`])
//! - condition scoring and ranking ([`ConditionMatcher`])
//! - recovery plan derivation ([`RecoveryPlanner`])
//! - condition lookup by id or slug ([`lookup::find_condition`])
//! - the [`TriageService`] facade composing all of the above over one
//!   injected, immutable [`sra_catalog::Catalog`]
//!
//! Every operation is a total, side-effect-free function of catalog plus
//! input: unknown identifiers come back as `None`, empty or unmatchable
//! input comes back as an empty list, and nothing here errors or panics on
//! well-typed input. Catalog loading and validation happen in `sra-catalog`
//! before this crate is ever involved.
//!
//! **No presentation concerns**: HTTP, serialisation shapes and terminal
//! output belong to the surface crates.

pub mod lookup;
pub mod matcher;
pub mod planner;
pub mod resolver;
mod service;

pub use lookup::{find_condition, ConditionKey};
pub use matcher::{
    BidirectionalSubstring, ConditionMatcher, KeyFactorAnnotator, MatchResult, MatchStrategy,
    NoAnnotations, PersonalFactorAnnotator,
};
pub use planner::{RecoveryPlan, RecoveryPlanner};
pub use resolver::SymptomResolver;
pub use service::TriageService;
