//! # SRA Catalog
//!
//! Static reference data for the symptom and recovery assistant: conditions
//! (with attributes and recovery stages) and symptoms (with aliases).
//!
//! The crate owns:
//! - the canonical domain model ([`Condition`], [`Symptom`] and friends),
//! - strict wire models for the two catalog source shapes and their
//!   normalisation into the canonical model,
//! - load-time validation, and
//! - the immutable [`Catalog`] object that is constructed once at startup and
//!   injected into the core services.
//!
//! **No matching concerns**: scoring, ranking and plan derivation live in
//! `sra-core`.

mod catalog;
mod error;
mod model;
pub mod wire;

pub use catalog::{Catalog, LEGACY_FILE, PRIMARY_FILE};
pub use error::{CatalogError, CatalogResult};
pub use model::{
    ActivityLevel, CatalogSource, Condition, ConditionId, DosAndDonts, Lifestyle, PersonalFactors,
    RecoveryStage, RecoveryTask, Severity, Sex, Symptom, Urgency,
};
