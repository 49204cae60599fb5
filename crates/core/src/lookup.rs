//! Condition lookup across catalog sources.
//!
//! Identifiers arrive as authored ids, stringified numeric ids, or
//! name-derived slugs (links use the slug form). Resolution checks each rule
//! per record while scanning the primary source in authored order, then the
//! legacy source, so the primary record wins whenever both sources define the
//! same identifier.

use std::sync::Arc;

use sra_catalog::{Catalog, Condition};
use sra_types::Slug;

/// A condition identifier as supplied by a caller.
///
/// String and numeric forms are accepted; numeric ids are compared through
/// their string form, which is how legacy ids are stored after
/// normalisation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConditionKey {
    Text(String),
    Number(i64),
}

impl ConditionKey {
    /// The identifier's string form used for id comparison.
    pub fn as_text(&self) -> String {
        match self {
            ConditionKey::Text(text) => text.clone(),
            ConditionKey::Number(number) => number.to_string(),
        }
    }
}

impl From<&str> for ConditionKey {
    fn from(value: &str) -> Self {
        ConditionKey::Text(value.to_owned())
    }
}

impl From<String> for ConditionKey {
    fn from(value: String) -> Self {
        ConditionKey::Text(value)
    }
}

impl From<i64> for ConditionKey {
    fn from(value: i64) -> Self {
        ConditionKey::Number(value)
    }
}

/// Resolves a condition by id or name slug across both catalog sources.
///
/// The primary source is searched first; within a source, the first record
/// matching any rule wins. Returns `None` when no source resolves the
/// identifier; never errors.
pub fn find_condition<'a>(catalog: &'a Catalog, key: &ConditionKey) -> Option<&'a Arc<Condition>> {
    find_in_source(catalog.primary(), key).or_else(|| find_in_source(catalog.legacy(), key))
}

fn find_in_source<'a>(
    conditions: &'a [Arc<Condition>],
    key: &ConditionKey,
) -> Option<&'a Arc<Condition>> {
    let text = key.as_text();
    // The identifier's slug form: "Common Cold" and "common-cold" both
    // resolve to the condition of that name (shared link contract).
    let slug = Slug::new(&text).ok();

    conditions.iter().find(|condition| {
        condition.id.as_str() == text
            || slug
                .as_ref()
                .is_some_and(|slug| condition.slug() == *slug)
    })
}
