//! Symptom alias resolution.
//!
//! Users describe symptoms in their own words; the catalog knows each symptom
//! under one canonical name plus a set of aliases. The resolver maps a raw
//! token to every canonical name it could refer to. Unrecognised tokens are
//! not rejected: callers pass them through verbatim so the matcher can still
//! score them at the substring level.

use std::collections::HashSet;
use std::sync::Arc;

use sra_catalog::Catalog;

/// Expands raw symptom strings into canonical symptom names.
///
/// Pure function of the catalog plus input; no state beyond the shared
/// catalog handle.
#[derive(Clone)]
pub struct SymptomResolver {
    catalog: Arc<Catalog>,
}

impl SymptomResolver {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Every canonical symptom name the token matches.
    ///
    /// A token matches a symptom when it equals the canonical name or any of
    /// its aliases, case-insensitively and ignoring surrounding whitespace.
    /// Returns an empty vector for an unrecognised token.
    pub fn resolve(&self, token: &str) -> Vec<&str> {
        let needle = token.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.catalog
            .symptoms()
            .iter()
            .filter(|symptom| {
                symptom.name.as_str().to_lowercase() == needle
                    || symptom.aliases.iter().any(|alias| alias.to_lowercase() == needle)
            })
            .map(|symptom| symptom.name.as_str())
            .collect()
    }

    /// Maps a raw token list to the resolved list handed to the matcher.
    ///
    /// Each token is replaced by its canonical resolutions, or kept verbatim
    /// when unrecognised. The output is de-duplicated case-insensitively in
    /// first-seen order so two aliases of one symptom don't count twice.
    pub fn expand_all(&self, tokens: &[String]) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut expanded = Vec::new();
        let mut push_unique = |value: String, expanded: &mut Vec<String>| {
            if seen.insert(value.to_lowercase()) {
                expanded.push(value);
            }
        };

        for token in tokens {
            let resolved = self.resolve(token);
            if resolved.is_empty() {
                push_unique(token.clone(), &mut expanded);
            } else {
                for name in resolved {
                    push_unique(name.to_owned(), &mut expanded);
                }
            }
        }
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> SymptomResolver {
        SymptomResolver::new(Arc::new(Catalog::embedded().unwrap()))
    }

    #[test]
    fn test_resolve_canonical_name_case_insensitive() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("headache"), vec!["Headache"]);
        assert_eq!(resolver.resolve("  HEADACHE "), vec!["Headache"]);
    }

    #[test]
    fn test_resolve_alias_to_canonical_name() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("head pain"), vec!["Headache"]);
        assert_eq!(resolver.resolve("Rhinorrhea"), vec!["Runny nose"]);
    }

    #[test]
    fn test_resolve_unknown_token_is_empty() {
        let resolver = resolver();
        assert!(resolver.resolve("glowing aura").is_empty());
        assert!(resolver.resolve("").is_empty());
    }

    #[test]
    fn test_expand_all_passes_unknown_tokens_through_verbatim() {
        let resolver = resolver();
        let expanded = resolver.expand_all(&["head pain".into(), "Bruising".into()]);
        assert_eq!(expanded, vec!["Headache".to_string(), "Bruising".to_string()]);
    }

    #[test]
    fn test_expand_all_deduplicates_aliases_of_one_symptom() {
        let resolver = resolver();
        let expanded = resolver.expand_all(&[
            "head pain".into(),
            "Pounding head".into(),
            "Headache".into(),
        ]);
        assert_eq!(expanded, vec!["Headache".to_string()]);
    }
}
