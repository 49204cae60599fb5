/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A URL-safe slug derived from a display name.
///
/// Slugs are the shared link contract between the core and anything that
/// renders condition links: lowercase, with every run of whitespace collapsed
/// to a single hyphen. `Slug::new("Common Cold")` and `Slug::new("common-cold")`
/// produce the same value, so identifiers arriving from links resolve to the
/// conditions whose names generated them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Creates a new `Slug` from the given input.
    ///
    /// The input is trimmed, lowercased, and runs of whitespace are replaced
    /// with a single hyphen. Returns `Err(TextError::Empty)` if the trimmed
    /// input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        let slug = trimmed
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        Ok(Self(slug))
    }

    /// Returns the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for Slug {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Slug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Slug::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text_trims_whitespace() {
        let text = NonEmptyText::new("  Sprain  ").unwrap();
        assert_eq!(text.as_str(), "Sprain");
    }

    #[test]
    fn test_non_empty_text_rejects_empty() {
        assert!(NonEmptyText::new("").is_err());
        assert!(NonEmptyText::new("   ").is_err());
    }

    #[test]
    fn test_slug_lowercases_and_hyphenates() {
        let slug = Slug::new("Common Cold").unwrap();
        assert_eq!(slug.as_str(), "common-cold");
    }

    #[test]
    fn test_slug_collapses_whitespace_runs() {
        let slug = Slug::new("  Fracture   (Broken  Bone) ").unwrap();
        assert_eq!(slug.as_str(), "fracture-(broken-bone)");
    }

    #[test]
    fn test_slug_is_idempotent_on_slug_input() {
        let once = Slug::new("Muscle Strain").unwrap();
        let twice = Slug::new(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_slug_rejects_empty() {
        assert!(Slug::new("").is_err());
        assert!(Slug::new(" \t ").is_err());
    }
}
