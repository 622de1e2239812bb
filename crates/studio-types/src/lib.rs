//! Validated text types shared across the studio crates.
//!
//! Request fields arrive as free-form strings. The types here are the only way those strings
//! reach the filesystem layer, so every invariant the layer relies on is checked once, at
//! construction.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    Empty,

    /// The input would not stay a single directory entry once joined onto a path
    #[error("'{0}' is not a valid folder name")]
    NotASegment(String),
}

/// A string type that guarantees non-empty content.
///
/// Leading and trailing whitespace is trimmed during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText`, rejecting empty or whitespace-only input.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
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

/// A single directory name, safe to join onto an existing directory.
///
/// Client names and customer emails become folder names on disk. A `FolderName` can never
/// contain a separator, a NUL byte, or be one of the relative components `.` and `..`, so
/// `dir.join(name)` always yields a direct child of `dir`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderName(NonEmptyText);

impl FolderName {
    /// Creates a new `FolderName`.
    ///
    /// Surrounding whitespace is trimmed first, so `" Acme "` names the folder `Acme`.
    ///
    /// # Arguments
    ///
    /// * `input` - The client name or email to use as a folder name.
    ///
    /// # Returns
    ///
    /// Returns `Ok(FolderName)` if the trimmed input is a single, plain path segment.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input, or `TextError::NotASegment` if the input is
    /// `.`, `..`, or contains `/`, `\` or a NUL byte.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let text = NonEmptyText::new(input)?;
        let s = text.as_str();

        if s == "." || s == ".." || s.contains(['/', '\\', '\0']) {
            return Err(TextError::NotASegment(s.to_owned()));
        }

        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for FolderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for FolderName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<std::path::Path> for FolderName {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(self.0.as_str())
    }
}

impl serde::Serialize for FolderName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Acme  ").unwrap();
        assert_eq!(text.as_str(), "Acme");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert_eq!(NonEmptyText::new(""), Err(TextError::Empty));
        assert_eq!(NonEmptyText::new(" \t\n"), Err(TextError::Empty));
    }

    #[test]
    fn non_empty_text_deserialize_rejects_empty() {
        let result: Result<NonEmptyText, _> = serde_json::from_str("\"   \"");
        assert!(result.is_err());
    }

    #[test]
    fn folder_name_accepts_plain_names_and_emails() {
        assert_eq!(FolderName::new("Acme").unwrap().as_str(), "Acme");
        assert_eq!(FolderName::new("a@b.com").unwrap().as_str(), "a@b.com");
        assert_eq!(
            FolderName::new("Famille Dupont").unwrap().as_str(),
            "Famille Dupont"
        );
    }

    #[test]
    fn folder_name_rejects_traversal_and_separators() {
        for bad in ["..", ".", "a/b", "a\\b", "../etc", "nul\0byte"] {
            assert!(
                matches!(FolderName::new(bad), Err(TextError::NotASegment(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn folder_name_trims_surrounding_whitespace() {
        assert_eq!(FolderName::new(" Acme ").unwrap().as_str(), "Acme");
    }

    #[test]
    fn folder_name_rejects_empty() {
        assert_eq!(FolderName::new("   "), Err(TextError::Empty));
    }

    #[test]
    fn folder_name_joins_as_direct_child() {
        let dir = std::path::Path::new("/srv/media/2024-01-01");
        let name = FolderName::new("Acme").unwrap();
        let joined = dir.join(&name);
        assert_eq!(joined.parent(), Some(dir));
    }
}
