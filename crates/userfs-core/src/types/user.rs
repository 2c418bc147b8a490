//! Validated user identifier.
//!
//! The key is used verbatim as the name of the user's root directory, so it
//! is restricted to a conservative character set before it ever reaches the
//! filesystem.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FileSystemError;

/// Maximum length of a user key in characters.
pub const MAX_USER_KEY_LENGTH: usize = 128;

/// Identifier of the user owning a file system root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserKey(String);

impl UserKey {
    /// Validate and wrap a user key.
    pub fn new(value: impl Into<String>) -> Result<Self, FileSystemError> {
        let value = value.into();

        if value.is_empty() || value == "." || value == ".." {
            return Err(FileSystemError::invalid_path("Invalid user key"));
        }
        if value.chars().count() > MAX_USER_KEY_LENGTH {
            return Err(FileSystemError::invalid_path("User key is too long"));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '@' | '-'))
        {
            return Err(FileSystemError::invalid_path(
                "User key contains invalid characters",
            ));
        }

        Ok(Self(value))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserKey {
    type Err = FileSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UserKey {
    type Error = FileSystemError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserKey> for String {
    fn from(key: UserKey) -> String {
        key.0
    }
}

impl AsRef<str> for UserKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileSystemMessageCode;

    #[test]
    fn test_accepts_numeric_and_email_keys() {
        assert_eq!(UserKey::new("42").unwrap().as_str(), "42");
        assert!(UserKey::new("jane.doe@example.com").is_ok());
        assert!(UserKey::new("4f1c-a9_b").is_ok());
    }

    #[test]
    fn test_rejects_traversal_and_separators() {
        for bad in ["", ".", "..", "a/b", "a\\b", "a b", "ü"] {
            let err = UserKey::new(bad).unwrap_err();
            assert_eq!(err.code, FileSystemMessageCode::InvalidPath, "{bad:?}");
        }
    }

    #[test]
    fn test_rejects_long_keys() {
        assert!(UserKey::new("a".repeat(MAX_USER_KEY_LENGTH)).is_ok());
        assert!(UserKey::new("a".repeat(MAX_USER_KEY_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_serde_validates() {
        let key: UserKey = serde_json::from_str("\"17\"").unwrap();
        assert_eq!(key.to_string(), "17");
        assert!(serde_json::from_str::<UserKey>("\"../etc\"").is_err());
    }
}
