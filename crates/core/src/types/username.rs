//! Admin username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UsernameError {
    /// The input string is empty.
    #[error("username cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace.
    #[error("username cannot contain whitespace")]
    ContainsWhitespace,
}

/// An admin account username.
///
/// Lookups are exact and case-sensitive: `Admin` and `admin` are distinct
/// usernames, and no normalization is applied at parse time.
///
/// ## Constraints
///
/// - Length: 1-64 characters
/// - No whitespace characters
///
/// ## Examples
///
/// ```
/// use partfinder_core::Username;
///
/// assert!(Username::parse("admin").is_ok());
/// assert!(Username::parse("catalog-editor").is_ok());
///
/// assert!(Username::parse("").is_err());         // empty
/// assert!(Username::parse("two words").is_err()); // whitespace
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Maximum length of a username.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `Username` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 64 characters
    /// - Contains whitespace
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        if s.is_empty() {
            return Err(UsernameError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(UsernameError::ContainsWhitespace);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_usernames() {
        assert!(Username::parse("admin").is_ok());
        assert!(Username::parse("catalog-editor").is_ok());
        assert!(Username::parse("user_2").is_ok());
        assert!(Username::parse("A").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Username::parse(""), Err(UsernameError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(65);
        assert!(matches!(
            Username::parse(&long),
            Err(UsernameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_whitespace() {
        assert!(matches!(
            Username::parse("two words"),
            Err(UsernameError::ContainsWhitespace)
        ));
        assert!(matches!(
            Username::parse("tab\tbed"),
            Err(UsernameError::ContainsWhitespace)
        ));
    }

    #[test]
    fn test_case_sensitive() {
        let upper = Username::parse("Admin").unwrap();
        let lower = Username::parse("admin").unwrap();
        assert_ne!(upper, lower);
    }

    #[test]
    fn test_serde_roundtrip() {
        let username = Username::parse("admin").unwrap();
        let json = serde_json::to_string(&username).unwrap();
        assert_eq!(json, "\"admin\"");

        let parsed: Username = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, username);
    }

    #[test]
    fn test_from_str() {
        let username: Username = "admin".parse().unwrap();
        assert_eq!(username.as_str(), "admin");
    }
}
