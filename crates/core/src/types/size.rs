//! Product size labels.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Size`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeError {
    /// The input is empty or only whitespace.
    #[error("size cannot be empty")]
    Empty,
    /// The input is too long to be a size label.
    #[error("size must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A size label offered by a product (`"42"`, `"M"`, `"One Size"`).
///
/// Labels are trimmed on parse; comparison is exact after trimming.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Size(String);

impl Size {
    /// Maximum length of a size label.
    pub const MAX_LENGTH: usize = 16;

    /// Parse a `Size` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than
    /// [`Size::MAX_LENGTH`].
    pub fn parse(s: &str) -> Result<Self, SizeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SizeError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(SizeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the size label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Size {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Size {
    type Error = SizeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Size> for String {
    fn from(size: Size) -> Self {
        size.0
    }
}

impl AsRef<str> for Size {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
