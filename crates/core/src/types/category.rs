//! Product categories and sizes.
//!
//! A reel listing is addressed by a (category, size) pair. The backend paths
//! use upper-case segments, so both types normalize to upper case.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    Men,
    Women,
    Kids,
}

/// Error parsing a [`Category`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct CategoryError(pub String);

impl Category {
    /// The upper-case form used in backend paths.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Men => "MEN",
            Self::Women => "WOMEN",
            Self::Kids => "KIDS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MEN" => Ok(Self::Men),
            "WOMEN" => Ok(Self::Women),
            "KIDS" => Ok(Self::Kids),
            other => Err(CategoryError(other.to_owned())),
        }
    }
}

/// A size label such as "M" or "XL".
///
/// Sizes are opaque to this tier; the only normalization is upper-casing, so
/// `/reels/men/m` and `/reels/MEN/M` address the same listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Size(String);

/// Error parsing a [`Size`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum SizeError {
    /// The input string is empty.
    #[error("size cannot be empty")]
    Empty,
    /// The input contains characters other than ASCII letters and digits.
    #[error("size must be alphanumeric")]
    NotAlphanumeric,
}

impl Size {
    /// Parse and normalize a size label.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or not alphanumeric.
    pub fn parse(s: &str) -> Result<Self, SizeError> {
        if s.is_empty() {
            return Err(SizeError::Empty);
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SizeError::NotAlphanumeric);
        }
        Ok(Self(s.to_ascii_uppercase()))
    }

    /// The upper-case label.
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

impl FromStr for Size {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
