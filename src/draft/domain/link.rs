//! Validated related-link values.

use super::DraftDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// An absolute `http` or `https` link attached to a task form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Link(String);

impl Link {
    /// Validates raw link input.
    ///
    /// Input is trimmed before validation and stored as typed.
    ///
    /// # Errors
    ///
    /// Returns [`DraftDomainError::EmptyLink`] for blank input and
    /// [`DraftDomainError::InvalidLink`] when the input is not an absolute
    /// `http`/`https` URL.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use taskdesk::draft::domain::Link;
    ///
    /// let link = Link::parse("  https://example.com/brief  ").unwrap();
    /// assert_eq!(link.as_str(), "https://example.com/brief");
    /// assert!(Link::parse("example.com").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, DraftDomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DraftDomainError::EmptyLink);
        }
        let invalid = || DraftDomainError::InvalidLink {
            value: trimmed.to_owned(),
        };
        let url = Url::parse(trimmed).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(invalid());
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the link text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Link {
    type Error = DraftDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Link> for String {
    fn from(value: Link) -> Self {
        value.0
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
