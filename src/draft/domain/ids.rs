//! Identifier types for the draft domain.

use super::DraftDomainError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned draft identifier.
///
/// The drafts service answers with either numeric or string identifiers
/// (under `id` or `_id`); both are normalised to their string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DraftId(String);

impl DraftId {
    /// Creates a validated draft identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DraftDomainError::EmptyDraftId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, DraftDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DraftDomainError::EmptyDraftId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for DraftId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for DraftId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDraftId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for DraftId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawDraftId::deserialize(deserializer)? {
            RawDraftId::Number(value) => Ok(Self::from(value)),
            RawDraftId::Text(value) => Self::new(value).map_err(serde::de::Error::custom),
        }
    }
}
