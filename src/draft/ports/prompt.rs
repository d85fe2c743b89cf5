//! User confirmation before data is discarded.

/// Question put to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    /// "Are you sure you want to clear all form data?"
    ClearForm,
    /// "You have unsaved changes. Do you want to save as draft before closing?"
    SaveBeforeClose,
}

impl PromptKind {
    /// Returns the question text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ClearForm => "Are you sure you want to clear all form data?",
            Self::SaveBeforeClose => {
                "You have unsaved changes. Do you want to save as draft before closing?"
            }
        }
    }
}

/// Asks the user a yes/no question.
#[cfg_attr(test, mockall::automock)]
pub trait DiscardPrompt: Send + Sync {
    /// Returns `true` when the user answers yes.
    fn confirm(&self, kind: PromptKind) -> bool;
}
