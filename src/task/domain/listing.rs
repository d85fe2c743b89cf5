//! Inbox and outbox listings with their view filters.

use super::{TaskRecord, TaskStatus, UserSummary};

/// Tasks awaiting the current user's action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboxListing {
    /// Received tasks, in backend order.
    pub tasks: Vec<TaskRecord>,
    /// Task count as reported by the backend.
    pub count: usize,
    /// Unread task count.
    pub unread_count: u32,
}

/// Tasks the current user has sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboxListing {
    /// Sent tasks, in backend order.
    pub tasks: Vec<TaskRecord>,
    /// Task count as reported by the backend.
    pub count: usize,
    /// The user the listing belongs to.
    pub user: Option<UserSummary>,
}

/// Inbox view filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InboxFilter {
    /// Every received task.
    #[default]
    All,
    /// Tasks the backend flags as unread.
    Unread,
    /// Tasks in the working bucket.
    Working,
}

impl InboxFilter {
    /// Returns `true` when `task` belongs in this view.
    #[must_use]
    pub fn matches(self, task: &TaskRecord) -> bool {
        match self {
            Self::All => true,
            Self::Unread => task.is_read == Some(false),
            Self::Working => task.status() == Some(TaskStatus::Working),
        }
    }

    /// Returns the matching tasks, preserving order.
    #[must_use]
    pub fn apply(self, tasks: &[TaskRecord]) -> Vec<&TaskRecord> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

/// Outbox view filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutboxFilter {
    /// Every dispatched task.
    #[default]
    AllDispatched,
    /// Tasks still pending at the receiver.
    Awaiting,
    /// Tasks sent back for rework.
    NeedsRework,
    /// Saved drafts. They come from the drafts service, so no dispatched
    /// task matches this view.
    Drafts,
}

impl OutboxFilter {
    /// Returns `true` when `task` belongs in this view.
    #[must_use]
    pub fn matches(self, task: &TaskRecord) -> bool {
        match self {
            Self::AllDispatched => true,
            Self::Awaiting => task.status() == Some(TaskStatus::Pending),
            Self::NeedsRework => task.status() == Some(TaskStatus::RevisionRequired),
            Self::Drafts => false,
        }
    }

    /// Returns `true` when the view lists saved drafts instead of tasks.
    #[must_use]
    pub const fn lists_drafts(self) -> bool {
        matches!(self, Self::Drafts)
    }

    /// Returns the matching tasks, preserving order.
    #[must_use]
    pub fn apply(self, tasks: &[TaskRecord]) -> Vec<&TaskRecord> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

/// Number of tasks per status bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    counts: [usize; TaskStatus::ALL.len()],
    unrecognised: usize,
}

impl StatusCounts {
    /// Counts tasks by parsed status.
    #[must_use]
    pub fn tally(tasks: &[TaskRecord]) -> Self {
        let mut totals = Self::default();
        for task in tasks {
            match task.status().and_then(position) {
                Some(slot) => {
                    if let Some(count) = totals.counts.get_mut(slot) {
                        *count += 1;
                    }
                }
                None => totals.unrecognised += 1,
            }
        }
        totals
    }

    /// Returns the number of tasks in `status`.
    #[must_use]
    pub fn get(&self, status: TaskStatus) -> usize {
        position(status)
            .and_then(|slot| self.counts.get(slot).copied())
            .unwrap_or_default()
    }

    /// Returns the number of tasks with a missing or unknown status.
    #[must_use]
    pub const fn unrecognised(&self) -> usize {
        self.unrecognised
    }
}

fn position(status: TaskStatus) -> Option<usize> {
    TaskStatus::ALL.iter().position(|candidate| *candidate == status)
}
