//! Local (per-browser or per-device) draft snapshot storage.

use crate::draft::domain::DraftSnapshot;

/// Single-slot store for the current draft snapshot.
///
/// Persistence is best-effort: implementations log and swallow storage
/// failures instead of returning them, and concurrent writers to the same
/// slot resolve as last-write-wins.
pub trait LocalDraftStore: Send + Sync {
    /// Replaces the stored snapshot.
    fn save(&self, snapshot: &DraftSnapshot);

    /// Returns the stored snapshot, if any.
    ///
    /// Unreadable or corrupt contents are reported as absent.
    fn load(&self) -> Option<DraftSnapshot>;

    /// Removes the stored snapshot.
    fn clear(&self);
}
