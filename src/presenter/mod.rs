//! Display metadata for tasks and journeys.
//!
//! Every function here is pure: it maps server-reported values to labels,
//! icons and colours, falling back to a neutral bucket for unknown or
//! absent input instead of failing. Nothing is recomputed or reordered.

mod badge;
mod card;
mod format;

pub use badge::{
    StageBadge, StatusBadge, action_icon, priority_color, priority_icon, stage_badge,
    status_badge,
};
pub use card::{JourneyLine, TaskCard, present_journey, present_task};
pub use format::{
    attachment_size, entries_label, excerpt, relative_time, relative_time_at, truncate_link,
};

#[cfg(test)]
mod tests;
