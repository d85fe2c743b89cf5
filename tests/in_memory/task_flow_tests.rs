//! In-memory integration tests for task creation, actions and cards.

use std::sync::Arc;

use super::helpers::{Workspace, workspace};
use mockable::DefaultClock;
use rstest::rstest;
use taskdesk::{
    presenter::{present_journey, present_task},
    task::{
        domain::{OutboxFilter, StatusCounts, SubmissionReport, TaskStatus},
        services::TaskActionService,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_presented_in_the_outbox(workspace: Workspace) {
    workspace.fill("Launch", "Trailer cut");
    let created = workspace
        .reconciler
        .create_task()
        .await
        .expect("task created");
    let actions = TaskActionService::new(Arc::clone(&workspace.tasks));

    let outbox = actions.outbox().await.expect("outbox listed");
    let awaiting = OutboxFilter::Awaiting.apply(&outbox.tasks);
    let card = present_task(
        awaiting.first().copied().expect("task awaiting receipt"),
        &DefaultClock,
    );

    assert_eq!(card.title, "Trailer cut");
    assert_eq!(card.task_number, created.task_number);
    assert_eq!(card.status.label, "Pending");
    assert_eq!(card.entries.as_deref(), Some("1 entry"));
    assert_eq!(card.priority_icon, "🔴");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn review_cycle_is_recorded_in_the_journey(workspace: Workspace) {
    workspace.fill("Launch", "Poster");
    let created = workspace
        .reconciler
        .create_task()
        .await
        .expect("task created");
    let actions = TaskActionService::new(Arc::clone(&workspace.tasks));

    actions.start_work(created.id).await.expect("started");
    actions
        .submit(created.id, SubmissionReport::new("First pass"))
        .await
        .expect("submitted");
    actions
        .reject(created.id, "Colours are off")
        .await
        .expect("rejected");

    let outbox = actions.outbox().await.expect("outbox listed");
    let counts = StatusCounts::tally(&outbox.tasks);
    assert_eq!(counts.get(TaskStatus::RevisionRequired), 1);
    assert_eq!(OutboxFilter::NeedsRework.apply(&outbox.tasks).len(), 1);

    let journey = actions.journey(created.id).await.expect("journey listed");
    let lines = present_journey(&journey, &DefaultClock);
    let icons: Vec<&str> = lines.iter().map(|line| line.icon).collect();
    assert_eq!(icons, ["✨", "🚀", "👁️", "❌"]);
    assert_eq!(
        lines.last().and_then(|line| line.status_change.as_deref()),
        Some("submitted → revision_required")
    );
}
