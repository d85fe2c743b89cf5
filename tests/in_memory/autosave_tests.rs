//! In-memory integration tests for the autosave timer.

use std::sync::Arc;
use std::time::Duration;

use super::helpers::{Workspace, complete_form, workspace};
use rstest::rstest;
use taskdesk::{
    config::ConfigError,
    draft::{
        ports::LocalDraftStore,
        services::{DraftState, spawn_autosave},
    },
};

const INTERVAL: Duration = Duration::from_secs(30);

async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn timer_pushes_dirty_form_after_one_interval(workspace: Workspace) {
    let handle = spawn_autosave(Arc::clone(&workspace.reconciler), INTERVAL)
        .expect("non-zero interval");
    workspace.fill("Alpha", "Brief");
    settle().await;
    assert_eq!(workspace.drafts.calls().create, 0);

    tokio::time::advance(INTERVAL).await;
    settle().await;

    assert_eq!(workspace.drafts.calls().create, 1);
    assert_eq!(workspace.reconciler.state(), DraftState::Synced);
    assert_eq!(
        workspace.store.load().map(|snapshot| snapshot.form().clone()),
        Some(complete_form("Alpha", "Brief"))
    );
    handle.stop();
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn clean_form_is_not_pushed_again(workspace: Workspace) {
    let _handle = spawn_autosave(Arc::clone(&workspace.reconciler), INTERVAL)
        .expect("non-zero interval");
    workspace.fill("Alpha", "Brief");

    for _ in 0..3 {
        tokio::time::advance(INTERVAL).await;
        settle().await;
    }

    let calls = workspace.drafts.calls();
    assert_eq!(calls.create, 1);
    assert_eq!(calls.update, 0);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_autosave(workspace: Workspace) {
    let handle = spawn_autosave(Arc::clone(&workspace.reconciler), INTERVAL)
        .expect("non-zero interval");
    workspace.fill("Alpha", "Brief");
    drop(handle);

    tokio::time::advance(INTERVAL * 2).await;
    settle().await;

    assert_eq!(workspace.drafts.calls().create, 0);
    assert_eq!(workspace.reconciler.state(), DraftState::DirtyUnsaved);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn failed_ticks_retry_until_the_service_returns(workspace: Workspace) {
    let _handle = spawn_autosave(Arc::clone(&workspace.reconciler), INTERVAL)
        .expect("non-zero interval");
    workspace.drafts.set_unavailable(true);
    workspace.fill("Alpha", "Brief");

    tokio::time::advance(INTERVAL).await;
    settle().await;
    assert_eq!(workspace.reconciler.state(), DraftState::DirtyUnsaved);

    workspace.drafts.set_unavailable(false);
    tokio::time::advance(INTERVAL).await;
    settle().await;

    assert_eq!(workspace.reconciler.state(), DraftState::Synced);
    assert_eq!(workspace.drafts.len(), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn zero_interval_starts_no_timer(workspace: Workspace) {
    let result = spawn_autosave(Arc::clone(&workspace.reconciler), Duration::ZERO);
    workspace.fill("Alpha", "Brief");

    tokio::time::advance(INTERVAL).await;
    settle().await;

    assert!(matches!(
        result,
        Err(ConfigError::ZeroInterval("autosave interval"))
    ));
    assert_eq!(workspace.drafts.calls().create, 0);
}
