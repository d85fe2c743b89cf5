//! In-memory integration tests for draft reconciliation across views.

use super::helpers::{ScriptedPrompt, Workspace, complete_form, workspace};
use rstest::rstest;
use taskdesk::draft::{
    domain::{DraftSnapshot, TextField},
    ports::{DraftService, LocalDraftStore, PromptKind},
    services::{ClearOutcome, CloseOutcome, DraftSaveOutcome, DraftState, LoadSource},
};
use mockable::DefaultClock;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reload_restores_remote_draft(workspace: Workspace) {
    workspace.fill("Alpha", "Brief");
    let saved = workspace.reconciler.save_as_draft().await;
    assert_eq!(saved.user_message(), "Draft saved successfully");

    let reloaded = workspace.reopen();
    let source = reloaded.load_on_mount().await;

    assert!(matches!(source, LoadSource::Remote(_)));
    assert_eq!(source.notice(), Some("Draft loaded from server"));
    assert_eq!(reloaded.form(), complete_form("Alpha", "Brief"));
    assert_eq!(reloaded.draft_id(), workspace.reconciler.draft_id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn offline_edits_survive_reload_locally(workspace: Workspace) {
    workspace.drafts.set_unavailable(true);
    workspace.fill("Alpha", "Brief");
    let saved = workspace.reconciler.save_as_draft().await;
    assert!(matches!(saved, DraftSaveOutcome::SavedLocally(_)));

    let reloaded = workspace.reopen();
    let source = reloaded.load_on_mount().await;

    assert_eq!(source, LoadSource::Local);
    assert_eq!(reloaded.form(), complete_form("Alpha", "Brief"));
    assert_eq!(reloaded.state(), DraftState::DirtyUnsaved);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn locally_restored_draft_is_pushed_on_next_save(workspace: Workspace) {
    workspace.store.save(&DraftSnapshot::capture(
        None,
        complete_form("Alpha", "Brief"),
        &DefaultClock,
    ));
    assert_eq!(workspace.reconciler.load_on_mount().await, LoadSource::Local);

    workspace.reconciler.autosave_tick().await;

    let remote = workspace
        .drafts
        .fetch_latest()
        .await
        .expect("latest draft query")
        .expect("draft stored remotely");
    assert_eq!(remote.form, complete_form("Alpha", "Brief"));
    assert_eq!(workspace.reconciler.state(), DraftState::Synced);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remote_deletion_between_saves_recreates_draft(workspace: Workspace) {
    workspace.fill("Alpha", "Brief");
    workspace.reconciler.save_as_draft().await;
    let first = workspace.reconciler.draft_id().expect("draft tracked");
    workspace.drafts.remove_externally(&first);

    workspace
        .reconciler
        .edit(|form| form.set_text(TextField::TaskDetails, "More"));
    let saved = workspace.reconciler.save_as_draft().await;

    assert!(matches!(saved, DraftSaveOutcome::Saved(_)));
    assert_eq!(workspace.drafts.len(), 1);
    assert_ne!(workspace.reconciler.draft_id(), Some(first));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creating_task_leaves_no_draft_behind(workspace: Workspace) {
    workspace.fill("Alpha", "Brief");
    workspace.reconciler.autosave_tick().await;

    workspace
        .reconciler
        .create_task()
        .await
        .expect("task created");

    assert!(workspace.store.load().is_none());
    assert!(workspace.drafts.is_empty());
    let reloaded = workspace.reopen();
    assert_eq!(reloaded.load_on_mount().await, LoadSource::Empty);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clear_asks_once_and_empties_everything(workspace: Workspace) {
    workspace.fill("Alpha", "Brief");
    workspace.reconciler.autosave_tick().await;
    let prompt = ScriptedPrompt::answering(true);

    let outcome = workspace.reconciler.clear_form(&prompt).await;

    assert_eq!(outcome, ClearOutcome::Cleared);
    assert_eq!(prompt.asked(), [PromptKind::ClearForm]);
    assert_eq!(workspace.reconciler.state(), DraftState::Empty);
    assert!(workspace.drafts.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn declining_to_save_on_close_keeps_last_synced_remote(workspace: Workspace) {
    workspace.fill("Alpha", "Brief");
    workspace.reconciler.autosave_tick().await;
    workspace
        .reconciler
        .edit(|form| form.set_text(TextField::Reference, "unsaved"));
    let prompt = ScriptedPrompt::answering(false);

    let outcome = workspace.reconciler.close(&prompt).await;

    assert!(matches!(outcome, CloseOutcome::Discarded));
    assert_eq!(prompt.asked(), [PromptKind::SaveBeforeClose]);
    let reloaded = workspace.reopen();
    assert!(matches!(reloaded.load_on_mount().await, LoadSource::Remote(_)));
    assert_eq!(reloaded.form(), complete_form("Alpha", "Brief"));
}
