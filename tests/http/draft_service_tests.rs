//! Integration tests for the HTTP drafts service.

use std::sync::Arc;

use super::fake_backend::FakeBackend;
use serde_json::json;
use taskdesk::draft::{
    adapters::http::HttpDraftService,
    domain::{DraftForm, DraftId, Priority, TextField},
    ports::{DraftService, DraftServiceError},
    services::{DraftSyncClient, SyncOutcome},
};

fn form(project: &str) -> DraftForm {
    DraftForm::new().with_text(TextField::ProjectName, project)
}

#[tokio::test(flavor = "multi_thread")]
async fn created_draft_is_returned_as_latest() {
    let backend = FakeBackend::start().await;
    let service = HttpDraftService::new(backend.client());

    let id = service.create(&form("Alpha")).await.expect("draft created");
    let latest = service
        .fetch_latest()
        .await
        .expect("latest query")
        .expect("draft present");

    assert_eq!(latest.id, id);
    assert_eq!(latest.form, form("Alpha"));
}

#[tokio::test(flavor = "multi_thread")]
async fn no_drafts_reads_as_none() {
    let backend = FakeBackend::start().await;
    let service = HttpDraftService::new(backend.client());

    assert_eq!(service.fetch_latest().await.expect("latest query"), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_draft_is_not_found() {
    let backend = FakeBackend::start().await;
    let service = HttpDraftService::new(backend.client());

    let err = service
        .update(&DraftId::from(41), &form("Alpha"))
        .await
        .expect_err("unknown draft");

    assert!(matches!(err, DraftServiceError::NotFound(id) if id == DraftId::from(41)));
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_client_recreates_once_after_server_side_delete() {
    let backend = FakeBackend::start().await;
    let client = DraftSyncClient::new(Arc::new(HttpDraftService::new(backend.client())));
    let first = client
        .save(None, &form("Alpha"))
        .await
        .expect("draft created");
    backend.with_state(|state| state.drafts.clear());

    let outcome = client
        .save(Some(first.id()), &form("Beta"))
        .await
        .expect("draft recreated");

    let SyncOutcome::Recreated { stale, id } = outcome else {
        panic!("expected recreation, got {outcome:?}");
    };
    assert_eq!(&stale, first.id());
    assert_ne!(id, stale);
    assert_eq!(backend.with_state(|state| state.drafts.len()), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn stored_drafts_decode_leniently() {
    let backend = FakeBackend::start().await;
    backend.with_state(|state| {
        state.drafts.insert(
            9,
            json!({
                "id": 9,
                "title": "From backend",
                "priority": "low",
                "toDepartment": null,
                "links": ["https://example.com", "not a link"]
            }),
        );
    });
    let service = HttpDraftService::new(backend.client());

    let latest = service
        .fetch_latest()
        .await
        .expect("latest query")
        .expect("draft present");

    assert_eq!(latest.form.task_name(), "From backend");
    assert_eq!(latest.form.priority(), Priority::Low);
    assert_eq!(latest.form.text(TextField::ToDepartment), "Gen Ai");
    assert_eq!(latest.form.links().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_draft_and_missing_draft_is_not_found() {
    let backend = FakeBackend::start().await;
    let service = HttpDraftService::new(backend.client());
    let id = service.create(&form("Alpha")).await.expect("draft created");

    service.delete(&id).await.expect("draft deleted");
    let again = service.delete(&id).await;

    assert!(matches!(again, Err(DraftServiceError::NotFound(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn server_failure_is_unavailable() {
    let backend = FakeBackend::start().await;
    backend.with_state(|state| state.fail_drafts = true);
    let service = HttpDraftService::new(backend.client());

    let err = service
        .create(&form("Alpha"))
        .await
        .expect_err("server fails");

    assert!(matches!(err, DraftServiceError::Unavailable(_)));
    assert_eq!(err.user_message(), "Draft saved locally (server error)");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_is_newest_first_and_skips_records_without_id() {
    let backend = FakeBackend::start().await;
    let service = HttpDraftService::new(backend.client());
    let first = service.create(&form("Alpha")).await.expect("draft created");
    let second = service.create(&form("Beta")).await.expect("draft created");
    backend.with_state(|state| {
        state.drafts.insert(50, json!({"title": "Orphaned"}));
    });

    let drafts = service.list().await.expect("drafts listed");

    let ids: Vec<DraftId> = drafts.iter().map(|draft| draft.id.clone()).collect();
    assert_eq!(ids, vec![second, first]);
    assert_eq!(
        drafts.first().map(|draft| draft.form.clone()),
        Some(form("Beta"))
    );
}
