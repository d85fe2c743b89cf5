//! Drafts endpoints under `/api/drafts`.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    api::{Ack, ApiClient, ApiError},
    draft::{
        domain::{DraftForm, DraftId, RemoteDraft},
        ports::{DraftService, DraftServiceError, DraftServiceResult},
    },
};

const SAVE_PATH: &str = "/api/drafts/save";
const LATEST_PATH: &str = "/api/drafts/latest";
const LIST_PATH: &str = "/api/drafts/";

/// [`DraftService`] backed by the dashboard's REST API.
#[derive(Debug, Clone)]
pub struct HttpDraftService {
    client: ApiClient,
}

impl HttpDraftService {
    /// Creates a service using a shared API client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

fn draft_path(id: &DraftId) -> String {
    format!("/api/drafts/{id}")
}

/// Returns the draft object, unwrapping a `{success, data}` envelope.
fn draft_record(body: &Value) -> Option<&Value> {
    match body.get("data") {
        Some(data) if data.is_object() => Some(data),
        Some(_) => None,
        None => body.is_object().then_some(body),
    }
}

fn record_id(record: &Value) -> Option<DraftId> {
    record
        .get("id")
        .or_else(|| record.get("_id"))
        .and_then(|raw| serde_json::from_value(raw.clone()).ok())
}

fn decode_remote(record: &Value) -> Option<RemoteDraft> {
    let id = record_id(record)?;
    let form = serde_json::from_value::<DraftForm>(record.clone()).ok()?;
    Some(RemoteDraft { id, form })
}

/// Returns the draft objects of a `{success, data: [...]}` or bare array body.
fn draft_records(body: &Value) -> &[Value] {
    body.get("data")
        .unwrap_or(body)
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn missing_id() -> DraftServiceError {
    DraftServiceError::Rejected("drafts service response carried no draft id".to_owned())
}

fn map_error(err: ApiError, id: Option<&DraftId>) -> DraftServiceError {
    match (err.status(), id) {
        (Some(404), Some(missing)) => DraftServiceError::NotFound(missing.clone()),
        (Some(401), _) => DraftServiceError::Unauthenticated,
        _ if err.is_client_rejection() => DraftServiceError::Rejected(err.user_message()),
        _ => DraftServiceError::unavailable(err),
    }
}

#[async_trait]
impl DraftService for HttpDraftService {
    async fn create(&self, form: &DraftForm) -> DraftServiceResult<DraftId> {
        let body: Value = self
            .client
            .post_json(SAVE_PATH, form)
            .await
            .map_err(|err| map_error(err, None))?;
        let id = draft_record(&body).and_then(record_id).ok_or_else(missing_id)?;
        debug!(draft_id = %id, "remote draft created");
        Ok(id)
    }

    async fn update(&self, id: &DraftId, form: &DraftForm) -> DraftServiceResult<RemoteDraft> {
        let body: Value = self
            .client
            .put_json(&draft_path(id), form)
            .await
            .map_err(|err| map_error(err, Some(id)))?;
        let stored = draft_record(&body)
            .and_then(decode_remote)
            .unwrap_or_else(|| RemoteDraft {
                id: id.clone(),
                form: form.clone(),
            });
        Ok(stored)
    }

    async fn fetch_latest(&self) -> DraftServiceResult<Option<RemoteDraft>> {
        match self.client.get_json::<Value>(LATEST_PATH).await {
            Ok(body) => Ok(draft_record(&body).and_then(decode_remote)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(map_error(err, None)),
        }
    }

    async fn list(&self) -> DraftServiceResult<Vec<RemoteDraft>> {
        let body: Value = self
            .client
            .get_json(LIST_PATH)
            .await
            .map_err(|err| map_error(err, None))?;
        let drafts = draft_records(&body)
            .iter()
            .filter_map(|record| {
                let decoded = decode_remote(record);
                if decoded.is_none() {
                    warn!("skipping undecodable draft in listing");
                }
                decoded
            })
            .collect();
        Ok(drafts)
    }

    async fn delete(&self, id: &DraftId) -> DraftServiceResult<()> {
        let ack: Ack = self
            .client
            .delete_json(&draft_path(id))
            .await
            .map_err(|err| map_error(err, Some(id)))?;
        if ack.success {
            Ok(())
        } else {
            Err(DraftServiceError::Rejected(
                ack.detail
                    .map(|detail| detail.user_message())
                    .unwrap_or_else(|| "draft could not be deleted".to_owned()),
            ))
        }
    }
}
