//! Task endpoints under `/api/tasks`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    api::{Ack, ApiClient, ApiError},
    task::{
        domain::{
            ActionRequest, CreatedTask, InboxListing, JourneyEntry, NewTask, OutboxListing,
            TaskId, TaskRecord, UserSummary,
        },
        ports::{TaskGateway, TaskGatewayError, TaskGatewayResult},
    },
};

const CREATE_PATH: &str = "/api/tasks/create";
const INBOX_PATH: &str = "/api/tasks/inbox";
const OUTBOX_PATH: &str = "/api/tasks/outbox";
const UNREAD_PATH: &str = "/api/tasks/inbox/unread-count";

/// [`TaskGateway`] backed by the dashboard's REST API.
#[derive(Debug, Clone)]
pub struct HttpTaskGateway {
    client: ApiClient,
}

impl HttpTaskGateway {
    /// Creates a gateway using a shared API client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InboxBody {
    #[serde(default)]
    data: Vec<TaskRecord>,
    #[serde(default)]
    count: Option<usize>,
    #[serde(default)]
    unread_count: Option<u32>,
}

#[derive(Deserialize)]
struct OutboxBody {
    #[serde(default)]
    data: Vec<TaskRecord>,
    #[serde(default)]
    count: Option<usize>,
    #[serde(default)]
    user: Option<UserSummary>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnreadBody {
    #[serde(default)]
    unread_count: u32,
}

#[derive(Deserialize)]
struct JourneyBody {
    #[serde(default)]
    journey: Vec<JourneyEntry>,
}

fn inbox_detail_path(id: TaskId) -> String {
    format!("/api/tasks/inbox/{id}")
}

fn journey_path(id: TaskId) -> String {
    format!("/api/tasks/{id}/journey")
}

fn action_path(id: TaskId, request: &ActionRequest) -> String {
    format!("/api/tasks/{id}/{}", request.action().path_segment())
}

/// Reads the created task from a flat or `{success, data}` body.
fn created_task(body: &Value) -> Option<CreatedTask> {
    let record = match body.get("data") {
        Some(data) if data.is_object() => data,
        _ => body,
    };
    let id = record
        .get("id")
        .and_then(|raw| serde_json::from_value::<TaskId>(raw.clone()).ok())?;
    let task_number = record
        .get("taskNumber")
        .or_else(|| record.get("task_number"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);
    Some(CreatedTask { id, task_number })
}

fn map_error(
    err: ApiError,
    id: Option<TaskId>,
    rejection: fn(String) -> TaskGatewayError,
) -> TaskGatewayError {
    match (err.status(), id) {
        (Some(401), _) => TaskGatewayError::Unauthenticated,
        (Some(404), Some(missing)) => TaskGatewayError::NotFound(missing),
        _ if err.is_client_rejection() => rejection(err.user_message()),
        _ => TaskGatewayError::unavailable(err),
    }
}

fn listing_error(err: ApiError) -> TaskGatewayError {
    map_error(err, None, TaskGatewayError::Rejected)
}

#[async_trait]
impl TaskGateway for HttpTaskGateway {
    async fn create(&self, task: &NewTask) -> TaskGatewayResult<CreatedTask> {
        let body: Value = self
            .client
            .post_json(CREATE_PATH, task)
            .await
            .map_err(|err| map_error(err, None, TaskGatewayError::Validation))?;
        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let ack: Ack = serde_json::from_value(body).map_err(TaskGatewayError::unavailable)?;
            return Err(TaskGatewayError::Rejected(rejection_message(&ack)));
        }
        let created = created_task(&body).ok_or_else(|| {
            TaskGatewayError::Rejected("task service response carried no task id".to_owned())
        })?;
        debug!(task_id = %created.id, "task created");
        Ok(created)
    }

    async fn inbox(&self) -> TaskGatewayResult<InboxListing> {
        let body: InboxBody = self.client.get_json(INBOX_PATH).await.map_err(listing_error)?;
        Ok(InboxListing {
            count: body.count.unwrap_or_else(|| body.data.len()),
            unread_count: body.unread_count.unwrap_or_default(),
            tasks: body.data,
        })
    }

    async fn outbox(&self) -> TaskGatewayResult<OutboxListing> {
        let body: OutboxBody = self.client.get_json(OUTBOX_PATH).await.map_err(listing_error)?;
        Ok(OutboxListing {
            count: body.count.unwrap_or_else(|| body.data.len()),
            tasks: body.data,
            user: body.user,
        })
    }

    async fn unread_count(&self) -> TaskGatewayResult<u32> {
        let body: UnreadBody = self.client.get_json(UNREAD_PATH).await.map_err(listing_error)?;
        Ok(body.unread_count)
    }

    async fn task_detail(&self, id: TaskId) -> TaskGatewayResult<TaskRecord> {
        let body: Value = self
            .client
            .get_json(&inbox_detail_path(id))
            .await
            .map_err(|err| map_error(err, Some(id), TaskGatewayError::Rejected))?;
        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let ack: Ack = serde_json::from_value(body).map_err(TaskGatewayError::unavailable)?;
            return Err(TaskGatewayError::Rejected(rejection_message(&ack)));
        }
        let record = body.get("data").cloned().unwrap_or(body);
        if record.is_null() {
            return Err(TaskGatewayError::NotFound(id));
        }
        serde_json::from_value(record).map_err(TaskGatewayError::unavailable)
    }

    async fn journey(&self, id: TaskId) -> TaskGatewayResult<Vec<JourneyEntry>> {
        let body: JourneyBody = self
            .client
            .get_json(&journey_path(id))
            .await
            .map_err(|err| map_error(err, Some(id), TaskGatewayError::Rejected))?;
        Ok(body.journey)
    }

    async fn perform(&self, id: TaskId, request: &ActionRequest) -> TaskGatewayResult<Ack> {
        let path = action_path(id, request);
        let ack: Ack = self
            .client
            .post_json(&path, &request.body())
            .await
            .map_err(|err| map_error(err, Some(id), TaskGatewayError::Rejected))?;
        if ack.success {
            debug!(task_id = %id, action = request.action().path_segment(), "task action accepted");
            Ok(ack)
        } else {
            Err(TaskGatewayError::Rejected(rejection_message(&ack)))
        }
    }
}

fn rejection_message(ack: &Ack) -> String {
    ack.detail
        .as_ref()
        .map(|detail| detail.user_message())
        .or_else(|| ack.message.clone())
        .unwrap_or_else(|| "request was not accepted".to_owned())
}
