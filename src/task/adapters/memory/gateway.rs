//! In-memory task gateway for submission and polling tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::{
    api::Ack,
    task::{
        domain::{
            ActionRequest, CreatedTask, InboxListing, JourneyEntry, NewTask, OutboxListing,
            TaskAction, TaskId, TaskRecord, TaskStatus,
        },
        ports::{TaskGateway, TaskGatewayError, TaskGatewayResult},
    },
};

/// Number of calls received per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskGatewayCalls {
    /// `create` calls.
    pub create: usize,
    /// `inbox` calls.
    pub inbox: usize,
    /// `outbox` calls.
    pub outbox: usize,
    /// `unread_count` calls.
    pub unread_count: usize,
    /// `task_detail` calls.
    pub task_detail: usize,
    /// `journey` calls.
    pub journey: usize,
    /// `perform` calls.
    pub perform: usize,
}

/// Thread-safe in-memory task backend.
///
/// Created tasks land in the outbox with `pending` status. Actions move a
/// task through a fixed status progression and append a journey entry; an
/// action missing from a task's non-empty `available_actions` is refused.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskGateway {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    inbox: BTreeMap<TaskId, TaskRecord>,
    outbox: BTreeMap<TaskId, TaskRecord>,
    journeys: HashMap<TaskId, Vec<JourneyEntry>>,
    created: Vec<NewTask>,
    next_id: u64,
    unread: u32,
    unavailable: bool,
    calls: TaskGatewayCalls,
}

impl InMemoryTaskGateway {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with
    /// [`TaskGatewayError::Unavailable`] until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut state) = self.state.write() {
            state.unavailable = unavailable;
        }
    }

    /// Places a record in the inbox.
    pub fn seed_inbox(&self, record: TaskRecord) {
        if let Ok(mut state) = self.state.write() {
            state.next_id = state.next_id.max(record.id.value());
            state.inbox.insert(record.id, record);
        }
    }

    /// Places a record in the outbox.
    pub fn seed_outbox(&self, record: TaskRecord) {
        if let Ok(mut state) = self.state.write() {
            state.next_id = state.next_id.max(record.id.value());
            state.outbox.insert(record.id, record);
        }
    }

    /// Sets the unread counter reported by the backend.
    pub fn set_unread(&self, unread: u32) {
        if let Ok(mut state) = self.state.write() {
            state.unread = unread;
        }
    }

    /// Returns per-operation call counts.
    #[must_use]
    pub fn calls(&self) -> TaskGatewayCalls {
        self.state
            .read()
            .map(|state| state.calls)
            .unwrap_or_default()
    }

    /// Returns every payload accepted by `create`, oldest first.
    #[must_use]
    pub fn created(&self) -> Vec<NewTask> {
        self.state
            .read()
            .map(|state| state.created.clone())
            .unwrap_or_default()
    }

    /// Returns the current copy of a task from either box.
    #[must_use]
    pub fn record(&self, id: TaskId) -> Option<TaskRecord> {
        self.state.read().ok().and_then(|state| {
            state
                .inbox
                .get(&id)
                .or_else(|| state.outbox.get(&id))
                .cloned()
        })
    }
}

fn poisoned(err: &impl std::fmt::Display) -> TaskGatewayError {
    TaskGatewayError::unavailable(std::io::Error::other(err.to_string()))
}

fn offline() -> TaskGatewayError {
    TaskGatewayError::unavailable(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "task service offline",
    ))
}

const fn status_after(action: TaskAction) -> TaskStatus {
    match action {
        TaskAction::StartWork => TaskStatus::Working,
        TaskAction::Submit => TaskStatus::Submitted,
        TaskAction::Approve => TaskStatus::Approved,
        TaskAction::Reject => TaskStatus::RevisionRequired,
    }
}

const fn journey_action(action: TaskAction) -> &'static str {
    match action {
        TaskAction::StartWork => "started",
        TaskAction::Submit => "under_review",
        TaskAction::Approve => "completed",
        TaskAction::Reject => "rejected",
    }
}

impl InMemoryTaskState {
    fn guard(&self) -> TaskGatewayResult<()> {
        if self.unavailable {
            Err(offline())
        } else {
            Ok(())
        }
    }

    fn record_mut(&mut self, id: TaskId) -> Option<&mut TaskRecord> {
        if self.inbox.contains_key(&id) {
            self.inbox.get_mut(&id)
        } else {
            self.outbox.get_mut(&id)
        }
    }
}

#[async_trait]
impl TaskGateway for InMemoryTaskGateway {
    async fn create(&self, task: &NewTask) -> TaskGatewayResult<CreatedTask> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.calls.create += 1;
        state.guard()?;
        state.next_id += 1;
        let id = TaskId::new(state.next_id);
        let task_number = format!("TSK-{:04}", id.value());

        let mut record = TaskRecord::new(id, task.title()).with_status(TaskStatus::Pending.as_str());
        record.task_number = Some(task_number.clone());
        record.project_name = Some(task.form().project_name().to_owned());
        record.priority = Some(task.form().priority().as_str().to_owned());
        record.journey_count = Some(1);

        state.outbox.insert(id, record);
        state.journeys.insert(id, vec![JourneyEntry::new("created")]);
        state.created.push(task.clone());
        Ok(CreatedTask {
            id,
            task_number: Some(task_number),
        })
    }

    async fn inbox(&self) -> TaskGatewayResult<InboxListing> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.calls.inbox += 1;
        state.guard()?;
        let tasks: Vec<TaskRecord> = state.inbox.values().cloned().collect();
        Ok(InboxListing {
            count: tasks.len(),
            unread_count: state.unread,
            tasks,
        })
    }

    async fn outbox(&self) -> TaskGatewayResult<OutboxListing> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.calls.outbox += 1;
        state.guard()?;
        let tasks: Vec<TaskRecord> = state.outbox.values().cloned().collect();
        Ok(OutboxListing {
            count: tasks.len(),
            tasks,
            user: None,
        })
    }

    async fn unread_count(&self) -> TaskGatewayResult<u32> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.calls.unread_count += 1;
        state.guard()?;
        Ok(state.unread)
    }

    async fn task_detail(&self, id: TaskId) -> TaskGatewayResult<TaskRecord> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.calls.task_detail += 1;
        state.guard()?;
        state
            .inbox
            .get(&id)
            .cloned()
            .ok_or(TaskGatewayError::NotFound(id))
    }

    async fn journey(&self, id: TaskId) -> TaskGatewayResult<Vec<JourneyEntry>> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.calls.journey += 1;
        state.guard()?;
        if state.record_mut(id).is_none() {
            return Err(TaskGatewayError::NotFound(id));
        }
        Ok(state.journeys.get(&id).cloned().unwrap_or_default())
    }

    async fn perform(&self, id: TaskId, request: &ActionRequest) -> TaskGatewayResult<Ack> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.calls.perform += 1;
        state.guard()?;
        let action = request.action();
        let record = state
            .record_mut(id)
            .ok_or(TaskGatewayError::NotFound(id))?;
        if !record.raw_available_actions.is_empty() && !record.permits(action) {
            return Err(TaskGatewayError::Rejected(format!(
                "cannot {} task {id} in its current state",
                action.path_segment()
            )));
        }

        let before = record.raw_status.clone();
        let after = status_after(action).as_str().to_owned();
        record.raw_status = Some(after.clone());
        record.journey_count = Some(record.journey_count.unwrap_or_default() + 1);

        let mut entry = JourneyEntry::new(journey_action(action));
        entry.status_before = before;
        entry.status_after = Some(after);
        if let ActionRequest::Reject { reason } = request {
            entry.comments = Some(reason.clone());
        }
        state.journeys.entry(id).or_default().push(entry);

        Ok(Ack {
            success: true,
            detail: None,
            message: Some(format!("{} accepted", action.path_segment())),
        })
    }
}
