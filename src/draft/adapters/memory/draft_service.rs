//! In-memory drafts service for reconciliation tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::draft::{
    domain::{DraftForm, DraftId, RemoteDraft},
    ports::{DraftService, DraftServiceError, DraftServiceResult},
};

/// Number of calls received per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftServiceCalls {
    /// `create` calls.
    pub create: usize,
    /// `update` calls.
    pub update: usize,
    /// `fetch_latest` calls.
    pub fetch_latest: usize,
    /// `list` calls.
    pub list: usize,
    /// `delete` calls.
    pub delete: usize,
}

/// Thread-safe in-memory drafts service.
///
/// Identifiers are sequential integers. The latest draft is the one most
/// recently created or updated.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDraftService {
    state: Arc<RwLock<InMemoryDraftState>>,
}

#[derive(Debug, Default)]
struct InMemoryDraftState {
    drafts: BTreeMap<DraftId, StoredDraft>,
    next_id: u64,
    touch_seq: u64,
    unavailable: bool,
    calls: DraftServiceCalls,
}

#[derive(Debug, Clone)]
struct StoredDraft {
    form: DraftForm,
    touched: u64,
}

impl InMemoryDraftService {
    /// Creates an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with
    /// [`DraftServiceError::Unavailable`] until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut state) = self.state.write() {
            state.unavailable = unavailable;
        }
    }

    /// Returns per-operation call counts.
    #[must_use]
    pub fn calls(&self) -> DraftServiceCalls {
        self.state
            .read()
            .map(|state| state.calls)
            .unwrap_or_default()
    }

    /// Returns the stored form for `id`.
    #[must_use]
    pub fn get(&self, id: &DraftId) -> Option<DraftForm> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.drafts.get(id).map(|stored| stored.form.clone()))
    }

    /// Returns the number of stored drafts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().map(|state| state.drafts.len()).unwrap_or_default()
    }

    /// Returns `true` when no drafts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes a draft without counting a call, as another client would.
    pub fn remove_externally(&self, id: &DraftId) {
        if let Ok(mut state) = self.state.write() {
            state.drafts.remove(id);
        }
    }
}

fn poisoned(err: &impl std::fmt::Display) -> DraftServiceError {
    DraftServiceError::unavailable(std::io::Error::other(err.to_string()))
}

fn offline() -> DraftServiceError {
    DraftServiceError::unavailable(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "drafts service offline",
    ))
}

impl InMemoryDraftState {
    fn touch(&mut self) -> u64 {
        self.touch_seq += 1;
        self.touch_seq
    }
}

#[async_trait]
impl DraftService for InMemoryDraftService {
    async fn create(&self, form: &DraftForm) -> DraftServiceResult<DraftId> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.calls.create += 1;
        if state.unavailable {
            return Err(offline());
        }
        state.next_id += 1;
        let id = DraftId::from(state.next_id);
        let touched = state.touch();
        state.drafts.insert(
            id.clone(),
            StoredDraft {
                form: form.clone(),
                touched,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: &DraftId, form: &DraftForm) -> DraftServiceResult<RemoteDraft> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.calls.update += 1;
        if state.unavailable {
            return Err(offline());
        }
        if !state.drafts.contains_key(id) {
            return Err(DraftServiceError::NotFound(id.clone()));
        }
        let touched = state.touch();
        state.drafts.insert(
            id.clone(),
            StoredDraft {
                form: form.clone(),
                touched,
            },
        );
        Ok(RemoteDraft {
            id: id.clone(),
            form: form.clone(),
        })
    }

    async fn fetch_latest(&self) -> DraftServiceResult<Option<RemoteDraft>> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.calls.fetch_latest += 1;
        if state.unavailable {
            return Err(offline());
        }
        let latest = state
            .drafts
            .iter()
            .max_by_key(|(_, stored)| stored.touched)
            .map(|(id, stored)| RemoteDraft {
                id: id.clone(),
                form: stored.form.clone(),
            });
        Ok(latest)
    }

    async fn list(&self) -> DraftServiceResult<Vec<RemoteDraft>> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.calls.list += 1;
        if state.unavailable {
            return Err(offline());
        }
        let mut stored: Vec<(&DraftId, &StoredDraft)> = state.drafts.iter().collect();
        stored.sort_by_key(|(_, draft)| std::cmp::Reverse(draft.touched));
        Ok(stored
            .into_iter()
            .map(|(id, draft)| RemoteDraft {
                id: id.clone(),
                form: draft.form.clone(),
            })
            .collect())
    }

    async fn delete(&self, id: &DraftId) -> DraftServiceResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.calls.delete += 1;
        if state.unavailable {
            return Err(offline());
        }
        state
            .drafts
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DraftServiceError::NotFound(id.clone()))
    }
}
