//! Testing utilities for the timeline workspace
//!
//! Scripted fakes for the fetch, delete and navigation seams, plus fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use timeline_client::{DeleteError, Deleter, FetchError, RecordFetcher};
use timeline_core::{CompletionAction, Navigator, TimelinePage};
use timeline_types::{
    AuthFlag, EditRecord, ExperimentRecord, Field, FieldSet, ItemId, ItemKind, Record,
    TimelineItem,
};
use tokio::sync::Semaphore;

/// Holds fake responses until released
#[derive(Debug, Clone)]
pub struct Gate(Arc<Semaphore>);

impl Gate {
    pub fn closed() -> Self {
        Self(Arc::new(Semaphore::new(0)))
    }

    /// Let `n` waiting calls through
    pub fn release(&self, n: usize) {
        self.0.add_permits(n);
    }

    async fn pass(&self) {
        if let Ok(permit) = self.0.acquire().await {
            permit.forget();
        }
    }
}

/// Fetcher answering from per-item scripts
///
/// Each item's outcomes are consumed in order; the last one repeats.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    scripts: Mutex<HashMap<ItemId, VecDeque<Result<Record, FetchError>>>>,
    calls: Mutex<Vec<ItemId>>,
    gate: Option<Gate>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn with_outcome(self, id: &str, outcome: Result<Record, FetchError>) -> Self {
        self.scripts
            .lock()
            .entry(item_id(id))
            .or_default()
            .push_back(outcome);
        self
    }

    pub fn with_record(self, id: &str, record: impl Into<Record>) -> Self {
        self.with_outcome(id, Ok(record.into()))
    }

    pub fn with_failure(self, id: &str, error: FetchError) -> Self {
        self.with_outcome(id, Err(error))
    }

    /// Total fetches issued
    pub fn calls(&self) -> usize {
        self.calls.lock().len()
    }

    /// Fetches issued for one item
    pub fn calls_for(&self, id: &str) -> usize {
        let id = item_id(id);
        self.calls.lock().iter().filter(|c| **c == id).count()
    }

    fn next(&self, id: &ItemId) -> Result<Record, FetchError> {
        let mut scripts = self.scripts.lock();
        match scripts.get_mut(id) {
            Some(script) if script.len() > 1 => script
                .pop_front()
                .unwrap_or_else(|| Err(not_found(id))),
            Some(script) => script.front().cloned().unwrap_or_else(|| Err(not_found(id))),
            None => Err(not_found(id)),
        }
    }
}

#[async_trait]
impl RecordFetcher for ScriptedFetcher {
    async fn fetch(&self, _kind: ItemKind, id: &ItemId) -> Result<Record, FetchError> {
        self.calls.lock().push(id.clone());
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        self.next(id)
    }
}

fn not_found(id: &ItemId) -> FetchError {
    FetchError::Status {
        url: format!("/api/edit/{id}"),
        status: 404,
        message: Some("Not Found".to_string()),
    }
}

/// Deleter recording every target it is asked to delete
#[derive(Debug, Default)]
pub struct RecordingDeleter {
    requests: Mutex<Vec<String>>,
    outcomes: Mutex<VecDeque<Result<(), DeleteError>>>,
    gate: Option<Gate>,
    in_flight: AtomicUsize,
}

impl RecordingDeleter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Queue an outcome; once the queue is empty every delete succeeds
    pub fn with_outcome(self, outcome: Result<(), DeleteError>) -> Self {
        self.outcomes.lock().push_back(outcome);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Requests issued but not yet answered
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Deleter for RecordingDeleter {
    async fn delete(&self, target_url: &str) -> Result<(), DeleteError> {
        self.requests.lock().push(target_url.to_string());
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.outcomes.lock().pop_front().unwrap_or(Ok(()))
    }
}

/// Navigator recording completion actions
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    actions: Mutex<Vec<CompletionAction>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> Vec<CompletionAction> {
        self.actions.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn reload(&self) {
        self.actions.lock().push(CompletionAction::Reload);
    }

    fn redirect(&self, path: &str) {
        self.actions
            .lock()
            .push(CompletionAction::Redirect(path.to_string()));
    }
}

pub fn item_id(id: &str) -> ItemId {
    ItemId::new(id).unwrap()
}

pub fn item(id: &str, kind: ItemKind, auth: AuthFlag) -> TimelineItem {
    TimelineItem::new(item_id(id), kind, auth)
}

pub fn page_of(items: impl IntoIterator<Item = TimelineItem>) -> Arc<TimelinePage> {
    Arc::new(TimelinePage::new(items).unwrap())
}

/// Field set with every field derived from one stem
pub fn field_set(stem: &str) -> FieldSet {
    FieldSet::new(
        format!("{stem} title"),
        format!("{stem} description"),
        format!("{stem} ingredients"),
        format!("{stem} instructions"),
    )
}

/// Edit whose snapshots differ only in title
pub fn title_edit(prev_title: &str, curr_title: &str) -> EditRecord {
    let base = field_set("base");
    EditRecord::new(
        base.clone().with(Field::Title, curr_title),
        base.with(Field::Title, prev_title),
    )
}

pub fn experiment(message: &str) -> ExperimentRecord {
    ExperimentRecord::new(message, "Tue, 03 Jan 2023 10:00:00 GMT", "notes")
}

pub fn transport_error() -> FetchError {
    FetchError::Transport {
        url: "/api/edit/1".to_string(),
        message: "connection reset".to_string(),
    }
}
