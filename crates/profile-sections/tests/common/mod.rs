//! In-memory section backends shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use profile_http::{ApiError, Result as ApiResult};
use profile_sections::entities::*;
use profile_sections::{CollectionRemote, EntityAdapter, Notice, Notifier};
use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Wire records the fake server can assign ids to.
pub trait WireId {
    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);
}

macro_rules! wire_id {
    ($($record:ty),*) => {
        $(impl WireId for $record {
            fn id(&self) -> Option<i64> {
                self.id
            }
            fn set_id(&mut self, id: i64) {
                self.id = Some(id);
            }
        })*
    };
}

wire_id!(AchievementRecord, ContactRecord, ExperienceRecord, GalleryRecord, LinkRecord);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Call {
    List,
    Create,
    Update,
    Delete,
}

/// Holds a mutation until the test releases it.
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

pub struct FakeRemote<A: EntityAdapter> {
    records: Mutex<Vec<A::Wire>>,
    next_id: Mutex<i64>,
    failing: Mutex<HashSet<Call>>,
    gate: Mutex<Option<Arc<Gate>>>,
    pub lists: AtomicUsize,
    pub creates: AtomicUsize,
    pub updates: AtomicUsize,
    pub deletes: AtomicUsize,
    _adapter: PhantomData<fn() -> A>,
}

impl<A: EntityAdapter> FakeRemote<A>
where
    A::Wire: WireId,
{
    pub fn new(records: Vec<A::Wire>) -> Arc<Self> {
        let next_id = records.iter().filter_map(WireId::id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            records: Mutex::new(records),
            next_id: Mutex::new(next_id),
            failing: Mutex::new(HashSet::new()),
            gate: Mutex::new(None),
            lists: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            _adapter: PhantomData,
        })
    }

    pub fn fail_on(&self, call: Call) {
        self.failing.lock().insert(call);
    }

    pub fn heal(&self) {
        self.failing.lock().clear();
    }

    /// Suspends the next create/update/delete until `release` is notified.
    pub fn hold_mutations(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate {
            entered: Notify::new(),
            release: Notify::new(),
        });
        *self.gate.lock() = Some(gate.clone());
        gate
    }

    pub fn records(&self) -> Vec<A::Wire> {
        self.records.lock().clone()
    }

    pub fn count(&self, call: Call) -> usize {
        let counter = match call {
            Call::List => &self.lists,
            Call::Create => &self.creates,
            Call::Update => &self.updates,
            Call::Delete => &self.deletes,
        };
        counter.load(Ordering::SeqCst)
    }

    fn check(&self, call: Call) -> ApiResult<()> {
        if self.failing.lock().contains(&call) {
            return Err(ApiError::Status {
                status: 500,
                body: "boom".into(),
            });
        }
        Ok(())
    }

    async fn pass_gate(&self) {
        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
    }
}

#[async_trait]
impl<A: EntityAdapter> CollectionRemote<A> for FakeRemote<A>
where
    A::Wire: WireId,
{
    async fn list(&self) -> ApiResult<Vec<A::Wire>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.check(Call::List)?;
        Ok(self.records())
    }

    async fn create(&self, mut record: A::Wire) -> ApiResult<()> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await;
        self.check(Call::Create)?;
        let id = {
            let mut next = self.next_id.lock();
            let id = *next;
            *next += 1;
            id
        };
        record.set_id(id);
        let mut records = self.records.lock();
        match A::INSERT_AT {
            profile_sections::InsertPosition::Front => records.insert(0, record),
            profile_sections::InsertPosition::Back => records.push(record),
        }
        Ok(())
    }

    async fn update(&self, id: i64, mut record: A::Wire) -> ApiResult<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await;
        self.check(Call::Update)?;
        record.set_id(id);
        let mut records = self.records.lock();
        let slot = records
            .iter_mut()
            .find(|r| r.id() == Some(id))
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: format!("no record {}", id),
            })?;
        *slot = record;
        Ok(())
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await;
        self.check(Call::Delete)?;
        self.records.lock().retain(|r| r.id() != Some(id));
        Ok(())
    }
}

/// Collects every notice the controller emits.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

pub fn achievement(id: i64, rank: &str, field: &str, show: &str, year: i32) -> AchievementRecord {
    AchievementRecord {
        id: Some(id),
        rank: rank.into(),
        field: field.into(),
        show_name: show.into(),
        year: Some(year),
    }
}

pub fn gallery(id: i64, caption: &str, is_profile_picture: bool) -> GalleryRecord {
    GalleryRecord {
        id: Some(id),
        caption: caption.into(),
        is_profile_picture,
        image_url: Some(format!("https://cdn.example.com/{}.jpg", id)),
        upload: None,
    }
}
