//! Shared wiring for handler tests: in-memory ports seeded with the
//! sample catalog, plus ports that fail on demand.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::adapters::events::InMemoryEventBus;
use crate::adapters::memory::{
    InMemoryAllocationRegistry, InMemoryCalendarService, InMemoryCatalog,
    InMemoryImportJobRepository, InMemorySessionLogRepository, InMemorySessionStore,
    InMemoryStudentRoster,
};
use crate::domain::allocation::Allocation;
use crate::domain::calendar::{CalendarEntry, CalendarEntryType};
use crate::domain::catalog::fixtures::{sample, SampleCatalog};
use crate::domain::catalog::Student;
use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, EventEnvelope, LifecycleAction, SessionId,
    StudentId,
};
use crate::domain::session::Session;
use crate::ports::{EventPublisher, SessionFilter, SessionStore, StatusTransition};

pub(crate) struct Harness {
    pub sample: SampleCatalog,
    pub store: Arc<InMemorySessionStore>,
    pub catalog: Arc<InMemoryCatalog>,
    pub registry: Arc<InMemoryAllocationRegistry>,
    pub calendar: Arc<InMemoryCalendarService>,
    pub roster: Arc<InMemoryStudentRoster>,
    pub logs: Arc<InMemorySessionLogRepository>,
    pub jobs: Arc<InMemoryImportJobRepository>,
    pub bus: Arc<InMemoryEventBus>,
    pub students: Vec<StudentId>,
}

impl Harness {
    /// Asha teaches Science and Ravi teaches Maths to Class 5B; two
    /// students are enrolled.
    pub fn new() -> Self {
        let sample = sample();
        let allocations = vec![
            Allocation::new(sample.asha, sample.class_5b, sample.science),
            Allocation::new(sample.ravi, sample.class_5b, sample.maths),
        ];
        let students: Vec<Student> = ["Meera", "Kabir"]
            .into_iter()
            .map(|name| Student {
                id: StudentId::new(),
                class_id: sample.class_5b,
                name: name.to_string(),
            })
            .collect();
        Self {
            store: Arc::new(InMemorySessionStore::new()),
            catalog: Arc::new(InMemoryCatalog::new(sample.catalog.clone())),
            registry: Arc::new(InMemoryAllocationRegistry::new(allocations)),
            calendar: Arc::new(InMemoryCalendarService::new(Vec::new())),
            roster: Arc::new(InMemoryStudentRoster::new(students.clone())),
            logs: Arc::new(InMemorySessionLogRepository::new()),
            jobs: Arc::new(InMemoryImportJobRepository::new()),
            bus: Arc::new(InMemoryEventBus::new()),
            students: students.iter().map(|s| s.id).collect(),
            sample,
        }
    }

    pub async fn add_calendar(&self, entry_type: CalendarEntryType, date: NaiveDate, title: &str) {
        self.calendar
            .add(CalendarEntry::new(date, None, entry_type, title).unwrap())
            .await;
    }
}

pub(crate) fn metadata() -> CommandMetadata {
    CommandMetadata::test_fixture()
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Publisher that always fails.
pub(crate) struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _event: EventEnvelope) -> Result<(), DomainError> {
        Err(DomainError::new(
            ErrorCode::InternalError,
            "Simulated publish failure",
        ))
    }

    async fn publish_all(&self, _events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        Err(DomainError::new(
            ErrorCode::InternalError,
            "Simulated publish failure",
        ))
    }
}

/// Session store whose `create` fails on chosen calls (1-based).
pub(crate) struct FlakySessionStore {
    inner: InMemorySessionStore,
    fail_on: Vec<usize>,
    creates: AtomicUsize,
}

impl FlakySessionStore {
    pub fn failing_on(fail_on: Vec<usize>) -> Self {
        Self {
            inner: InMemorySessionStore::new(),
            fail_on,
            creates: AtomicUsize::new(0),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.len().await
    }
}

#[async_trait]
impl SessionStore for FlakySessionStore {
    async fn create(&self, session: &Session) -> Result<(), DomainError> {
        let call = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on.contains(&call) {
            return Err(DomainError::database("Simulated insert failure"));
        }
        self.inner.create(session).await
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        self.inner.update(session).await
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self, filter: &SessionFilter) -> Result<Vec<Session>, DomainError> {
        self.inner.list(filter).await
    }

    async fn transition(
        &self,
        id: &SessionId,
        action: LifecycleAction,
    ) -> Result<StatusTransition, DomainError> {
        self.inner.transition(id, action).await
    }
}
