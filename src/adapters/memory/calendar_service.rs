use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::calendar::{CalendarEntry, DateRange};
use crate::domain::foundation::DomainError;
use crate::ports::CalendarService;

/// In-memory calendar of exception entries.
#[derive(Default)]
pub struct InMemoryCalendarService {
    entries: RwLock<Vec<CalendarEntry>>,
}

impl InMemoryCalendarService {
    pub fn new(entries: Vec<CalendarEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub async fn add(&self, entry: CalendarEntry) {
        self.entries.write().await.push(entry);
    }
}

#[async_trait]
impl CalendarService for InMemoryCalendarService {
    async fn list(&self, range: &DateRange) -> Result<Vec<CalendarEntry>, DomainError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.range().intersects(range))
            .cloned()
            .collect())
    }
}
