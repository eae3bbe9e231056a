//! Calendar service port (read-only).

use async_trait::async_trait;

use crate::domain::calendar::{CalendarEntry, DateRange};
use crate::domain::foundation::DomainError;

/// Read port for calendar exceptions.
#[async_trait]
pub trait CalendarService: Send + Sync {
    /// Entries whose inclusive range intersects `range`, any type.
    async fn list(&self, range: &DateRange) -> Result<Vec<CalendarEntry>, DomainError>;
}
