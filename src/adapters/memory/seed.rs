//! Seed data for running without a database.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::allocation::Allocation;
use crate::domain::calendar::CalendarEntry;
use crate::domain::catalog::{Catalog, Student};

/// Reference data the in-memory adapters start with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default)]
    pub allocations: Vec<Allocation>,
    #[serde(default)]
    pub calendar: Vec<CalendarEntry>,
    #[serde(default)]
    pub students: Vec<Student>,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid seed file: {0}")]
    Json(#[from] serde_json::Error),
}

impl SeedData {
    /// Reads a JSON seed file.
    pub async fn load(path: &Path) -> Result<Self, SeedError> {
        let bytes = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_default_to_empty() {
        let seed: SeedData = serde_json::from_str(r#"{"allocations": []}"#).unwrap();
        assert!(seed.catalog.boards.is_empty());
        assert!(seed.students.is_empty());
    }
}
