//! Bulk import configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::memory::DEFAULT_MAX_JOBS;
use crate::domain::import::RowValidityPolicy;

const MAX_ROWS_LIMIT: usize = 10_000;

/// Import configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// Maximum data rows accepted in one upload
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Which conflicts make an import row invalid
    #[serde(default = "default_policy")]
    pub row_policy: String,

    /// Parsed jobs held for review; the oldest is evicted beyond this
    #[serde(default = "default_max_jobs")]
    pub max_jobs: usize,
}

impl ImportConfig {
    /// Parsed row validity policy
    pub fn policy(&self) -> Result<RowValidityPolicy, ValidationError> {
        self.row_policy
            .parse()
            .map_err(|_| ValidationError::InvalidPolicy(self.row_policy.clone()))
    }

    /// Validate import configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_rows == 0 || self.max_rows > MAX_ROWS_LIMIT {
            return Err(ValidationError::InvalidMaxRows);
        }
        if self.max_jobs == 0 {
            return Err(ValidationError::InvalidMaxJobs);
        }
        self.policy()?;
        Ok(())
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
            row_policy: default_policy(),
            max_jobs: default_max_jobs(),
        }
    }
}

fn default_max_rows() -> usize {
    500
}

fn default_max_jobs() -> usize {
    DEFAULT_MAX_JOBS
}

fn default_policy() -> String {
    RowValidityPolicy::default().as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_defaults() {
        let config = ImportConfig::default();
        assert_eq!(config.max_rows, 500);
        assert_eq!(config.policy().unwrap(), RowValidityPolicy::AdvisoryConflicts);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_rows_rejected() {
        let config = ImportConfig {
            max_rows: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidMaxRows)));
    }

    #[test]
    fn test_zero_jobs_rejected() {
        let config = ImportConfig {
            max_jobs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidMaxJobs)));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let config = ImportConfig {
            row_policy: "strictest".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPolicy(_))));
    }

    #[test]
    fn test_blocking_policy_parses() {
        let config = ImportConfig {
            row_policy: "block_all_conflicts".to_string(),
            ..Default::default()
        };
        assert_eq!(config.policy().unwrap(), RowValidityPolicy::BlockAllConflicts);
    }
}
