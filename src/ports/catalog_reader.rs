//! Catalog reader port.
//!
//! The catalog is maintained by another system; this core only reads it
//! to resolve names and check the subject hierarchy.

use async_trait::async_trait;

use crate::domain::catalog::Catalog;
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// A point-in-time copy of the whole catalog.
    async fn load(&self) -> Result<Catalog, DomainError>;
}
