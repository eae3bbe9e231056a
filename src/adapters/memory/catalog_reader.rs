use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::catalog::Catalog;
use crate::domain::foundation::DomainError;
use crate::ports::CatalogReader;

/// Serves a fixed catalog, replaceable at runtime.
#[derive(Default)]
pub struct InMemoryCatalog {
    catalog: RwLock<Catalog>,
}

impl InMemoryCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
        }
    }

    pub async fn replace(&self, catalog: Catalog) {
        *self.catalog.write().await = catalog;
    }
}

#[async_trait]
impl CatalogReader for InMemoryCatalog {
    async fn load(&self) -> Result<Catalog, DomainError> {
        Ok(self.catalog.read().await.clone())
    }
}
