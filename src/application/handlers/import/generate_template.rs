//! GenerateTemplateHandler - Upload template and reference sheet.

use std::sync::Arc;

use crate::domain::import::{reference_csv, template_csv, ImportError};
use crate::ports::CatalogReader;

/// Which CSV document to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// The header row users fill in.
    Upload,
    /// Valid board, class, subject and teacher names.
    Reference,
}

impl TemplateKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateKind::Upload => "session_import_template.csv",
            TemplateKind::Reference => "session_import_reference.csv",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedTemplate {
    pub file_name: &'static str,
    pub content: Vec<u8>,
}

pub struct GenerateTemplateHandler {
    catalog: Arc<dyn CatalogReader>,
}

impl GenerateTemplateHandler {
    pub fn new(catalog: Arc<dyn CatalogReader>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self, kind: TemplateKind) -> Result<GeneratedTemplate, ImportError> {
        let content = match kind {
            TemplateKind::Upload => template_csv().await?,
            TemplateKind::Reference => reference_csv(&self.catalog.load().await?).await?,
        };
        Ok(GeneratedTemplate {
            file_name: kind.file_name(),
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Harness;

    #[tokio::test]
    async fn upload_template_is_the_header_row() {
        let h = Harness::new();
        let template = GenerateTemplateHandler::new(h.catalog.clone())
            .handle(TemplateKind::Upload)
            .await
            .unwrap();
        assert_eq!(
            String::from_utf8(template.content).unwrap(),
            "Date/Time,Board,Class,Subject,Duration (minutes),Teacher\n"
        );
    }

    #[tokio::test]
    async fn reference_lists_catalog_names() {
        let h = Harness::new();
        let template = GenerateTemplateHandler::new(h.catalog.clone())
            .handle(TemplateKind::Reference)
            .await
            .unwrap();
        let text = String::from_utf8(template.content).unwrap();
        assert!(text.contains("CBSE,Class 5B,Science,"));
        assert!(text.contains(",,,Ravi Kumar"));
        assert_eq!(template.file_name, "session_import_reference.csv");
    }
}
