//! Import template and reference sheet.

use csv_async::AsyncWriterBuilder;

use crate::domain::catalog::Catalog;

use super::ImportError;

/// Column headers shared by the template and the parser.
pub const IMPORT_HEADER: [&str; 6] = [
    "Date/Time",
    "Board",
    "Class",
    "Subject",
    "Duration (minutes)",
    "Teacher",
];

/// Columns of the reference sheet.
pub const REFERENCE_HEADER: [&str; 4] = ["Board", "Class", "Subject", "Teacher"];

/// Empty upload template: the header row only.
pub async fn template_csv() -> Result<Vec<u8>, ImportError> {
    let mut buf = Vec::new();
    {
        let mut writer = AsyncWriterBuilder::new().create_writer(&mut buf);
        writer.write_record(&IMPORT_HEADER).await?;
        writer.flush().await?;
    }
    Ok(buf)
}

/// Valid names for the template's reference columns.
///
/// One row per board/class/subject combination, then one row per teacher
/// with only the Teacher column filled.
pub async fn reference_csv(catalog: &Catalog) -> Result<Vec<u8>, ImportError> {
    let mut buf = Vec::new();
    {
        let mut writer = AsyncWriterBuilder::new().create_writer(&mut buf);
        writer.write_record(&REFERENCE_HEADER).await?;
        for board in &catalog.boards {
            for class in catalog.classes_of(&board.id) {
                let class_name = class.display_name();
                for subject in catalog.subjects_of(&class.id) {
                    writer
                        .write_record(&[board.name.as_str(), class_name.as_str(), subject.name.as_str(), ""])
                        .await?;
                }
            }
        }
        for teacher in &catalog.teachers {
            writer
                .write_record(&["", "", "", teacher.name.as_str()])
                .await?;
        }
        writer.flush().await?;
    }
    Ok(buf)
}
