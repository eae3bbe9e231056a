//! CSV upload reader and cell parsers.

use chrono::NaiveDateTime;
use csv_async::{AsyncReaderBuilder, ByteRecord, Trim};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;

use super::template::IMPORT_HEADER;
use super::{ImportError, RowError};

/// Longest accepted session, in minutes.
pub const MAX_DURATION_MINUTES: i64 = 600;

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%d/%m/%Y %H:%M"];

/// Row field names, in column order.
const FIELDS: [&str; 6] = [
    "date_time",
    "board",
    "class",
    "subject",
    "duration_minutes",
    "teacher",
];

/// One upload row as text, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawImportRow {
    /// 1-based data row number (the header is row 0).
    pub row_number: u32,
    pub date_time: String,
    pub board: String,
    pub class: String,
    pub subject: String,
    pub duration_minutes: String,
    pub teacher: String,
    /// First cell that was not valid UTF-8; such cells are decoded lossily.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_error: Option<RowError>,
}

impl RawImportRow {
    fn from_record(row_number: u32, record: &ByteRecord) -> Self {
        let mut encoding_error = None;
        let decoded: Vec<String> = FIELDS
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let bytes = record.get(i).unwrap_or_default();
                std::str::from_utf8(bytes).map(str::to_string).unwrap_or_else(|_| {
                    encoding_error
                        .get_or_insert_with(|| RowError::validation(*field, "is not valid UTF-8"));
                    String::from_utf8_lossy(bytes).into_owned()
                })
            })
            .collect();
        let mut cells = decoded.into_iter();
        let mut cell = || cells.next().unwrap_or_default();

        Self {
            row_number,
            date_time: cell(),
            board: cell(),
            class: cell(),
            subject: cell(),
            duration_minutes: cell(),
            teacher: cell(),
            encoding_error,
        }
    }
}

/// Reads every data row of an upload.
///
/// Short rows are padded with blanks and undecodable cells are flagged on
/// their row, so each row fails on its own rather than failing the file.
///
/// # Errors
///
/// - `Csv` if the header itself cannot be read
/// - `HeaderMismatch` if the header is not exactly the template header
/// - `Empty` if there are no data rows
/// - `TooManyRows` if there are more than `max_rows` data rows
pub async fn read_rows<R>(reader: R, max_rows: usize) -> Result<Vec<RawImportRow>, ImportError>
where
    R: AsyncRead + Unpin + Send,
{
    let mut csv_reader = AsyncReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .create_reader(reader);

    let headers = csv_reader.headers().await?.clone();
    if !headers.iter().eq(IMPORT_HEADER.iter().copied()) {
        return Err(ImportError::HeaderMismatch {
            expected: IMPORT_HEADER.join(","),
            actual: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut rows = Vec::new();
    let mut records = csv_reader.byte_records();
    let mut row_number = 0u32;
    while let Some(record) = records.next().await {
        let record = record?;
        row_number += 1;
        if record.iter().all(<[u8]>::is_empty) {
            continue;
        }
        if rows.len() == max_rows {
            return Err(ImportError::TooManyRows { max: max_rows });
        }
        rows.push(RawImportRow::from_record(row_number, &record));
    }

    if rows.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(rows)
}

/// School-local date and time from a Date/Time cell.
pub fn parse_local_date_time(cell: &str) -> Result<NaiveDateTime, RowError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Err(RowError::validation("date_time", "is required"));
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(cell, fmt).ok())
        .ok_or_else(|| {
            RowError::validation(
                "date_time",
                format!("'{}' is not YYYY-MM-DD HH:MM or DD/MM/YYYY HH:MM", cell),
            )
        })
}

/// Positive whole minutes, at most `MAX_DURATION_MINUTES`.
pub fn parse_duration_minutes(cell: &str) -> Result<i64, RowError> {
    let cell = cell.trim();
    let minutes: i64 = cell.parse().map_err(|_| {
        RowError::validation("duration_minutes", format!("'{}' is not a whole number", cell))
    })?;
    if !(1..=MAX_DURATION_MINUTES).contains(&minutes) {
        return Err(RowError::validation(
            "duration_minutes",
            format!("must be between 1 and {}, got {}", MAX_DURATION_MINUTES, minutes),
        ));
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HEADER: &str = "Date/Time,Board,Class,Subject,Duration (minutes),Teacher\n";

    async fn read(body: &str, max_rows: usize) -> Result<Vec<RawImportRow>, ImportError> {
        read_rows(body.as_bytes(), max_rows).await
    }

    #[tokio::test]
    async fn reads_rows_with_numbers_and_trimmed_cells() {
        let body = format!(
            "{}2026-01-05 09:00, CBSE ,Class 5B,Science,45,\n2026-01-05 10:00,CBSE,Class 5B,Maths,40,Ravi Kumar\n",
            HEADER
        );
        let rows = read(&body, 10).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_number, 1);
        assert_eq!(rows[0].board, "CBSE");
        assert_eq!(rows[0].teacher, "");
        assert_eq!(rows[1].row_number, 2);
        assert_eq!(rows[1].teacher, "Ravi Kumar");
    }

    #[tokio::test]
    async fn short_rows_are_padded() {
        let body = format!("{}2026-01-05 09:00,CBSE\n", HEADER);
        let rows = read(&body, 10).await.unwrap();
        assert_eq!(rows[0].subject, "");
        assert_eq!(rows[0].duration_minutes, "");
    }

    #[tokio::test]
    async fn undecodable_cell_flags_only_its_row() {
        let mut body = HEADER.as_bytes().to_vec();
        body.extend_from_slice(b"2026-01-05 09:00,CBSE,Class 5B,Science,45,\n");
        body.extend_from_slice(b"2026-01-05 10:00,CBSE,Class 5B,Sci\xFFence,45,\n");
        body.extend_from_slice(b"2026-01-05 11:00,CBSE,Class 5B,Maths,45,\n");

        let rows = read_rows(body.as_slice(), 10).await.unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].encoding_error.is_none());
        assert_eq!(rows[1].encoding_error, Some(RowError::validation("subject", "is not valid UTF-8")));
        assert_eq!(rows[1].subject, "Sci\u{FFFD}ence");
        assert!(rows[2].encoding_error.is_none());
    }

    #[tokio::test]
    async fn wrong_header_fails_the_file() {
        let err = read("Date,Board,Class,Subject,Duration,Teacher\nx,x,x,x,x,x\n", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::HeaderMismatch { .. }));
    }

    #[tokio::test]
    async fn header_only_upload_is_empty() {
        assert!(matches!(read(HEADER, 10).await.unwrap_err(), ImportError::Empty));
    }

    #[tokio::test]
    async fn row_limit_is_enforced() {
        let body = format!(
            "{}2026-01-05 09:00,CBSE,Class 5B,Science,45,\n2026-01-05 10:00,CBSE,Class 5B,Science,45,\n",
            HEADER
        );
        assert!(matches!(
            read(&body, 1).await.unwrap_err(),
            ImportError::TooManyRows { max: 1 }
        ));
    }

    #[test]
    fn accepts_three_date_time_layouts() {
        let expected = NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        for cell in ["2026-01-05 14:30", "2026-01-05T14:30", "05/01/2026 14:30"] {
            assert_eq!(parse_local_date_time(cell), Ok(expected), "{}", cell);
        }
    }

    #[test]
    fn rejects_unparsable_date_time() {
        assert!(parse_local_date_time("tomorrow").is_err());
        assert!(parse_local_date_time("2026-13-01 09:00").is_err());
        assert_eq!(parse_local_date_time("").unwrap_err().field(), "date_time");
    }

    #[test]
    fn duration_must_be_positive_whole_minutes() {
        assert_eq!(parse_duration_minutes(" 45 "), Ok(45));
        assert!(parse_duration_minutes("0").is_err());
        assert!(parse_duration_minutes("45.5").is_err());
        assert!(parse_duration_minutes("601").is_err());
    }
}
