use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::StudentRecord;
use crate::normalize::{normalize, RawRow};

/// Reads a header-first CSV into raw rows keyed by column name.
///
/// Short rows simply lack the trailing columns. Cells that are not valid
/// UTF-8 are decoded lossily so the row, and every later row's ordinal, is
/// kept. A read error ends the roster at the rows read so far.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|column| String::from_utf8_lossy(column).into_owned())
        .collect();
    let mut rows = Vec::new();

    for result in reader.byte_records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                warn!(row = rows.len() + 1, error = %err, "stopped reading CSV at unreadable row");
                break;
            }
        };

        if std::str::from_utf8(record.as_slice()).is_err() {
            warn!(row = rows.len() + 1, "replacing invalid UTF-8 in CSV row");
        }

        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.clone(), String::from_utf8_lossy(value).into_owned()))
            .collect();
        rows.push(row);
    }

    debug!(rows = rows.len(), columns = headers.len(), "read roster rows");
    Ok(rows)
}

pub fn normalize_rows(rows: &[RawRow]) -> Vec<StudentRecord> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| normalize(row, index + 1))
        .collect()
}

pub fn try_load_students_from_reader<R: Read>(reader: R) -> Result<Vec<StudentRecord>> {
    let rows = read_rows(reader)?;
    Ok(normalize_rows(&rows))
}

pub fn try_load_students(csv_path: &Path) -> Result<Vec<StudentRecord>> {
    let file = std::fs::File::open(csv_path)?;
    let students = try_load_students_from_reader(file)?;
    info!(path = %csv_path.display(), students = students.len(), "loaded student roster");
    Ok(students)
}

/// Loads the roster, degrading to an empty collection when the source
/// cannot be read. Callers render an empty dashboard instead of failing.
pub fn load_students(csv_path: &Path) -> Vec<StudentRecord> {
    try_load_students(csv_path).unwrap_or_else(|err| {
        warn!(path = %csv_path.display(), error = %err, "failed to load student data");
        Vec::new()
    })
}

pub fn load_students_from_reader<R: Read>(reader: R) -> Vec<StudentRecord> {
    try_load_students_from_reader(reader).unwrap_or_else(|err| {
        warn!(error = %err, "failed to read student data");
        Vec::new()
    })
}
