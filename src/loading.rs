
use crate::entities::ImpactedRecord;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::PrimitiveDateTime;

const APPOINTMENT_ID_COLUMN: &str = "APPOINTMENT_ID";
const REQUEST_ID_COLUMN: &str = "REQUEST_ID";
const TIMESTAMP_UTC_COLUMN: &str = "TIMESTAMP_UTC";

#[derive(Debug)]
pub enum LoadingError {
    FileAccessError(String),
    EmptyFile(String),
    MalformedDataError(String),
}

/// Column positions resolved from the header row. A repeated header resolves to
/// its last occurrence. A column absent from the header only becomes an error
/// once a data row needs it.
struct ColumnIndices {
    appointment_id: Option<usize>,
    request_id: Option<usize>,
    timestamp_utc: Option<usize>,
}

impl ColumnIndices {
    fn from_headers(headers: &StringRecord) -> ColumnIndices {
        let position = |name: &str| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, header)| *header == name)
                .map(|(index, _)| index)
                .last()
        };
        ColumnIndices {
            appointment_id: position(APPOINTMENT_ID_COLUMN),
            request_id: position(REQUEST_ID_COLUMN),
            timestamp_utc: position(TIMESTAMP_UTC_COLUMN),
        }
    }
}

pub fn read_impacted_records(csv_path: &Path) -> Result<Vec<ImpactedRecord>, LoadingError> {
    let file = File::open(csv_path).map_err(|e| {
        LoadingError::FileAccessError(format!(
            "Error opening file {}:\n{:?}",
            csv_path.display(),
            e
        ))
    })?;
    parse_impacted_records(file)
}

pub fn parse_impacted_records<R: Read>(source: R) -> Result<Vec<ImpactedRecord>, LoadingError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(source);
    let headers = reader
        .headers()
        .map_err(|e| LoadingError::MalformedDataError(format!("Error reading CSV header:\n{:?}", e)))?
        .clone();
    if headers.is_empty() {
        return Err(LoadingError::EmptyFile(String::from("CSV file is empty")));
    }
    let columns = ColumnIndices::from_headers(&headers);
    let mut impacted_records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| {
            LoadingError::MalformedDataError(format!("Error reading CSV row {}:\n{:?}", row, e))
        })?;
        impacted_records.push(create_impacted_record(&record, &columns, row)?);
    }
    Ok(impacted_records)
}

fn create_impacted_record(
    record: &StringRecord,
    columns: &ColumnIndices,
    row: usize,
) -> Result<ImpactedRecord, LoadingError> {
    let appointment_id = _get_field(record, columns.appointment_id, APPOINTMENT_ID_COLUMN, row)?;
    if appointment_id.is_empty() {
        return Err(LoadingError::MalformedDataError(format!(
            "{} is empty in row {}",
            APPOINTMENT_ID_COLUMN, row
        )));
    }
    let request_id = _get_field(record, columns.request_id, REQUEST_ID_COLUMN, row)?;
    let request_id = request_id.trim().parse::<i64>().map_err(|e| {
        LoadingError::MalformedDataError(format!(
            "invalid {} format in row {} ({:?}): {:?}",
            REQUEST_ID_COLUMN, row, request_id, e
        ))
    })?;
    let timestamp = _get_field(record, columns.timestamp_utc, TIMESTAMP_UTC_COLUMN, row)?;
    let event_timestamp = _to_rfc3339(timestamp).map_err(|e| {
        LoadingError::MalformedDataError(format!(
            "error parsing timestamp in row {} ({:?}): {}",
            row, timestamp, e
        ))
    })?;
    Ok(ImpactedRecord {
        appointment_id: String::from(appointment_id),
        request_id,
        event_timestamp,
    })
}

fn _get_field<'r>(
    record: &'r StringRecord,
    column: Option<usize>,
    column_name: &str,
    row: usize,
) -> Result<&'r str, LoadingError> {
    column
        .and_then(|index| record.get(index))
        .ok_or_else(|| {
            LoadingError::MalformedDataError(format!(
                "{} field missing from record in row {}",
                column_name, row
            ))
        })
}

/// Reads `YYYY-MM-DD HH:MM:SS` as a UTC instant and renders it as RFC 3339.
fn _to_rfc3339(timestamp: &str) -> Result<String, String> {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let date_time = PrimitiveDateTime::parse(timestamp, &format).map_err(|e| format!("{:?}", e))?;
    date_time
        .assume_utc()
        .format(&Rfc3339)
        .map_err(|e| format!("{:?}", e))
}
