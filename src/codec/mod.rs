//! CSV encoding of the raw batch and of the hourly summary table
//!
//! Decoding is deliberately lenient at the cell level: an empty cell, or a
//! numeric cell that does not hold a finite number, becomes a missing value
//! for the validator and repairer to deal with. Structural problems (missing
//! header columns, ragged rows) are decode errors.

use csv::StringRecord;
use tracing::warn;

use crate::error::{ErrorCode, EtlError, Result};
use crate::model::{Dataset, HourlySummary, RawRecord, SUMMARY_HEADER};

/// Columns the raw batch header must contain (in any order)
pub const INPUT_COLUMNS: [&str; 9] = [
    "id",
    "author",
    "content",
    "date_time",
    "language",
    "latitude",
    "longitude",
    "number_of_likes",
    "number_of_shares",
];

/// Decode a raw CSV batch with a header row.
///
/// A body holding only whitespace decodes to an empty dataset.
pub fn decode_batch(bytes: &[u8]) -> Result<Dataset<RawRecord>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Dataset::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        records.push(columns.read(index + 1, &record));
    }

    Ok(Dataset::new(records))
}

/// Encode summary rows, always emitting the header
pub fn encode_summaries(rows: &[HourlySummary]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(SUMMARY_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.into_inner().map_err(|e| {
        EtlError::decode_with_code(ErrorCode::ENCODE_FAILED, e.to_string(), None)
    })
}

/// Decode a summary table previously written by [`encode_summaries`]
pub fn decode_summaries(bytes: &[u8]) -> Result<Vec<HourlySummary>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Positions of the input columns within one particular header
struct ColumnIndex {
    id: usize,
    author: usize,
    content: usize,
    date_time: usize,
    language: usize,
    latitude: usize,
    longitude: usize,
    number_of_likes: usize,
    number_of_shares: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| {
                    EtlError::decode_with_code(
                        ErrorCode::DECODE_MISSING_COLUMN,
                        format!("column '{}' not found in header", name),
                        None,
                    )
                })
        };

        Ok(Self {
            id: find("id")?,
            author: find("author")?,
            content: find("content")?,
            date_time: find("date_time")?,
            language: find("language")?,
            latitude: find("latitude")?,
            longitude: find("longitude")?,
            number_of_likes: find("number_of_likes")?,
            number_of_shares: find("number_of_shares")?,
        })
    }

    fn read(&self, row: usize, record: &StringRecord) -> RawRecord {
        RawRecord {
            id: integer_cell(row, "id", record.get(self.id)),
            author: text_cell(record.get(self.author)),
            content: text_cell(record.get(self.content)),
            date_time: text_cell(record.get(self.date_time)),
            language: text_cell(record.get(self.language)),
            latitude: number_cell(row, "latitude", record.get(self.latitude)),
            longitude: number_cell(row, "longitude", record.get(self.longitude)),
            number_of_likes: number_cell(row, "number_of_likes", record.get(self.number_of_likes)),
            number_of_shares: number_cell(
                row,
                "number_of_shares",
                record.get(self.number_of_shares),
            ),
        }
    }
}

// Whitespace-only text is kept as-is so validation can report it.
fn text_cell(cell: Option<&str>) -> Option<String> {
    cell.filter(|v| !v.is_empty()).map(str::to_string)
}

fn number_cell(row: usize, column: &str, cell: Option<&str>) -> Option<f64> {
    let value = cell.map(str::trim).filter(|v| !v.is_empty())?;
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            warn!(row, column, value, "Non-numeric cell treated as missing");
            None
        }
    }
}

fn integer_cell(row: usize, column: &str, cell: Option<&str>) -> Option<i64> {
    let value = cell.map(str::trim).filter(|v| !v.is_empty())?;
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 => Some(n as i64),
        _ => {
            warn!(row, column, value, "Non-integer cell treated as missing");
            None
        }
    }
}
