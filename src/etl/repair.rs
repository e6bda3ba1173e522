//! Deterministic repair of a raw batch
//!
//! Rules run in a fixed order:
//! 1. fill missing cells (numbers with 0, text with [`PLACEHOLDER_TEXT`])
//! 2. parse `date_time` with [`DATE_TIME_FORMAT`]
//! 3. give every repeated id a fresh one
//! 4. replace unknown languages with the default
//! 5. clamp coordinates and counts into their ranges
//!
//! An unparsable timestamp is the only defect that cannot be corrected.

use chrono::NaiveDateTime;
use std::collections::HashSet;
use tracing::debug;

use crate::error::{ErrorCode, EtlError, Result};
use crate::model::{
    parse_date_time, Dataset, Language, RawRecord, Record, DATE_TIME_FORMAT, PLACEHOLDER_TEXT,
};

/// Row with every cell present, before type-specific corrections
struct Filled {
    id: i64,
    author: String,
    content: String,
    date_time: String,
    language: String,
    latitude: f64,
    longitude: f64,
    number_of_likes: f64,
    number_of_shares: f64,
}

/// Repair a raw batch into records that satisfy every schema invariant
pub fn repair(dataset: Dataset<RawRecord>) -> Result<Dataset<Record>> {
    let filled: Vec<Filled> = dataset.into_iter().map(fill_missing).collect();

    let timestamps = filled
        .iter()
        .enumerate()
        .map(|(index, f)| parse_timestamp(index + 1, &f.date_time))
        .collect::<Result<Vec<_>>>()?;

    let mut ids: Vec<i64> = filled.iter().map(|f| f.id).collect();
    let reassigned = resolve_duplicate_ids(&mut ids);
    if reassigned > 0 {
        debug!(reassigned, "Assigned fresh ids to duplicate rows");
    }

    let records = filled
        .into_iter()
        .zip(timestamps)
        .zip(ids)
        .map(|((f, date_time), id)| Record {
            id,
            author: f.author,
            content: f.content,
            date_time,
            language: normalize_language(&f.language),
            latitude: f.latitude.clamp(-90.0, 90.0),
            longitude: f.longitude.clamp(-180.0, 180.0),
            number_of_likes: to_count(f.number_of_likes),
            number_of_shares: to_count(f.number_of_shares),
        })
        .collect();

    Ok(records)
}

fn fill_missing(raw: RawRecord) -> Filled {
    Filled {
        id: raw.id.unwrap_or(0),
        author: fill_text(raw.author),
        content: fill_text(raw.content),
        date_time: fill_text(raw.date_time),
        language: fill_text(raw.language),
        latitude: raw.latitude.unwrap_or(0.0),
        longitude: raw.longitude.unwrap_or(0.0),
        number_of_likes: raw.number_of_likes.unwrap_or(0.0),
        number_of_shares: raw.number_of_shares.unwrap_or(0.0),
    }
}

fn fill_text(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => PLACEHOLDER_TEXT.to_string(),
    }
}

fn parse_timestamp(row: usize, value: &str) -> Result<NaiveDateTime> {
    parse_date_time(value).ok_or_else(|| {
        EtlError::repair_with_code(
            ErrorCode::REPAIR_UNPARSABLE_DATETIME,
            format!("date_time '{}' does not match '{}'", value, DATE_TIME_FORMAT),
            Some(row),
        )
    })
}

/// Keep the first occurrence of each id and renumber later repeats.
///
/// Fresh ids count up from one past the largest id, skipping any value
/// already present in the batch. Returns how many rows were renumbered.
pub fn resolve_duplicate_ids(ids: &mut [i64]) -> usize {
    let taken: HashSet<i64> = ids.iter().copied().collect();
    if taken.len() == ids.len() {
        return 0;
    }

    let mut seen = HashSet::with_capacity(ids.len());
    let mut next = ids.iter().copied().max().unwrap_or(0).wrapping_add(1);
    let mut reassigned = 0;

    for id in ids.iter_mut() {
        if seen.insert(*id) {
            continue;
        }
        while taken.contains(&next) || seen.contains(&next) {
            next = next.wrapping_add(1);
        }
        *id = next;
        seen.insert(next);
        next = next.wrapping_add(1);
        reassigned += 1;
    }

    reassigned
}

fn normalize_language(code: &str) -> Language {
    Language::from_code(code).unwrap_or_default()
}

// Truncates toward zero; negatives saturate at 0.
fn to_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.trunc() as u64
    } else {
        0
    }
}
