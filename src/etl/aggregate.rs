//! Hour-of-day aggregation of repaired records

use chrono::Timelike;
use std::collections::{BTreeMap, HashMap};

use crate::model::{Dataset, HourlySummary, Record};

/// Group records by the hour of their timestamp and summarise each group.
///
/// Rows come out in ascending hour order. Averages are rounded to
/// `decimals` places with round-half-to-even.
pub fn aggregate(dataset: &Dataset<Record>, decimals: u32) -> Vec<HourlySummary> {
    let mut groups: BTreeMap<u32, Vec<&Record>> = BTreeMap::new();
    for record in dataset {
        groups
            .entry(record.date_time.hour())
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .map(|(hour, records)| {
            let likes: Vec<f64> = records.iter().map(|r| r.number_of_likes as f64).collect();
            let shares: Vec<f64> = records.iter().map(|r| r.number_of_shares as f64).collect();
            HourlySummary {
                hour,
                avg_likes: mean_rounded(&likes, decimals),
                avg_shares: mean_rounded(&shares, decimals),
                dominant_author: mode(records.iter().map(|r| r.author.as_str())),
                records: records.len(),
            }
        })
        .collect()
}

/// Arithmetic mean rounded half-to-even; NaN for an empty slice
pub fn mean_rounded(values: &[f64], decimals: u32) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    round_half_even(mean, decimals)
}

pub fn round_half_even(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Most frequent value; ties go to the value seen first
pub fn mode<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for value in values {
        match index.get(value) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(value, order.len());
                order.push((value, 1));
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in order {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}
