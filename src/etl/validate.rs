//! Pure validation of a raw batch
//!
//! Each rule contributes at most one finding for the whole dataset, in a
//! fixed order. Nothing here mutates the data or fails.

use serde::Serialize;
use std::collections::HashSet;

use crate::model::{parse_date_time, Dataset, Language, RawRecord};

/// Ordered findings of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    findings: Vec<String>,
}

impl ValidationReport {
    /// True when the dataset satisfies every rule
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn findings(&self) -> &[String] {
        &self.findings
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn into_findings(self) -> Vec<String> {
        self.findings
    }

    fn add_finding(&mut self, finding: String) {
        self.findings.push(finding);
    }

    fn check(&mut self, failed: bool, finding: impl FnOnce() -> String) {
        if failed {
            self.add_finding(finding());
        }
    }
}

/// Validate a raw batch against the post schema
pub fn validate(dataset: &Dataset<RawRecord>) -> ValidationReport {
    let mut report = ValidationReport::default();
    let rows = dataset.records();

    report.check(rows.iter().any(RawRecord::has_missing), || {
        "Dataset contains missing values.".to_string()
    });

    report.check(rows.iter().any(|r| is_blank(r.author.as_deref())), || {
        non_empty_text_finding("author")
    });
    report.check(rows.iter().any(|r| is_blank(r.content.as_deref())), || {
        non_empty_text_finding("content")
    });

    report.check(
        rows.iter()
            .filter_map(|r| r.date_time.as_deref())
            .any(|v| parse_date_time(v).is_none()),
        || "Column 'date_time' contains invalid datetime format.".to_string(),
    );

    report.check(has_duplicate_ids(rows), || {
        "Column 'id' should contain unique values.".to_string()
    });

    report.check(
        rows.iter().any(|r| {
            r.language
                .as_deref()
                .and_then(Language::from_code)
                .is_none()
        }),
        || "Column 'language' contains invalid language codes.".to_string(),
    );

    report.check(
        rows.iter()
            .filter_map(|r| r.latitude)
            .any(|v| !(-90.0..=90.0).contains(&v)),
        || out_of_range_finding("latitude"),
    );
    report.check(
        rows.iter()
            .filter_map(|r| r.longitude)
            .any(|v| !(-180.0..=180.0).contains(&v)),
        || out_of_range_finding("longitude"),
    );

    report.check(rows.iter().any(|r| !is_count(r.number_of_likes)), || {
        count_finding("number_of_likes")
    });
    report.check(rows.iter().any(|r| !is_count(r.number_of_shares)), || {
        count_finding("number_of_shares")
    });

    report
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn is_count(value: Option<f64>) -> bool {
    value.is_some_and(|v| v >= 0.0 && v.fract() == 0.0)
}

fn has_duplicate_ids(rows: &[RawRecord]) -> bool {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.iter()
        .filter_map(|r| r.id)
        .any(|id| !seen.insert(id))
}

fn non_empty_text_finding(column: &str) -> String {
    format!("Column '{}' should be non-empty strings.", column)
}

fn out_of_range_finding(column: &str) -> String {
    format!("Column '{}' contains out of range values.", column)
}

fn count_finding(column: &str) -> String {
    format!("Column '{}' should be non-negative integers.", column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_row(id: i64) -> RawRecord {
        RawRecord {
            id: Some(id),
            author: Some("ana".to_string()),
            content: Some("hola".to_string()),
            date_time: Some("08/11/2020 10:15".to_string()),
            language: Some("es".to_string()),
            latitude: Some(40.4),
            longitude: Some(-3.7),
            number_of_likes: Some(3.0),
            number_of_shares: Some(1.0),
        }
    }

    #[test]
    fn test_clean_dataset_has_empty_report() {
        let dataset = Dataset::new(vec![clean_row(1), clean_row(2)]);
        let report = validate(&dataset);
        assert!(report.is_clean());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn test_empty_dataset_is_clean() {
        assert!(validate(&Dataset::default()).is_clean());
    }

    #[test]
    fn test_findings_follow_rule_order() {
        let bad = RawRecord {
            id: Some(1),
            author: None,
            content: Some("hi".to_string()),
            date_time: Some("2020-11-08T23:10".to_string()),
            language: Some("xx".to_string()),
            latitude: Some(95.0),
            longitude: Some(-200.0),
            number_of_likes: None,
            number_of_shares: Some(-3.0),
        };
        let dataset = Dataset::new(vec![clean_row(1), bad]);

        let report = validate(&dataset);
        assert_eq!(
            report.findings(),
            &[
                "Dataset contains missing values.",
                "Column 'author' should be non-empty strings.",
                "Column 'date_time' contains invalid datetime format.",
                "Column 'id' should contain unique values.",
                "Column 'language' contains invalid language codes.",
                "Column 'latitude' contains out of range values.",
                "Column 'longitude' contains out of range values.",
                "Column 'number_of_likes' should be non-negative integers.",
                "Column 'number_of_shares' should be non-negative integers.",
            ]
        );
    }

    #[test]
    fn test_one_finding_per_rule_not_per_row() {
        let mut a = clean_row(1);
        let mut b = clean_row(2);
        a.latitude = Some(-91.0);
        b.latitude = Some(120.0);

        let report = validate(&Dataset::new(vec![a, b]));
        assert_eq!(
            report.findings(),
            &["Column 'latitude' contains out of range values."]
        );
    }

    #[test]
    fn test_whitespace_text_is_flagged_without_missing_values() {
        let mut row = clean_row(1);
        row.content = Some("   ".to_string());

        let report = validate(&Dataset::new(vec![row]));
        assert_eq!(
            report.findings(),
            &["Column 'content' should be non-empty strings."]
        );
    }

    #[test]
    fn test_fractional_counts_are_flagged() {
        let mut row = clean_row(1);
        row.number_of_shares = Some(2.5);

        let report = validate(&Dataset::new(vec![row]));
        assert_eq!(
            report.findings(),
            &["Column 'number_of_shares' should be non-negative integers."]
        );
    }

    #[test]
    fn test_boundaries_are_in_range() {
        let mut row = clean_row(1);
        row.latitude = Some(-90.0);
        row.longitude = Some(180.0);
        row.number_of_likes = Some(0.0);

        assert!(validate(&Dataset::new(vec![row])).is_clean());
    }

    #[test]
    fn test_validation_does_not_mutate() {
        let dataset = Dataset::new(vec![clean_row(1), clean_row(1)]);
        let before = dataset.clone();
        let _ = validate(&dataset);
        assert_eq!(dataset, before);
    }
}
