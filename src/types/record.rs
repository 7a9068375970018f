//! Normalized attendance snapshot delivered by the extraction service
//!
//! The wire field names (`daily_attendance`, `subject_attendance`,
//! `timetable`) are fixed by the existing backend and must not change.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical weekday order used when rendering the weekly timetable
pub const WEEKDAY_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Per-subject attendance as reported by the extraction service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAttendance {
    /// Always `"<attended>/<total>"`
    pub count: String,

    /// Percentage string, or the literal `"N/A"` when not computed
    pub percentage: String,
}

/// Snapshot of a student's daily/subject attendance and weekly timetable
///
/// All three maps arrive verbatim from the login call. Key order within
/// the maps carries no meaning; display code re-sorts as needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Date label -> per-period status strings ("Present", "Absent",
    /// or a free-text placeholder), index 0..5 = period order
    #[serde(default)]
    pub daily_attendance: BTreeMap<String, Vec<String>>,

    /// Subject code -> attendance counts
    #[serde(default)]
    pub subject_attendance: BTreeMap<String, SubjectAttendance>,

    /// Weekday name -> ordered slot strings
    #[serde(default)]
    pub timetable: BTreeMap<String, Vec<String>>,
}

impl AttendanceRecord {
    /// Parse a record from the extraction service's JSON payload
    pub fn from_json(payload: &str) -> crate::Result<Self> {
        serde_json::from_str(payload).map_err(Into::into)
    }

    /// Daily-attendance labels ordered by their embedded numeric token
    ///
    /// Wire key order is insignificant; "Day 10" must sort after
    /// "Day 2". Labels without a numeric token sort last, by name.
    pub fn sorted_daily_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.daily_attendance.keys().map(String::as_str).collect();
        labels.sort_by_key(|label| (numeric_token(label).unwrap_or(u64::MAX), *label));
        labels
    }

    /// Timetable lookup by weekday name, case-insensitive
    ///
    /// Returns the stored key (preserving the backend's casing) along
    /// with the day's slots.
    pub fn day_slots(&self, day: &str) -> Option<(&str, &[String])> {
        self.timetable
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(day))
            .map(|(key, slots)| (key.as_str(), slots.as_slice()))
    }

    /// Timetable days in canonical Monday..Sunday order
    ///
    /// Days the backend sent that are not recognizable weekday names
    /// are appended after the known ones, in map order.
    pub fn ordered_timetable_days(&self) -> Vec<&str> {
        let mut days: Vec<&str> = self.timetable.keys().map(String::as_str).collect();
        days.sort_by_key(|day| {
            WEEKDAY_ORDER
                .iter()
                .position(|known| known.eq_ignore_ascii_case(day))
                .unwrap_or(WEEKDAY_ORDER.len())
        });
        days
    }
}

/// First run of ASCII digits embedded in a label, if any
fn numeric_token(label: &str) -> Option<u64> {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_days(labels: &[&str]) -> AttendanceRecord {
        let mut record = AttendanceRecord::default();
        for label in labels {
            record
                .daily_attendance
                .insert(label.to_string(), vec!["Present".to_string()]);
        }
        record
    }

    #[test]
    fn test_wire_field_names_roundtrip() {
        let payload = r#"{
            "daily_attendance": {"Day 1": ["Present", "Absent"]},
            "subject_attendance": {"CS101": {"count": "18/20", "percentage": "90%"}},
            "timetable": {"Tuesday": ["CS101 - Data Structures", "No Class"]}
        }"#;

        let record = AttendanceRecord::from_json(payload).unwrap();
        assert_eq!(record.daily_attendance["Day 1"].len(), 2);
        assert_eq!(record.subject_attendance["CS101"].count, "18/20");
        assert_eq!(record.timetable["Tuesday"][0], "CS101 - Data Structures");

        let serialized = serde_json::to_string(&record).unwrap();
        assert!(serialized.contains("daily_attendance"));
        assert!(serialized.contains("subject_attendance"));
        assert!(serialized.contains("timetable"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let record = AttendanceRecord::from_json(r#"{"timetable": {}}"#).unwrap();
        assert!(record.daily_attendance.is_empty());
        assert!(record.subject_attendance.is_empty());
    }

    #[test]
    fn test_daily_labels_sort_by_numeric_token() {
        let record = record_with_days(&["Day 10", "Day 2", "Day 1"]);
        assert_eq!(record.sorted_daily_labels(), vec!["Day 1", "Day 2", "Day 10"]);
    }

    #[test]
    fn test_daily_labels_without_token_sort_last() {
        let record = record_with_days(&["Holiday", "Day 3", "Day 12"]);
        assert_eq!(
            record.sorted_daily_labels(),
            vec!["Day 3", "Day 12", "Holiday"]
        );
    }

    #[test]
    fn test_day_slots_is_case_insensitive() {
        let mut record = AttendanceRecord::default();
        record
            .timetable
            .insert("Tuesday".to_string(), vec!["A".to_string()]);

        let (key, slots) = record.day_slots("tuesday").unwrap();
        assert_eq!(key, "Tuesday");
        assert_eq!(slots, ["A".to_string()]);
        assert!(record.day_slots("sunday").is_none());
    }

    #[test]
    fn test_timetable_days_in_weekday_order() {
        let mut record = AttendanceRecord::default();
        for day in ["Wednesday", "Monday", "Friday"] {
            record.timetable.insert(day.to_string(), vec![]);
        }
        assert_eq!(
            record.ordered_timetable_days(),
            vec!["Monday", "Wednesday", "Friday"]
        );
    }
}
