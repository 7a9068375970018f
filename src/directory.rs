//! Subject directory derived from timetable slot strings
//!
//! Slot strings look like `"CS101 - Data Structures [Theory]"`: a
//! leading alphabetic+digit code, a dash separator, then the display
//! name up to an optional bracketed qualifier. The directory is the
//! code -> name lookup built once per attendance record; it is derived,
//! read-only, and recomputed whenever the record changes.

use std::collections::BTreeMap;

use crate::types::AttendanceRecord;

/// Code -> display-name lookup for timetabled subjects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectDirectory {
    entries: BTreeMap<String, String>,
}

impl SubjectDirectory {
    /// Build the directory by scanning every slot of every day
    ///
    /// The first parseable occurrence of a code wins; later slots for
    /// the same code (labs, repeated periods) do not overwrite it.
    pub fn from_record(record: &AttendanceRecord) -> Self {
        let mut entries = BTreeMap::new();
        for slots in record.timetable.values() {
            for slot in slots {
                if let Some((code, name)) = parse_slot(slot) {
                    entries.entry(code).or_insert(name);
                }
            }
        }
        SubjectDirectory { entries }
    }

    /// Display name for a subject code, if the timetable mentions it
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extract `(code, name)` from a single slot string
///
/// Returns `None` for empty slots, `"No Class"` markers, and anything
/// not matching the `<LETTERS><DIGITS> - <name>` shape.
fn parse_slot(slot: &str) -> Option<(String, String)> {
    let slot = slot.trim();
    if slot.is_empty() || slot.eq_ignore_ascii_case("no class") {
        return None;
    }

    let alpha = slot.chars().take_while(|c| c.is_ascii_alphabetic()).count();
    if alpha == 0 {
        return None;
    }
    let digits = slot[alpha..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }

    let code = &slot[..alpha + digits];
    let rest = slot[alpha + digits..].trim_start().strip_prefix('-')?;

    // Name runs up to an optional bracketed qualifier
    let name = match rest.find('[') {
        Some(open) => &rest[..open],
        None => rest,
    };
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    Some((code.to_string(), name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_slot() {
        assert_eq!(
            parse_slot("CS101 - Data Structures"),
            Some(("CS101".to_string(), "Data Structures".to_string()))
        );
    }

    #[test]
    fn test_parse_strips_bracketed_qualifier() {
        assert_eq!(
            parse_slot("MA202 - Linear Algebra [Theory] Room 4"),
            Some(("MA202".to_string(), "Linear Algebra".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_no_class_and_empty() {
        assert_eq!(parse_slot(""), None);
        assert_eq!(parse_slot("  "), None);
        assert_eq!(parse_slot("No Class"), None);
        assert_eq!(parse_slot("no class"), None);
    }

    #[test]
    fn test_parse_rejects_missing_code_or_name() {
        assert_eq!(parse_slot("Data Structures"), None);
        assert_eq!(parse_slot("101 - Numbers First"), None);
        assert_eq!(parse_slot("CS101 -"), None);
        assert_eq!(parse_slot("CS101 Data Structures"), None);
    }

    #[test]
    fn test_directory_from_record_first_occurrence_wins() {
        let mut record = AttendanceRecord::default();
        record.timetable.insert(
            "Monday".to_string(),
            vec![
                "CS101 - Data Structures".to_string(),
                "No Class".to_string(),
                "CS101 - Data Structures Lab".to_string(),
            ],
        );
        record.timetable.insert(
            "Tuesday".to_string(),
            vec!["PH100 - Physics [Theory]".to_string()],
        );

        let directory = SubjectDirectory::from_record(&record);
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.name_of("CS101"), Some("Data Structures"));
        assert_eq!(directory.name_of("PH100"), Some("Physics"));
        assert!(!directory.contains("EE205"));
    }

    #[test]
    fn test_empty_timetable_gives_empty_directory() {
        let directory = SubjectDirectory::from_record(&AttendanceRecord::default());
        assert!(directory.is_empty());
    }
}
