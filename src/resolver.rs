//! Local intent resolver
//!
//! Routes a free-text question against the attendance data model and
//! either answers directly or reports that no local answer exists. The
//! caller decides what to do with a miss; in the assistant that means
//! one call to the generative backend.
//!
//! Branch order is part of the contract and must not be reordered:
//! no-data short-circuit, timetable, subject attendance, daily status,
//! help, miss. A timetable-keyword query with no recognizable weekday
//! produces no answer and falls through.

use crate::directory::SubjectDirectory;
use crate::types::AttendanceRecord;

/// Outcome of a resolution attempt
///
/// `NoLocalMatch` is a value, not an error: it distinguishes "don't
/// know" from "failed" and forces callers to handle the fallback path
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Answer(String),
    NoLocalMatch,
}

/// Full English weekday names scanned for in queries
pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Reply when no attendance record is loaded at all
pub const NO_DATA_REPLY: &str =
    "Sorry, I don't have access to your attendance data right now.";

/// Fixed capability description for help queries
pub const HELP_REPLY: &str = "I can help you with information about your timetable, \
attendance, and academic records. Try asking questions like 'What's my 3rd hour on \
Tuesday?' or 'What's my attendance for Mathematics?'";

/// Resolve a query against the data model
///
/// Purely a function of its inputs: no state between calls, no side
/// effects, synchronous.
pub fn resolve(
    query: &str,
    record: Option<&AttendanceRecord>,
    directory: &SubjectDirectory,
) -> Resolution {
    let query = query.trim().to_lowercase();

    let Some(record) = record else {
        return Resolution::Answer(NO_DATA_REPLY.to_string());
    };

    if let Some(answer) = timetable_answer(&query, record) {
        return Resolution::Answer(answer);
    }

    if let Some(answer) = attendance_answer(&query, record, directory) {
        return Resolution::Answer(answer);
    }

    if let Some(answer) = daily_status_answer(&query, record) {
        return Resolution::Answer(answer);
    }

    if query.contains("help") || query.contains("what can you do") {
        return Resolution::Answer(HELP_REPLY.to_string());
    }

    Resolution::NoLocalMatch
}

/// Timetable branch: day schedules and single-hour lookups
fn timetable_answer(query: &str, record: &AttendanceRecord) -> Option<String> {
    let triggered = ["timetable", "schedule", "class", "hour"]
        .iter()
        .any(|keyword| query.contains(keyword));
    if !triggered {
        return None;
    }

    // A day-less timetable query yields nothing here; the remaining
    // branches (and ultimately the generative fallback) get their turn.
    let day = WEEKDAYS.iter().find(|day| query.contains(**day))?;
    let (_, slots) = record.day_slots(day)?;
    let display_day = capitalize(day);

    if let Some((matched, ordinal)) = parse_hour_ordinal(query) {
        return Some(match ordinal.checked_sub(1) {
            Some(index) if index < slots.len() => {
                format!("Your {} on {} is {}.", matched, display_day, slots[index])
            }
            _ => format!(
                "I don't have information about that hour on {}.",
                display_day
            ),
        });
    }

    let listing = slots
        .iter()
        .enumerate()
        .map(|(index, slot)| format!("{}. {}", index + 1, slot))
        .collect::<Vec<_>>()
        .join("\n");
    Some(format!("Your schedule for {} is:\n{}", display_day, listing))
}

/// Subject-attendance branch: one subject, or the full breakdown
fn attendance_answer(
    query: &str,
    record: &AttendanceRecord,
    directory: &SubjectDirectory,
) -> Option<String> {
    if !query.contains("attendance") || record.subject_attendance.is_empty() {
        return None;
    }

    // Subject code mentioned directly
    if let Some((code, attendance)) = record
        .subject_attendance
        .iter()
        .find(|(code, _)| query.contains(&code.to_lowercase()))
    {
        return Some(format!(
            "Your attendance for {} is {}.",
            code, attendance.percentage
        ));
    }

    // Display name mentioned; resolve it back to a code through the
    // directory ("attendance for Mathematics")
    if let Some((code, name)) = directory.iter().find(|(code, name)| {
        query.contains(&name.to_lowercase()) && record.subject_attendance.contains_key(*code)
    }) {
        let attendance = &record.subject_attendance[code];
        return Some(format!(
            "Your attendance for {} ({}) is {}.",
            code, name, attendance.percentage
        ));
    }

    let breakdown = record
        .subject_attendance
        .iter()
        .map(|(code, attendance)| format!("{}: {}", code, attendance.percentage))
        .collect::<Vec<_>>()
        .join("\n");
    Some(format!("Here's your attendance breakdown:\n{}", breakdown))
}

/// Daily-status branch: every date's period statuses
fn daily_status_answer(query: &str, record: &AttendanceRecord) -> Option<String> {
    let triggered = query.contains("present")
        || query.contains("absent")
        || query.contains("daily attendance");
    if !triggered || record.daily_attendance.is_empty() {
        return None;
    }

    let summary = record
        .sorted_daily_labels()
        .into_iter()
        .map(|label| format!("{}: {}", label, record.daily_attendance[label].join(", ")))
        .collect::<Vec<_>>()
        .join("\n");
    Some(format!("Here's your daily attendance record:\n{}", summary))
}

/// Find `"<N><st|nd|rd|th>? hour"` in a query
///
/// Returns the matched text (as the reply echoes it) and N.
fn parse_hour_ordinal(query: &str) -> Option<(String, usize)> {
    let bytes = query.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        if !bytes[pos].is_ascii_digit() {
            pos += 1;
            continue;
        }

        let digits_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let digits_end = pos;

        let mut cursor = digits_end;
        for suffix in ["st", "nd", "rd", "th"] {
            if query[cursor..].starts_with(suffix) {
                cursor += suffix.len();
                break;
            }
        }
        let after_suffix = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
            cursor += 1;
        }

        if query[cursor..].starts_with("hour") {
            let ordinal: usize = query[digits_start..digits_end].parse().ok()?;
            let matched = query[digits_start..cursor + "hour".len()].to_string();
            return Some((matched, ordinal));
        }

        pos = after_suffix.max(digits_end);
    }

    None
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
