//! Chat session state
//!
//! Holds the transcript, the loaded attendance record with its derived
//! subject directory, and the session-local activity points profile.
//! Everything lives in memory and dies with the session.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::directory::SubjectDirectory;
use crate::types::{AttendanceRecord, UserProfile};

/// Maximum number of messages kept in the transcript
const MAX_TRANSCRIPT: usize = 1000;

/// Who produced a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// One transcript entry
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub timestamp: u64,
}

/// Session state for one chat
pub struct ChatSession {
    username: String,
    messages: VecDeque<ChatMessage>,
    record: Option<AttendanceRecord>,
    directory: SubjectDirectory,
    profile: UserProfile,
    session_start: u64,
}

impl ChatSession {
    /// Create a session; the directory is derived from the record once
    /// here and only recomputed when the record changes
    pub fn new(username: String, record: Option<AttendanceRecord>) -> Self {
        let directory = record
            .as_ref()
            .map(SubjectDirectory::from_record)
            .unwrap_or_default();

        ChatSession {
            username,
            messages: VecDeque::with_capacity(64),
            record,
            directory,
            profile: UserProfile::new(),
            session_start: now(),
        }
    }

    /// Greeting shown (and recorded) when the chat opens
    pub fn greeting(&self) -> String {
        let name = if self.username.is_empty() {
            "there"
        } else {
            &self.username
        };
        format!(
            "Hello {}! I'm your AURA assistant. Ask me questions about your timetable, \
             attendance, or anything else about your academic information.",
            name
        )
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn record(&self) -> Option<&AttendanceRecord> {
        self.record.as_ref()
    }

    pub fn directory(&self) -> &SubjectDirectory {
        &self.directory
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut UserProfile {
        &mut self.profile
    }

    /// Replace the attendance record, rederiving the subject directory
    pub fn set_record(&mut self, record: Option<AttendanceRecord>) {
        self.directory = record
            .as_ref()
            .map(SubjectDirectory::from_record)
            .unwrap_or_default();
        self.record = record;
    }

    pub fn record_user(&mut self, text: String) {
        self.push(Sender::User, text);
    }

    pub fn record_assistant(&mut self, text: String) {
        self.push(Sender::Assistant, text);
    }

    fn push(&mut self, sender: Sender, text: String) {
        if self.messages.len() >= MAX_TRANSCRIPT {
            self.messages.pop_front();
        }
        self.messages.push_back(ChatMessage {
            sender,
            text,
            timestamp: now(),
        });
    }

    /// Most recent messages, oldest first
    pub fn recent(&self, limit: usize) -> Vec<&ChatMessage> {
        let skip = self.messages.len().saturating_sub(limit);
        self.messages.iter().skip(skip).collect()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Clear the transcript; the record and profile survive a reset
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    pub fn session_start(&self) -> u64 {
        self.session_start
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubjectAttendance;

    fn record_with_timetable() -> AttendanceRecord {
        let mut record = AttendanceRecord::default();
        record.timetable.insert(
            "Monday".to_string(),
            vec!["CS101 - Data Structures".to_string()],
        );
        record.subject_attendance.insert(
            "CS101".to_string(),
            SubjectAttendance {
                count: "18/20".to_string(),
                percentage: "90%".to_string(),
            },
        );
        record
    }

    #[test]
    fn test_greeting_uses_username() {
        let session = ChatSession::new("priya".to_string(), None);
        assert!(session.greeting().contains("Hello priya!"));

        let anonymous = ChatSession::new(String::new(), None);
        assert!(anonymous.greeting().contains("Hello there!"));
    }

    #[test]
    fn test_directory_derived_from_record() {
        let session = ChatSession::new("priya".to_string(), Some(record_with_timetable()));
        assert_eq!(session.directory().name_of("CS101"), Some("Data Structures"));
    }

    #[test]
    fn test_set_record_rederives_directory() {
        let mut session = ChatSession::new("priya".to_string(), None);
        assert!(session.directory().is_empty());

        session.set_record(Some(record_with_timetable()));
        assert!(session.directory().contains("CS101"));

        session.set_record(None);
        assert!(session.directory().is_empty());
        assert!(session.record().is_none());
    }

    #[test]
    fn test_transcript_is_bounded() {
        let mut session = ChatSession::new("priya".to_string(), None);
        for i in 0..(MAX_TRANSCRIPT + 10) {
            session.record_user(format!("message {}", i));
        }
        assert_eq!(session.message_count(), MAX_TRANSCRIPT);
        // Oldest entries were evicted
        assert_eq!(session.recent(1)[0].text, format!("message {}", MAX_TRANSCRIPT + 9));
    }

    #[test]
    fn test_recent_returns_tail_in_order() {
        let mut session = ChatSession::new("priya".to_string(), None);
        session.record_user("one".to_string());
        session.record_assistant("two".to_string());
        session.record_user("three".to_string());

        let recent: Vec<&str> = session
            .recent(2)
            .into_iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(recent, vec!["two", "three"]);
    }

    #[test]
    fn test_reset_keeps_record_and_profile() {
        let mut session = ChatSession::new("priya".to_string(), Some(record_with_timetable()));
        session.record_user("hello".to_string());
        session
            .profile_mut()
            .add_certificate("random.pdf", crate::classifier::classify("random.pdf"));

        session.reset();
        assert_eq!(session.message_count(), 0);
        assert!(session.record().is_some());
        assert_eq!(session.profile().len(), 1);
    }
}
