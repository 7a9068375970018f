//! External collaborators reached over HTTP
//!
//! Two boundaries: the extraction service that turns a login into an
//! [`AttendanceRecord`](crate::types::AttendanceRecord), and the
//! generative backend consulted only when the local resolver misses.

pub mod extraction;
pub mod generative;

pub use extraction::ExtractionClient;
pub use generative::GenerativeClient;
