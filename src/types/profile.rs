//! Session-local activity points profile
//!
//! The profile is the only mutable aggregate in the system. Its
//! invariant: `total_points` always equals the sum of the current
//! certificates' points. Both fields change together inside a single
//! `&mut self` call, so the invariant holds after every operation.

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::Classification;

/// A classified credential, immutable after creation except removal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Session-unique, clock-derived id (`cert-<unix-millis>-<seq>`)
    pub id: String,
    /// Original filename (or extracted-text label)
    pub name: String,
    /// Taxonomy label assigned by the classifier
    pub kind: String,
    /// Points awarded at classification time
    pub points: u32,
    /// Local date of upload
    pub date: String,
}

/// Activity points profile for the current session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub total_points: u32,
    pub certificates: Vec<Certificate>,
    /// Monotonic counter disambiguating same-millisecond uploads
    #[serde(skip)]
    issued: u64,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a classified certificate and award its points
    pub fn add_certificate(&mut self, name: &str, classification: Classification) -> &Certificate {
        self.issued += 1;
        let certificate = Certificate {
            id: format!("cert-{}-{}", Utc::now().timestamp_millis(), self.issued),
            name: name.to_string(),
            kind: classification.kind.to_string(),
            points: classification.points,
            date: Local::now().format("%Y-%m-%d").to_string(),
        };

        self.total_points += certificate.points;
        self.certificates.push(certificate);
        self.certificates.last().expect("certificate just pushed")
    }

    /// Remove a certificate by id, reversing its point contribution
    pub fn remove_certificate(&mut self, id: &str) -> Option<Certificate> {
        let index = self.certificates.iter().position(|cert| cert.id == id)?;
        let removed = self.certificates.remove(index);
        self.total_points -= removed.points;
        Some(removed)
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.certificates.len()
    }
}
