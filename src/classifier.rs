//! Certificate classifier
//!
//! Assigns a taxonomy label and a point value to an uploaded credential
//! from its filename or extracted text. Pure and total: every input,
//! including the empty string, produces a valid classification.
//!
//! Matching is a priority-ranked keyword table: collect every category
//! with at least one keyword hit, pick the highest priority, break ties
//! by table order. Two context fallbacks catch generic wording before
//! the miscellaneous category applies.

/// One row of the classification table
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    pub points: u32,
    pub priority: u8,
}

/// Classification taxonomy, listed in priority order
///
/// Labels and point values match the activity-points scheme the
/// dashboard advertises to students.
pub const CATEGORIES: &[Category] = &[
    Category {
        label: "NPTEL",
        keywords: &[
            "nptel",
            "national programme on technology enhanced learning",
            "online certification",
            "coursera nptel",
            "iitm nptel",
            "online assignments",
            "swayam",
            "skill india",
        ],
        points: 50,
        priority: 10,
    },
    Category {
        label: "Hackathon",
        keywords: &[
            "hackathon",
            "innovation challenge",
            "coding competition",
            "tech challenge",
            "startup hackathon",
            "innovation sprint",
        ],
        points: 40,
        priority: 9,
    },
    Category {
        label: "Internship",
        keywords: &[
            "internship certificate",
            "industrial training",
            "work experience",
            "summer internship",
            "professional internship",
            "industry internship",
        ],
        points: 30,
        priority: 8,
    },
    Category {
        label: "Professional Development",
        keywords: &[
            "professional development",
            "workshop certificate",
            "seminar completion",
            "conference participation",
            "webinar certificate",
            "skill development workshop",
        ],
        points: 20,
        priority: 7,
    },
    Category {
        label: "Academic Achievement",
        keywords: &[
            "academic achievement",
            "course completion",
            "training completion",
            "certification of merit",
            "academic excellence",
            "course certificate",
        ],
        points: 15,
        priority: 6,
    },
    Category {
        label: "Leadership & Soft Skills",
        keywords: &[
            "leadership",
            "communication skills",
            "soft skills",
            "personality development",
            "team management",
        ],
        points: 25,
        priority: 5,
    },
    Category {
        label: "Technical Certification",
        keywords: &[
            "technical certification",
            "programming certification",
            "cloud certification",
            "aws",
            "azure",
            "google cloud",
            "cybersecurity certification",
        ],
        points: 35,
        priority: 4,
    },
];

/// Label for inputs nothing else matched
pub const FALLBACK_LABEL: &str = "Other";

/// Point value of the miscellaneous fallback
///
/// Observed revisions disagree (0/5/10); 5 is the value the dashboard's
/// own point table advertises, so that is the one implemented.
pub const FALLBACK_POINTS: u32 = 5;

/// A category/points pair assigned to one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: &'static str,
    pub points: u32,
}

/// Classify a filename or extracted-text string
pub fn classify(input: &str) -> Classification {
    let lowered = input.to_lowercase();

    let mut matches: Vec<&Category> = CATEGORIES
        .iter()
        .filter(|category| {
            category
                .keywords
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
        .collect();

    // Stable sort: ties keep table order, so the first-listed wins
    matches.sort_by(|a, b| b.priority.cmp(&a.priority));
    if let Some(best) = matches.first() {
        return Classification {
            kind: best.label,
            points: best.points,
        };
    }

    // Context fallbacks, in fixed order
    if lowered.contains("certificate") {
        return Classification {
            kind: "Academic Achievement",
            points: 15,
        };
    }
    if lowered.contains("participation") {
        return Classification {
            kind: "Professional Development",
            points: 10,
        };
    }

    Classification {
        kind: FALLBACK_LABEL,
        points: FALLBACK_POINTS,
    }
}
