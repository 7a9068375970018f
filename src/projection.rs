//! Attendance projection calculator
//!
//! Answers "how many sessions can I still skip, or must I attend, to
//! hold a target percentage" for the fixed targets 90/80/75. The
//! calculation holds `total` fixed: it reasons over classes already
//! scheduled, not a growing denominator.
//!
//! All arithmetic is integer-exact: floor((100a - bt)/100) and
//! ceil(bt/100) avoid float rounding at the target boundaries.

use serde::Serialize;

use crate::directory::SubjectDirectory;
use crate::types::AttendanceRecord;

/// Fixed target percentages, in display order
pub const TARGETS: [u32; 3] = [90, 80, 75];

/// Recommendation for a single target percentage
///
/// At most one field is non-zero; both are zero exactly at target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetProjection {
    /// Target percentage this entry answers for
    pub target: u32,
    /// Sessions that could still be missed while meeting the target
    pub can_skip: u32,
    /// Scheduled sessions that must still count as present
    pub must_attend: u32,
}

/// Project a `"attended/total"` count string against every target
///
/// Returns `None` when the string does not parse as two positive
/// integers; malformed input never panics or errors.
pub fn project(count: &str) -> Option<Vec<TargetProjection>> {
    let (attended, total) = parse_count(count)?;
    Some(
        TARGETS
            .iter()
            .map(|&target| project_target(attended, total, target))
            .collect(),
    )
}

/// Split `"a/b"` into positive integers; anything else is `None`
///
/// Parsed as u32 so the scaled arithmetic below cannot overflow u64.
fn parse_count(count: &str) -> Option<(u64, u64)> {
    let (attended, total) = count.trim().split_once('/')?;
    let attended: u32 = attended.trim().parse().ok()?;
    let total: u32 = total.trim().parse().ok()?;
    if attended == 0 || total == 0 {
        return None;
    }
    Some((attended.into(), total.into()))
}

fn project_target(attended: u64, total: u64, target: u32) -> TargetProjection {
    let scaled_attended = attended * 100;
    let scaled_target = total * u64::from(target);

    if scaled_attended >= scaled_target {
        // Slack before the target would be violated, holding total fixed
        let can_skip = (scaled_attended - scaled_target) / 100;
        TargetProjection {
            target,
            can_skip: can_skip as u32,
            must_attend: 0,
        }
    } else {
        // ceil(total * target / 100) - attended
        let required = (scaled_target + 99) / 100;
        TargetProjection {
            target,
            can_skip: 0,
            must_attend: (required - attended) as u32,
        }
    }
}

/// One subject's projections, as shown in the attendance view
#[derive(Debug, Clone, Serialize)]
pub struct SubjectProjection {
    pub code: String,
    pub name: String,
    pub targets: Vec<TargetProjection>,
}

/// Project every displayable subject of a record
///
/// Display policy (owned here by the caller of `project`, not by the
/// calculator): subjects whose percentage is `"N/A"`, or whose code has
/// no directory entry, are excluded entirely.
pub fn project_subjects(
    record: &AttendanceRecord,
    directory: &SubjectDirectory,
) -> Vec<SubjectProjection> {
    record
        .subject_attendance
        .iter()
        .filter(|(_, attendance)| attendance.percentage != "N/A")
        .filter_map(|(code, attendance)| {
            let name = directory.name_of(code)?;
            let targets = project(&attendance.count)?;
            Some(SubjectProjection {
                code: code.clone(),
                name: name.to_string(),
                targets,
            })
        })
        .collect()
}
