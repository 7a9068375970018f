//! Display manager and shared renderers for the terminal UI
//!
//! The `render_*` functions build plain text from engine output and are
//! shared between the chat commands and the CLI subcommands; the
//! `DisplayManager` owns the colored chrome around them.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::directory::SubjectDirectory;
use crate::projection::SubjectProjection;
use crate::types::{AttendanceRecord, UserProfile};

/// Display manager for the chat UI
pub struct DisplayManager {
    tick_interval: Duration,
}

impl DisplayManager {
    pub fn new() -> Self {
        DisplayManager {
            tick_interval: Duration::from_millis(100),
        }
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, data_loaded: bool, fallback_enabled: bool) {
        let width = 64;
        let data = if data_loaded { "Loaded" } else { "None" };
        let fallback = if fallback_enabled { "Enabled" } else { "Disabled" };

        println!("\n{}", "=".repeat(width).cyan());
        println!("{}", format!("  AURA {} - Academic Assistant", version).bold().cyan());
        println!(
            "{}",
            format!("  Attendance data: {} | Generative fallback: {}", data, fallback).dimmed()
        );
        println!("{}\n", "=".repeat(width).cyan());
        println!(
            "Ask about your timetable or attendance (or {} for commands, {} to quit)\n",
            "/help".green(),
            "/exit".green()
        );
    }

    /// Print an assistant reply, indenting continuation lines
    pub fn show_reply(&self, text: &str) {
        let mut lines = text.lines();
        if let Some(first) = lines.next() {
            println!("{} {}", "aura>".bold().magenta(), first);
        }
        for line in lines {
            println!("      {}", line);
        }
        println!();
    }

    /// Typing indicator while the generative fallback is in flight
    pub fn start_thinking(&self) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.magenta} {msg}")
                .unwrap(),
        );
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(self.tick_interval);
        spinner
    }

    pub fn show_error(&self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Subject-wise attendance listing, directory names attached when known
pub fn render_attendance(record: &AttendanceRecord, directory: &SubjectDirectory) -> String {
    if record.subject_attendance.is_empty() {
        return "No attendance data available.".to_string();
    }

    record
        .subject_attendance
        .iter()
        .map(|(code, attendance)| match directory.name_of(code) {
            Some(name) => format!(
                "{} ({}): {} [{}]",
                code, name, attendance.percentage, attendance.count
            ),
            None => format!("{}: {} [{}]", code, attendance.percentage, attendance.count),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Weekly timetable, canonical day order, or a single day when given
pub fn render_timetable(record: &AttendanceRecord, day: Option<&str>) -> String {
    if record.timetable.is_empty() {
        return "No timetable available.".to_string();
    }

    let render_day = |day_key: &str| -> String {
        let slots = &record.timetable[day_key];
        let body = slots
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let label = if slot.trim().is_empty() { "No Class" } else { slot };
                format!("  {}. {}", index + 1, label)
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}:\n{}", day_key, body)
    };

    match day {
        Some(wanted) => match record.day_slots(wanted) {
            Some((key, _)) => render_day(key),
            None => format!("No timetable entry for {}.", wanted),
        },
        None => record
            .ordered_timetable_days()
            .into_iter()
            .map(render_day)
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

/// Per-subject projection table for the fixed targets
pub fn render_projections(projections: &[SubjectProjection]) -> String {
    if projections.is_empty() {
        return "No subjects eligible for projection.".to_string();
    }

    projections
        .iter()
        .map(|subject| {
            let rows = subject
                .targets
                .iter()
                .map(|entry| {
                    let verdict = if entry.can_skip > 0 {
                        format!("can skip {}", entry.can_skip)
                    } else if entry.must_attend > 0 {
                        format!("must attend {}", entry.must_attend)
                    } else {
                        "target achieved".to_string()
                    };
                    format!("  {}%: {}", entry.target, verdict)
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("{} ({}):\n{}", subject.code, subject.name, rows)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Certificates and running total for the session profile
pub fn render_certificates(profile: &UserProfile) -> String {
    if profile.is_empty() {
        return format!(
            "Total points: {}\nNo certificates uploaded yet.",
            profile.total_points
        );
    }

    let rows = profile
        .certificates
        .iter()
        .map(|cert| {
            format!(
                "  {} | {} | {} | +{} points | {}",
                cert.id, cert.name, cert.kind, cert.points, cert.date
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("Total points: {}\n{}", profile.total_points, rows)
}
