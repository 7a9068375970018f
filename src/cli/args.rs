//! Command-line argument parsing for the AURA assistant
//!
//! Provides clap-based CLI with subcommands; the default (no
//! subcommand) mode starts the interactive chat.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AURA - terminal decision-support assistant for your academic data
#[derive(Parser, Debug)]
#[command(name = "aura")]
#[command(version)]
#[command(about = "Attendance projections, timetable answers, and certificate points from your terminal", long_about = None)]
pub struct Args {
    /// Attendance record JSON file (skips the login fetch)
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,

    /// Username for the extraction service login
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password for the extraction service login
    #[arg(short, long)]
    pub password: Option<String>,

    /// Extraction service base URL override
    #[arg(long)]
    pub extraction_url: Option<String>,

    /// Generative API key override (otherwise read from config)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Subcommand; starts the chat when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive chat (default)
    Chat,

    /// Show subject-wise attendance
    Attendance,

    /// Show the weekly timetable
    Timetable {
        /// Limit output to one weekday
        #[arg(long)]
        day: Option<String>,
    },

    /// Show skip/attend projections
    Project {
        /// Project a single "attended/total" count instead of a record
        count: Option<String>,
    },

    /// Classify a certificate filename and show its points
    Classify {
        /// Filename or extracted text to classify
        input: String,
    },

    /// Check connectivity to the configured backends
    Doctor,

    /// Display current configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_chat() {
        let args = Args::parse_from(["aura"]);
        assert!(args.command.is_none());
        assert!(args.record.is_none());
    }

    #[test]
    fn test_classify_subcommand() {
        let args = Args::parse_from(["aura", "classify", "nptel_certificate.pdf"]);
        match args.command {
            Some(Commands::Classify { input }) => assert_eq!(input, "nptel_certificate.pdf"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_project_accepts_bare_count() {
        let args = Args::parse_from(["aura", "project", "18/20"]);
        match args.command {
            Some(Commands::Project { count }) => assert_eq!(count.as_deref(), Some("18/20")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_record_flag_with_subcommand() {
        let args = Args::parse_from(["aura", "--record", "rec.json", "attendance"]);
        assert_eq!(args.record.as_deref(), Some(std::path::Path::new("rec.json")));
        assert!(matches!(args.command, Some(Commands::Attendance)));
    }
}
