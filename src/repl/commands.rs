//! Slash-command handler for the chat REPL
//!
//! Anything starting with `/` is a command; everything else goes to the
//! intent resolver. Commands operate on the session state directly and
//! never touch the network.

use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::classifier::classify;
use crate::projection::project_subjects;
use crate::repl::display::{
    render_attendance, render_certificates, render_projections, render_timetable,
};
use crate::repl::session::{ChatSession, Sender};

/// Upload size cap; mirrors the dashboard's 16MB rule
const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Accepted upload extensions
const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

/// Chat command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Attendance,
    Timetable { day: Option<String> },
    Project,
    Upload { filename: String },
    Points,
    Remove { id: String },
    History { limit: Option<usize> },
    Clear,
    Reset,
    Unknown { input: String },
}

/// Check if input should be parsed as a command
pub fn is_command(input: &str) -> bool {
    input.trim_start().starts_with('/')
}

/// Command handler for parsing and executing chat commands
pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        CommandHandler
    }

    /// Parse input string into a command
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();

        if !trimmed.starts_with('/') {
            return Command::Unknown {
                input: input.to_string(),
            };
        }

        let parts: Vec<&str> = trimmed[1..].split_whitespace().collect();
        if parts.is_empty() {
            return Command::Unknown {
                input: input.to_string(),
            };
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            "attendance" => Command::Attendance,
            "timetable" => Command::Timetable {
                day: parts.get(1).map(|s| s.to_string()),
            },
            "project" | "projections" => Command::Project,
            "upload" => {
                if parts.len() > 1 {
                    Command::Upload {
                        filename: parts[1..].join(" "),
                    }
                } else {
                    Command::Unknown {
                        input: input.to_string(),
                    }
                }
            }
            "points" => Command::Points,
            "remove" => match parts.get(1) {
                Some(id) => Command::Remove { id: id.to_string() },
                None => Command::Unknown {
                    input: input.to_string(),
                },
            },
            "history" => {
                let limit = parts.get(1).and_then(|s| s.parse().ok());
                Command::History { limit }
            }
            "clear" | "cls" => Command::Clear,
            "reset" => Command::Reset,
            _ => Command::Unknown {
                input: input.to_string(),
            },
        }
    }

    /// Execute a command
    ///
    /// Returns true if the REPL should continue, false to exit
    pub fn execute(&self, command: Command, session: &mut ChatSession) -> Result<bool> {
        match command {
            Command::Help => {
                self.show_help();
                Ok(true)
            }
            Command::Exit => {
                println!("{}", "Goodbye!".green());
                Ok(false)
            }
            Command::Attendance => {
                match session.record() {
                    Some(record) => {
                        println!("{}", render_attendance(record, session.directory()))
                    }
                    None => println!("{}", "No attendance data loaded.".yellow()),
                }
                Ok(true)
            }
            Command::Timetable { day } => {
                match session.record() {
                    Some(record) => println!("{}", render_timetable(record, day.as_deref())),
                    None => println!("{}", "No attendance data loaded.".yellow()),
                }
                Ok(true)
            }
            Command::Project => {
                match session.record() {
                    Some(record) => {
                        let projections = project_subjects(record, session.directory());
                        println!("{}", render_projections(&projections));
                    }
                    None => println!("{}", "No attendance data loaded.".yellow()),
                }
                Ok(true)
            }
            Command::Upload { filename } => {
                self.handle_upload(&filename, session);
                Ok(true)
            }
            Command::Points => {
                println!("{}", render_certificates(session.profile()));
                Ok(true)
            }
            Command::Remove { id } => {
                match session.profile_mut().remove_certificate(&id) {
                    Some(removed) => println!(
                        "{}",
                        format!("Certificate removed ({} points reversed).", removed.points)
                            .green()
                    ),
                    None => println!("{}", format!("No certificate with id {}", id).red()),
                }
                Ok(true)
            }
            Command::History { limit } => {
                self.show_history(session, limit.unwrap_or(10));
                Ok(true)
            }
            Command::Clear => {
                print!("\x1B[2J\x1B[1;1H"); // ANSI escape codes to clear screen
                Ok(true)
            }
            Command::Reset => {
                session.reset();
                println!("{}", "Transcript cleared.".yellow());
                Ok(true)
            }
            Command::Unknown { input } => {
                println!("{}", format!("Unknown command: {}", input).red());
                println!("Type {} for available commands", "/help".cyan());
                Ok(true)
            }
        }
    }

    /// Classify an upload and credit the session profile
    fn handle_upload(&self, filename: &str, session: &mut ChatSession) {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        let allowed = extension
            .as_deref()
            .map(|ext| ALLOWED_EXTENSIONS.contains(&ext))
            .unwrap_or(false);
        if !allowed {
            println!(
                "{}",
                "Invalid file type. Please upload JPG, PNG, or PDF.".red()
            );
            return;
        }

        // When the name points at a real file, enforce the size cap too
        if let Ok(metadata) = std::fs::metadata(filename) {
            if metadata.len() > MAX_UPLOAD_BYTES {
                println!("{}", "File size exceeds 16MB limit.".red());
                return;
            }
        }

        let classification = classify(filename);
        let certificate = session.profile_mut().add_certificate(filename, classification);
        println!(
            "{}",
            format!(
                "{} processed! {} points awarded (id {}).",
                certificate.kind, certificate.points, certificate.id
            )
            .green()
        );
    }

    fn show_history(&self, session: &ChatSession, limit: usize) {
        let recent = session.recent(limit);
        if recent.is_empty() {
            println!("{}", "No messages yet.".dimmed());
            return;
        }
        for message in recent {
            let speaker = match message.sender {
                Sender::User => "you".bold().cyan(),
                Sender::Assistant => "aura".bold().magenta(),
            };
            println!("{}: {}", speaker, message.text);
        }
    }

    fn show_help(&self) {
        println!("{}", "Available commands:".bold());
        println!("  {}          Show this help", "/help".green());
        println!("  {}    Subject-wise attendance", "/attendance".green());
        println!("  {} Weekly timetable (optionally one day)", "/timetable [day]".green());
        println!("  {}       Skip/attend projections per subject", "/project".green());
        println!("  {} Classify a certificate and add its points", "/upload <file>".green());
        println!("  {}        Session points and certificates", "/points".green());
        println!("  {}   Remove a certificate by id", "/remove <id>".green());
        println!("  {}  Recent messages", "/history [n]".green());
        println!("  {}         Clear the screen", "/clear".green());
        println!("  {}         Clear the transcript", "/reset".green());
        println!("  {}          Quit", "/exit".green());
        println!();
        println!(
            "Anything else is answered from your data when possible, \
             otherwise handed to the generative fallback."
        );
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
