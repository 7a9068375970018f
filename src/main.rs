//! AURA terminal assistant entry point
//!
//! Wires the CLI to the engine: loads an attendance record (from a JSON
//! file or a login fetch), then either starts the chat or runs one of
//! the structured views.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;

use aura::backend::{ExtractionClient, GenerativeClient};
use aura::cli::{Args, Commands};
use aura::classifier::classify;
use aura::config::Config;
use aura::directory::SubjectDirectory;
use aura::projection::{project, project_subjects};
use aura::repl::display::{render_attendance, render_projections, render_timetable};
use aura::repl::ChatRepl;
use aura::types::AttendanceRecord;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load().unwrap_or_default();

    match &args.command {
        None | Some(Commands::Chat) => run_chat(&args, &config).await,
        Some(Commands::Attendance) => {
            let (record, directory) = require_record(&args, &config).await?;
            println!("{}", render_attendance(&record, &directory));
            Ok(())
        }
        Some(Commands::Timetable { day }) => {
            let (record, _) = require_record(&args, &config).await?;
            println!("{}", render_timetable(&record, day.as_deref()));
            Ok(())
        }
        Some(Commands::Project { count }) => run_project(&args, &config, count.as_deref()).await,
        Some(Commands::Classify { input }) => {
            let result = classify(input);
            println!(
                "{}: {} ({} points)",
                input,
                result.kind.bold(),
                result.points
            );
            Ok(())
        }
        Some(Commands::Doctor) => run_doctor(&args, &config).await,
        Some(Commands::Config) => run_config(&config),
    }
}

/// Load a record from file or login fetch; `None` when neither given
async fn load_record(args: &Args, config: &Config) -> Result<Option<AttendanceRecord>> {
    if let Some(path) = &args.record {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read record file {}", path.display()))?;
        let record = AttendanceRecord::from_json(&contents)
            .with_context(|| format!("Failed to parse record file {}", path.display()))?;
        return Ok(Some(record));
    }

    if let Some(username) = &args.username {
        let password = args
            .password
            .as_deref()
            .context("--password is required when logging in with --username")?;
        let base_url = args
            .extraction_url
            .as_deref()
            .unwrap_or_else(|| config.extraction_url());

        let client = ExtractionClient::with_base_url(base_url)?;
        println!("{}", "Fetching attendance data...".dimmed());
        let record = client.fetch_attendance(username, password).await?;
        return Ok(Some(record));
    }

    Ok(None)
}

async fn require_record(args: &Args, config: &Config) -> Result<(AttendanceRecord, SubjectDirectory)> {
    let record = load_record(args, config)
        .await?
        .context("No attendance record: pass --record <file> or --username/--password")?;
    let directory = SubjectDirectory::from_record(&record);
    Ok((record, directory))
}

fn generative_client(args: &Args, config: &Config) -> Result<Option<GenerativeClient>> {
    let api_key = args.api_key.as_deref().or_else(|| config.api_key());
    match api_key {
        Some(key) => Ok(Some(GenerativeClient::with_config(
            config.generative_url(),
            config.generative_model(),
            key,
        )?)),
        None => Ok(None),
    }
}

async fn run_chat(args: &Args, config: &Config) -> Result<()> {
    let record = load_record(args, config).await?;
    let generative = generative_client(args, config)?;
    let username = args.username.clone().unwrap_or_default();

    let mut repl = ChatRepl::new(username, record, generative)?;
    repl.run().await
}

async fn run_project(args: &Args, config: &Config, count: Option<&str>) -> Result<()> {
    // A bare count skips record loading entirely
    if let Some(count) = count {
        match project(count) {
            Some(entries) => {
                for entry in entries {
                    let verdict = if entry.can_skip > 0 {
                        format!("can skip {}", entry.can_skip)
                    } else if entry.must_attend > 0 {
                        format!("must attend {}", entry.must_attend)
                    } else {
                        "target achieved".to_string()
                    };
                    println!("{}%: {}", entry.target, verdict);
                }
            }
            None => println!(
                "{}",
                format!("'{}' is not a valid attended/total count", count).red()
            ),
        }
        return Ok(());
    }

    let (record, directory) = require_record(args, config).await?;
    println!("{}", render_projections(&project_subjects(&record, &directory)));
    Ok(())
}

async fn run_doctor(args: &Args, config: &Config) -> Result<()> {
    println!("{}", "AURA diagnostics".bold());

    match Config::config_path() {
        Ok(path) => {
            let status = if path.exists() { "found".green() } else { "missing (defaults in use)".yellow() };
            println!("  config file {} - {}", path.display(), status);
        }
        Err(_) => println!("  config file - {}", "no home directory".red()),
    }

    let extraction_url = args
        .extraction_url
        .as_deref()
        .unwrap_or_else(|| config.extraction_url());
    let extraction = ExtractionClient::with_base_url(extraction_url)?;
    let reachable = extraction.health_check().await.unwrap_or(false);
    println!(
        "  extraction service {} - {}",
        extraction_url,
        if reachable { "reachable".green() } else { "unreachable".red() }
    );

    match generative_client(args, config)? {
        Some(client) => {
            let ok = client.health_check().await.unwrap_or(false);
            println!(
                "  generative backend - {}",
                if ok { "reachable".green() } else { "unreachable or bad key".red() }
            );
        }
        None => println!(
            "  generative backend - {}",
            "not configured (local answers only)".yellow()
        ),
    }

    Ok(())
}

fn run_config(config: &Config) -> Result<()> {
    if let Ok(path) = Config::config_path() {
        println!("{} {}", "config:".bold(), path.display());
    }
    println!("extraction url: {}", config.extraction_url());
    println!("generative url: {}", config.generative_url());
    println!("generative model: {}", config.generative_model());
    match config.api_key() {
        Some(key) if key.len() > 4 => println!("api key: ...{}", &key[key.len() - 4..]),
        Some(_) => println!("api key: set"),
        None => println!("api key: not set"),
    }
    Ok(())
}
