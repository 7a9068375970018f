//! Interactive chat REPL
//!
//! The terminal rendition of the dashboard's chat window: free text is
//! resolved locally first; only a `NoLocalMatch` reaches the generative
//! backend, behind a typing indicator. Slash commands cover the
//! structured views (attendance, timetable, projections, points).

pub mod commands;
pub mod display;
pub mod input;
pub mod session;

use anyhow::Result;
use std::path::PathBuf;

use crate::backend::generative::{build_prompt, GenerativeClient};
use crate::repl::commands::{is_command, CommandHandler};
use crate::repl::input::InputHandler;
use crate::resolver::{resolve, Resolution};
use crate::types::AttendanceRecord;

pub use crate::repl::display::DisplayManager;
pub use crate::repl::session::{ChatMessage, ChatSession, Sender};

/// Reply when the backend answered but carried no usable text
pub const EMPTY_REPLY: &str = "I couldn't generate a response at this time.";

/// Reply when the backend call failed outright
pub const FAILURE_REPLY: &str =
    "Sorry, I encountered an error connecting to my intelligence system.";

/// Reply when no generative backend is configured at all
pub const NO_FALLBACK_REPLY: &str = "I can only answer timetable and attendance \
questions right now. Add a generative API key to your config for anything else.";

/// Chat session coordinator
pub struct ChatRepl {
    input_handler: InputHandler,
    command_handler: CommandHandler,
    session: ChatSession,
    display_manager: DisplayManager,
    generative: Option<GenerativeClient>,
}

impl ChatRepl {
    pub fn new(
        username: String,
        record: Option<AttendanceRecord>,
        generative: Option<GenerativeClient>,
    ) -> Result<Self> {
        let input_handler = match history_path() {
            Some(path) => InputHandler::with_history(path)?,
            None => InputHandler::new()?,
        };

        Ok(ChatRepl {
            input_handler,
            command_handler: CommandHandler::new(),
            session: ChatSession::new(username, record),
            display_manager: DisplayManager::new(),
            generative,
        })
    }

    /// Run the chat loop until exit, EOF, or interrupt
    pub async fn run(&mut self) -> Result<()> {
        self.display_manager.show_banner(
            env!("CARGO_PKG_VERSION"),
            self.session.record().is_some(),
            self.generative.is_some(),
        );

        let greeting = self.session.greeting();
        self.display_manager.show_reply(&greeting);
        self.session.record_assistant(greeting);

        loop {
            let line = match self.input_handler.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(_) => break, // Ctrl-C
            };

            if line.trim().is_empty() {
                continue;
            }

            if is_command(&line) {
                let command = self.command_handler.parse(&line);
                if !self.command_handler.execute(command, &mut self.session)? {
                    break;
                }
                continue;
            }

            self.handle_query(line).await;
        }

        self.input_handler.save_history()?;
        Ok(())
    }

    /// Resolve one free-text query, falling back when allowed
    async fn handle_query(&mut self, query: String) {
        self.session.record_user(query.clone());

        let reply = match resolve(&query, self.session.record(), self.session.directory()) {
            Resolution::Answer(text) => text,
            Resolution::NoLocalMatch => self.fallback_reply(&query).await,
        };

        self.display_manager.show_reply(&reply);
        self.session.record_assistant(reply);
    }

    /// One outbound generative call; every failure mode degrades to a
    /// fixed user-visible string
    async fn fallback_reply(&self, query: &str) -> String {
        let Some(client) = &self.generative else {
            return NO_FALLBACK_REPLY.to_string();
        };

        let prompt = build_prompt(self.session.username(), self.session.record(), query);
        let spinner = self.display_manager.start_thinking();
        let outcome = client.generate(prompt).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_REPLY.to_string(),
            Err(_) => FAILURE_REPLY.to_string(),
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ChatSession {
        &mut self.session
    }
}

/// History file under the config directory (~/.aura/history)
fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".aura").join("history"))
}
