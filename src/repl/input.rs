//! Input handler for the chat REPL using rustyline
//!
//! Readline with history, line editing, and graceful Ctrl-C/Ctrl-D
//! handling.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Input handler managing the readline interface and history
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
    prompt: String,
}

impl InputHandler {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()?;

        Ok(InputHandler {
            editor,
            history_path: None,
            prompt: "you> ".to_string(),
        })
    }

    /// Create input handler with persistent history (~/.aura/history)
    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(InputHandler {
            editor,
            history_path: Some(history_file),
            prompt: "you> ".to_string(),
        })
    }

    /// Read a line of input
    ///
    /// Returns:
    /// - `Ok(Some(input))` for normal input (empty string for blank lines)
    /// - `Ok(None)` for EOF (Ctrl-D)
    /// - `Err` on interrupt (Ctrl-C) or terminal errors
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed.is_empty() {
                    return Ok(Some(String::new()));
                }

                let _ = self.editor.add_history_entry(trimmed);
                Ok(Some(trimmed.to_string()))
            }
            Err(ReadlineError::Interrupted) => Err(anyhow::anyhow!("Interrupted")),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist history to disk if a history file was configured
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(path) = &self.history_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            self.editor.save_history(path)?;
        }
        Ok(())
    }
}
