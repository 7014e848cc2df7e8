//! Terminal input handling for the REPL.
//!
//! Wraps rustyline with command completion and history when stdin is an
//! interactive terminal, falling back to a basic stdin reader otherwise.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::save_files::{active_save_dir, collect_save_slots};

const HISTORY_FILE: &str = ".root_access_history";

/// Command words offered for tab completion.
const COMMAND_TERMS: &[&str] = &[
    "attack", "close", "drop", "eat", "fill", "give", "go to", "hack", "harvest", "help", "hide", "inventory",
    "load", "look", "look at", "open", "plant", "put", "quit", "save", "saves", "take", "talk to", "throw",
    "water",
];

/// Outcome of reading a line from the REPL input.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

type ReplEditor = rustyline::Editor<ReplHelper, DefaultHistory>;

#[derive(Default)]
struct ReplHelper;

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let prefix = &line[..pos];
        let trimmed = prefix.trim_start();
        let start = pos - trimmed.len();
        if trimmed.is_empty() {
            return Ok((start, Vec::new()));
        }
        let lower = trimmed.to_lowercase();

        // complete save slots after "load " / "save "
        for keyword in ["load ", "save "] {
            if let Some(partial) = lower.strip_prefix(keyword) {
                let slots = available_save_slots();
                let pairs = slots
                    .into_iter()
                    .filter(|slot| partial.is_empty() || slot.starts_with(partial))
                    .map(|slot| Pair {
                        display: slot.clone(),
                        replacement: slot,
                    })
                    .collect();
                return Ok((start + keyword.len(), pairs));
            }
        }

        let pairs = COMMAND_TERMS
            .iter()
            .filter(|term| term.starts_with(&lower))
            .map(|term| Pair {
                display: (*term).to_string(),
                replacement: (*term).to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;
}

impl Highlighter for ReplHelper {}

impl Validator for ReplHelper {}

fn available_save_slots() -> Vec<String> {
    match collect_save_slots(&active_save_dir()) {
        Ok(slots) => slots.into_iter().map(|s| s.slot).collect(),
        Err(err) => {
            warn!("failed to enumerate save slots for completion: {err}");
            Vec::new()
        },
    }
}

/// Helper responsible for managing the interactive input backend.
///
/// Prefers `rustyline` when an interactive terminal is available, falling
/// back to a basic stdin reader otherwise.
pub struct InputManager {
    backend: Backend,
}

impl InputManager {
    pub fn new() -> Self {
        let backend = if io::stdin().is_terminal() {
            match RustylineInput::new() {
                Ok(editor) => {
                    info!("using rustyline-backed REPL input");
                    Backend::Rustyline(editor)
                },
                Err(err) => {
                    warn!("failed to initialize rustyline ({err}), falling back to basic stdin");
                    Backend::plain()
                },
            }
        } else {
            info!("stdin is not a TTY; using basic input mode");
            Backend::plain()
        };

        Self { backend }
    }

    /// Read a line from the current backend. If the interactive backend
    /// reports an unrecoverable error, switch to plain stdin and retry once.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.backend.read_line(prompt) {
            Ok(event) => Ok(event),
            Err(err) => {
                if self.backend.is_rustyline() {
                    warn!("rustyline input failed: {err} -- switching to basic stdin");
                    self.backend = Backend::plain();
                    self.backend.read_line(prompt)
                } else {
                    Err(err)
                }
            },
        }
    }
}

enum Backend {
    Rustyline(RustylineInput),
    Plain(StdinInput),
}

impl Backend {
    fn plain() -> Self {
        Backend::Plain(StdinInput::default())
    }

    fn is_rustyline(&self) -> bool {
        matches!(self, Backend::Rustyline(_))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self {
            Backend::Rustyline(editor) => editor.read_line(prompt),
            Backend::Plain(stdin) => stdin.read_line(prompt),
        }
    }
}

struct RustylineInput {
    editor: ReplEditor,
    history_path: PathBuf,
}

impl RustylineInput {
    fn new() -> io::Result<Self> {
        let mut editor = rustyline::Editor::<ReplHelper, _>::new().map_err(map_io_err)?;
        editor.set_helper(Some(ReplHelper));
        let history_path = PathBuf::from(HISTORY_FILE);

        if let Err(err) = editor.load_history(&history_path) {
            match err {
                ReadlineError::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                    info!("no prior history found at {}, starting fresh", history_path.display());
                },
                other => {
                    warn!("failed to load history from {}: {other}", history_path.display());
                },
            }
        }

        Ok(Self { editor, history_path })
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        warn!("failed to append to history: {err}");
                    }
                    if let Err(err) = self.editor.save_history(&self.history_path) {
                        warn!("failed to persist history to {}: {err}", self.history_path.display());
                    }
                }
                Ok(InputEvent::Line(line))
            },
            Err(err) => convert_readline_error(err),
        }
    }
}

#[derive(Default)]
struct StdinInput {
    buffer: String,
}

impl StdinInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        print!("{prompt}");
        io::stdout().flush()?;

        self.buffer.clear();
        let bytes = io::stdin().read_line(&mut self.buffer)?;
        if bytes == 0 {
            return Ok(InputEvent::Eof);
        }

        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            if self.buffer.ends_with('\r') {
                self.buffer.pop();
            }
        }

        Ok(InputEvent::Line(self.buffer.clone()))
    }
}

fn convert_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        ReadlineError::Io(io_err) => Err(io_err),
        other => Err(io::Error::other(other)),
    }
}

fn map_io_err(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(io_err) => io_err,
        other => io::Error::other(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_readline_ctrl_c_to_interrupt() {
        let result = convert_readline_error(ReadlineError::Interrupted).unwrap();
        assert!(matches!(result, InputEvent::Interrupted));
    }

    #[test]
    fn command_terms_cover_the_garden_verbs() {
        for verb in ["plant", "water", "harvest", "hack"] {
            assert!(COMMAND_TERMS.contains(&verb));
        }
    }
}
