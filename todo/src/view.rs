//! Line-oriented terminal presentation.
//!
//! Parses typed lines into commands and renders the state as plain text.
//! Nothing here touches the state directly; list changes go through
//! [`TodoAction`]s sent to the store.

use crate::types::{ItemId, SeedStatus, TodoAction, TodoState};
use std::fmt::Write as _;
use thiserror::Error;

/// Title shown at the top of the list
pub const TITLE: &str = "Venus Todo List";

/// Shown when the list has no items
pub const EMPTY_MESSAGE: &str = "No todos yet! Add one above to get started.";

/// Usage text for `help`
pub const HELP: &str = "\
Commands:
  add <text>         add a todo
  toggle <id>        mark a todo done / not done
  edit <id> <text>   change a todo's text
  delete <id>        remove a todo
  list               show the list again
  help               show this help
  quit               exit";

/// A parsed line of user input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Forward a list change to the store
    Dispatch(TodoAction),
    /// Redraw the list
    List,
    /// Print usage
    Help,
    /// Leave the program
    Quit,
}

/// Why a line could not be understood
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Empty line
    #[error("type a command, or `help`")]
    Empty,

    /// First word is not a command
    #[error("unknown command `{0}`, try `help`")]
    UnknownCommand(String),

    /// Command needs an argument that is missing
    #[error("usage: {0}")]
    MissingArgument(&'static str),

    /// Id argument is not a number
    #[error("`{0}` is not a todo id")]
    InvalidId(String),
}

impl Command {
    /// Parse one line of input
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for empty lines, unknown commands, missing
    /// arguments, or ids that are not numbers.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word.to_ascii_lowercase().as_str() {
            "" => Err(ParseError::Empty),
            "add" | "a" => {
                if rest.is_empty() {
                    return Err(ParseError::MissingArgument("add <text>"));
                }
                Ok(Self::Dispatch(TodoAction::AddItem {
                    text: rest.to_string(),
                }))
            }
            "toggle" | "t" => {
                let id = parse_id(rest, "toggle <id>")?;
                Ok(Self::Dispatch(TodoAction::ToggleItem { id }))
            }
            "delete" | "del" | "rm" => {
                let id = parse_id(rest, "delete <id>")?;
                Ok(Self::Dispatch(TodoAction::DeleteItem { id }))
            }
            "edit" | "e" => {
                let (id, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let id = parse_id(id, "edit <id> <text>")?;
                Ok(Self::Dispatch(TodoAction::EditItem {
                    id,
                    text: text.to_string(),
                }))
            }
            "list" | "ls" => Ok(Self::List),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_id(arg: &str, usage: &'static str) -> Result<ItemId, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingArgument(usage));
    }
    arg.parse()
        .map_err(|_| ParseError::InvalidId(arg.to_string()))
}

/// Render the whole screen for `state`
///
/// While the seed is loading the list itself is withheld.
#[must_use]
pub fn render(state: &TodoState) -> String {
    let mut out = String::new();
    let counts = state.counts();

    let _ = writeln!(out, "== {TITLE} ==");
    let _ = writeln!(
        out,
        "Total: {}  Active: {}  Completed: {}",
        counts.total, counts.active, counts.completed
    );

    match &state.seed {
        SeedStatus::Loading => {
            let _ = writeln!(out, "Loading todos...");
            return out;
        }
        SeedStatus::Failed { message } => {
            let _ = writeln!(out, "Error: {message}");
        }
        SeedStatus::Idle | SeedStatus::Populated => {}
    }

    if state.items.is_empty() {
        let _ = writeln!(out, "{EMPTY_MESSAGE}");
        return out;
    }

    for item in &state.items {
        let mark = if item.completed { 'x' } else { ' ' };
        let _ = writeln!(out, "[{mark}] #{} {}", item.id, item.text);
    }

    out
}
