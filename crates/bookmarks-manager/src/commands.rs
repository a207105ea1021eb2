//! Shell Commands
//!
//! One command per input line. Arguments are separated by whitespace; titles
//! and search terms take the rest of the line.

use std::str::FromStr;
use thiserror::Error;

use crate::state::NodeId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Not a number: {0}")]
    InvalidNumber(String),
}

/// How `pick` changes the selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PickMode {
    #[default]
    Replace,
    Toggle,
    Range,
    Extend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Select(NodeId),
    Open(NodeId),
    Close(NodeId),
    /// An empty term clears the search
    Search(String),
    Clear,
    Pick { id: NodeId, mode: PickMode },
    All,
    Deselect,
    /// `url` is `None` for a new folder
    Add {
        parent: NodeId,
        url: Option<String>,
        title: String,
    },
    Edit { id: NodeId, title: String },
    Url { id: NodeId, url: String },
    Move {
        id: NodeId,
        parent: NodeId,
        index: usize,
    },
    /// Without an id, removes the current selection
    Remove(Option<NodeId>),
    Sort(NodeId),
    Anchor(NodeId),
    Reload,
    Batch,
    End,
    Save,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  show                          print the page
  select <folder>               list a folder
  open <folder> | close <folder>
  search [term]                 search titles and urls, no term clears
  clear                         clear the search
  pick <id> [toggle|range|extend]
  all | deselect                select every listed item, or none
  add <parent> <url|-> <title>  add a bookmark, `-` adds a folder
  edit <id> <title>             rename
  url <id> <url>                change a bookmark's url
  move <id> <parent> <index>
  remove [id]                   remove an item, or the selection
  sort <folder>                 order a folder: subfolders first, then by title
  anchor <id>                   start the next range selection at a listed item
  reload                        read the bookmarks file again
  batch | end                   group changes into one update
  save                          write the bookmarks file
  help | quit
";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .unwrap_or((line, ""));

        let command = match name {
            "" => return Err(CommandError::Empty),
            "show" | "ls" => Command::Show,
            "select" | "cd" => Command::Select(arg(rest, "select", "a folder id")?),
            "open" => Command::Open(arg(rest, "open", "a folder id")?),
            "close" => Command::Close(arg(rest, "close", "a folder id")?),
            "search" => Command::Search(rest.to_string()),
            "clear" => Command::Clear,
            "pick" => {
                let (id, mode) = split_first(rest);
                let mode = match mode {
                    "" => PickMode::Replace,
                    "toggle" => PickMode::Toggle,
                    "range" => PickMode::Range,
                    "extend" => PickMode::Extend,
                    other => return Err(CommandError::Unknown(format!("pick {}", other))),
                };
                Command::Pick {
                    id: arg(id, "pick", "an item id")?,
                    mode,
                }
            }
            "all" => Command::All,
            "deselect" => Command::Deselect,
            "add" => {
                let (parent, rest) = split_first(rest);
                let (url, title) = split_first(rest);
                let parent = arg(parent, "add", "a parent folder id")?;
                let url = arg(url, "add", "a url or `-`")?;
                Command::Add {
                    parent,
                    url: (url != "-").then_some(url),
                    title: title.to_string(),
                }
            }
            "edit" => {
                let (id, title) = split_first(rest);
                Command::Edit {
                    id: arg(id, "edit", "an item id")?,
                    title: arg(title, "edit", "a title")?,
                }
            }
            "url" => {
                let (id, url) = split_first(rest);
                Command::Url {
                    id: arg(id, "url", "an item id")?,
                    url: arg(url, "url", "a url")?,
                }
            }
            "move" | "mv" => {
                let mut args = rest.split_whitespace();
                let id = arg(args.next().unwrap_or_default(), "move", "an item id")?;
                let parent = arg(args.next().unwrap_or_default(), "move", "a parent folder id")?;
                let index = arg(args.next().unwrap_or_default(), "move", "an index")?;
                let index = index
                    .parse()
                    .map_err(|_| CommandError::InvalidNumber(index.clone()))?;
                Command::Move { id, parent, index }
            }
            "remove" | "rm" => Command::Remove((!rest.is_empty()).then(|| rest.to_string())),
            "sort" => Command::Sort(arg(rest, "sort", "a folder id")?),
            "anchor" => Command::Anchor(arg(rest, "anchor", "an item id")?),
            "reload" => Command::Reload,
            "batch" => Command::Batch,
            "end" => Command::End,
            "save" => Command::Save,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

fn split_first(s: &str) -> (&str, &str) {
    s.split_once(char::is_whitespace)
        .map(|(first, rest)| (first, rest.trim()))
        .unwrap_or((s, ""))
}

fn arg(value: &str, command: &'static str, argument: &'static str) -> Result<String, CommandError> {
    if value.is_empty() {
        return Err(CommandError::MissingArgument { command, argument });
    }
    Ok(value.to_string())
}
