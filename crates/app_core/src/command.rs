//! Command vocabulary of the text front end

use crate::tags::GroupKind;
use app_fs::Rotation;
use std::path::PathBuf;
use thiserror::Error;

/// A user action, parsed from one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the images of the folder
    List,
    Next,
    Prev,
    Open(PathBuf),
    Refresh,
    /// Show the tabs and their tags
    Tabs,
    Check { tab: usize, tag: String },
    Uncheck { tab: usize, tag: String },
    Toggle { tab: usize, tag: String },
    AddTag { tab: usize, tag: String },
    RemoveTag { tab: usize, tag: String },
    Pattern { tab: usize, pattern: String },
    NewTab { kind: GroupKind, label: String },
    CloseTab { tab: usize },
    Label { tab: usize, label: String },
    Preview,
    Rename,
    Delete,
    Rotate(Rotation),
    Help,
    Quit,
}

/// Why a line could not be understood
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a tab number")]
    BadTab(String),
}

/// One line per command, shown by `help`
pub const HELP: &str = "\
ls                      list images of the folder
next | prev             move the selection
open <folder>           browse another folder
refresh                 re-read the folder
tabs                    show tabs and tags
check <tab> <tag>       check a tag
uncheck <tab> <tag>     uncheck a tag
toggle <tab> <tag>      flip a tag
add <tab> <tag>         add a tag to a tab
rm <tab> <tag>          remove a tag from a tab
pattern <tab> [text]    set the pattern of a date tab, spaces kept (empty disables it)
newtab tags|date <name> append a tab
closetab <tab>          remove a tab
label <tab> <name>      rename a tab
preview                 show the name a rename would give
rename                  rename the current image
delete                  delete the current image
rotate left|right       rotate the current image
quit                    save tabs and exit";

impl Command {
    /// Parse a line. Tab numbers are 1-based on input and 0-based here.
    pub fn parse(line: &str) -> Result<Command, ParseError> {
        let line = line.trim_end_matches(|c| c == '\r' || c == '\n').trim_start();
        let (word, raw_rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line, ""),
        };
        let rest = raw_rest.trim();

        match word.to_ascii_lowercase().as_str() {
            "" => Err(ParseError::Empty),
            "ls" | "list" => Ok(Command::List),
            "next" | "n" => Ok(Command::Next),
            "prev" | "p" => Ok(Command::Prev),
            "open" | "cd" => {
                if rest.is_empty() {
                    Err(ParseError::Usage("open <folder>"))
                } else {
                    Ok(Command::Open(PathBuf::from(rest)))
                }
            }
            "refresh" => Ok(Command::Refresh),
            "tabs" => Ok(Command::Tabs),
            "check" => tab_and_text(rest, "check <tab> <tag>")
                .map(|(tab, tag)| Command::Check { tab, tag }),
            "uncheck" => tab_and_text(rest, "uncheck <tab> <tag>")
                .map(|(tab, tag)| Command::Uncheck { tab, tag }),
            "toggle" | "t" => tab_and_text(rest, "toggle <tab> <tag>")
                .map(|(tab, tag)| Command::Toggle { tab, tag }),
            "add" => tab_and_text(rest, "add <tab> <tag>")
                .map(|(tab, tag)| Command::AddTag { tab, tag }),
            "rm" => tab_and_text(rest, "rm <tab> <tag>")
                .map(|(tab, tag)| Command::RemoveTag { tab, tag }),
            "pattern" => {
                // Everything after the single blank following the tab number,
                // so patterns may begin or end with spaces
                let raw = raw_rest.trim_start();
                let (number, pattern) = raw.split_once(char::is_whitespace).unwrap_or((raw.trim_end(), ""));
                let tab = parse_tab(number, "pattern <tab> [text]")?;
                Ok(Command::Pattern { tab, pattern: pattern.to_string() })
            }
            "newtab" => {
                let (kind, label) = rest
                    .split_once(char::is_whitespace)
                    .map(|(k, l)| (k, l.trim()))
                    .unwrap_or((rest, ""));
                let kind: GroupKind = kind
                    .parse()
                    .map_err(|_| ParseError::Usage("newtab tags|date <name>"))?;
                let label = match (kind, label) {
                    (GroupKind::Date, "") => crate::tags::DATE_LABEL.to_string(),
                    (GroupKind::Tags, "") => return Err(ParseError::Usage("newtab tags|date <name>")),
                    (_, label) => label.to_string(),
                };
                Ok(Command::NewTab { kind, label })
            }
            "closetab" => {
                let (tab, extra) = split_tab(rest, "closetab <tab>")?;
                if extra.is_empty() {
                    Ok(Command::CloseTab { tab })
                } else {
                    Err(ParseError::Usage("closetab <tab>"))
                }
            }
            "label" => tab_and_text(rest, "label <tab> <name>")
                .map(|(tab, label)| Command::Label { tab, label }),
            "preview" => Ok(Command::Preview),
            "rename" | "r" => Ok(Command::Rename),
            "delete" | "del" => Ok(Command::Delete),
            "rotate" => match rest.to_ascii_lowercase().as_str() {
                "left" => Ok(Command::Rotate(Rotation::CounterClockwise)),
                "right" => Ok(Command::Rotate(Rotation::Clockwise)),
                _ => Err(ParseError::Usage("rotate left|right")),
            },
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

/// Split a leading 1-based tab number from the rest of the line
fn split_tab<'a>(rest: &'a str, usage: &'static str) -> Result<(usize, &'a str), ParseError> {
    let (number, text) = match rest.split_once(char::is_whitespace) {
        Some((number, text)) => (number, text.trim()),
        None => (rest, ""),
    };
    Ok((parse_tab(number, usage)?, text))
}

fn parse_tab(number: &str, usage: &'static str) -> Result<usize, ParseError> {
    if number.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    match number.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ParseError::BadTab(number.to_string())),
    }
}

fn tab_and_text(rest: &str, usage: &'static str) -> Result<(usize, String), ParseError> {
    let (tab, text) = split_tab(rest, usage)?;
    if text.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    Ok((tab, text.to_string()))
}
