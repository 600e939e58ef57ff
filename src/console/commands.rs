//! Module `commands`
//!
//! Console command parsing and the data structures used to represent
//! commands, their status and their results.

use crate::catalog::{FileFilter, Privacy};
use crate::error::ConsoleError;
use crate::preferences::Theme;
use crate::session::Role;

/// A command parsed from one console line.
///
/// Verbs are case-insensitive; arguments are whitespace separated.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// `LOGIN` with no arguments: show the remembered email
    LoginPrompt,
    /// `LOGIN <email> [role] [display name...]`
    Login {
        email: String,
        role: Role,
        name: Option<String>,
    },
    Logout,
    WhoAmI,
    /// `ADD <name> <size> [mime] [public|private]`
    Add {
        name: String,
        size: u64,
        file_type: Option<String>,
        privacy: Option<Privacy>,
    },
    /// `LIST [all|public|private|recent]`
    List(FileFilter),
    Get(String),
    Del(String),
    /// `SEARCH [query...]`; an empty query lists everything
    Search(String),
    /// `PRIVACY <id> <public|private>`
    SetPrivacy { id: String, privacy: Privacy },
    Stats,
    /// `EXPORT [path]`; the default path is the dated export file name
    Export(Option<String>),
    Theme(ThemeAction),
    Help,
    Quit,
}

#[derive(Debug, PartialEq)]
pub enum ThemeAction {
    Show,
    Set(Theme),
    Toggle,
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseSession,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

impl CommandResult {
    pub fn success(message: String) -> Self {
        Self {
            status: CommandStatus::Success,
            message: Some(message),
        }
    }

    pub fn failure(reason: impl Into<String>, message: String) -> Self {
        Self {
            status: CommandStatus::Failure(reason.into()),
            message: Some(message),
        }
    }
}

/// Parses a raw console line into a [`Command`].
pub fn parse_command(raw: &str) -> Result<Command, ConsoleError> {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or("").to_ascii_uppercase();
    let rest = parts.next().unwrap_or("").trim();
    let mut args = rest.split_whitespace();

    match verb.as_str() {
        "LOGIN" => parse_login(rest),
        "LOGOUT" => Ok(Command::Logout),
        "WHOAMI" => Ok(Command::WhoAmI),
        "ADD" | "UPLOAD" => parse_add(rest),
        "LIST" | "LS" => Ok(Command::List(FileFilter::from(
            args.next().unwrap_or("all").to_ascii_lowercase().as_str(),
        ))),
        "GET" => Ok(Command::Get(required(args.next(), "id")?)),
        "DEL" | "RM" => Ok(Command::Del(required(args.next(), "id")?)),
        "SEARCH" => Ok(Command::Search(rest.to_string())),
        "PRIVACY" => {
            let id = required(args.next(), "id")?;
            let privacy = parse_privacy(&required(args.next(), "privacy")?)?;
            Ok(Command::SetPrivacy { id, privacy })
        }
        "STATS" => Ok(Command::Stats),
        "EXPORT" => Ok(Command::Export((!rest.is_empty()).then(|| rest.to_string()))),
        "THEME" => parse_theme(args.next()),
        "HELP" | "?" => Ok(Command::Help),
        "QUIT" | "EXIT" | "Q" => Ok(Command::Quit),
        _ => Err(ConsoleError::UnknownCommand(verb)),
    }
}

fn required(arg: Option<&str>, name: &'static str) -> Result<String, ConsoleError> {
    arg.map(str::to_string)
        .ok_or(ConsoleError::MissingArgument(name))
}

fn parse_privacy(value: &str) -> Result<Privacy, ConsoleError> {
    value.parse().map_err(|_| ConsoleError::InvalidArgument {
        name: "privacy",
        value: value.to_string(),
    })
}

fn parse_login(rest: &str) -> Result<Command, ConsoleError> {
    let mut args = rest.split_whitespace();
    let Some(email) = args.next() else {
        return Ok(Command::LoginPrompt);
    };

    let mut remaining: Vec<&str> = args.collect();
    let role = match remaining.first().and_then(|r| r.parse::<Role>().ok()) {
        Some(role) => {
            remaining.remove(0);
            role
        }
        None => Role::User,
    };
    let name = (!remaining.is_empty()).then(|| remaining.join(" "));

    Ok(Command::Login {
        email: email.to_string(),
        role,
        name,
    })
}

/// Options and size are taken from the end of the line, so the name may
/// contain spaces: `ADD Project Proposal.pdf 2048 application/pdf private`.
fn parse_add(rest: &str) -> Result<Command, ConsoleError> {
    let mut tokens: Vec<&str> = rest.split_whitespace().collect();
    match tokens.len() {
        0 => return Err(ConsoleError::MissingArgument("name")),
        1 => return Err(ConsoleError::MissingArgument("size")),
        _ => {}
    }

    // At most one privacy and one MIME token, in either order, before the
    // name and size.
    let mut file_type = None;
    let mut privacy = None;
    while tokens.len() > 2 {
        let last = tokens[tokens.len() - 1];
        match last.parse::<Privacy>() {
            Ok(p) if privacy.is_none() => privacy = Some(p),
            _ if file_type.is_none() && last.contains('/') => {
                file_type = Some(last.to_string())
            }
            _ => break,
        }
        tokens.pop();
    }

    let raw_size = tokens.pop().unwrap_or_default();
    let size = raw_size
        .parse::<u64>()
        .map_err(|_| ConsoleError::InvalidArgument {
            name: "size",
            value: raw_size.to_string(),
        })?;

    Ok(Command::Add {
        name: tokens.join(" "),
        size,
        file_type,
        privacy,
    })
}

fn parse_theme(arg: Option<&str>) -> Result<Command, ConsoleError> {
    let action = match arg.map(str::to_ascii_lowercase).as_deref() {
        None => ThemeAction::Show,
        Some("toggle") => ThemeAction::Toggle,
        Some(other) => ThemeAction::Set(other.parse().map_err(|_| {
            ConsoleError::InvalidArgument {
                name: "theme",
                value: other.to_string(),
            }
        })?),
    };
    Ok(Command::Theme(action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_are_case_insensitive() {
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command("  WhoAmI "), Ok(Command::WhoAmI));
        assert_eq!(parse_command("ls"), Ok(Command::List(FileFilter::All)));
    }

    #[test]
    fn login_variants() {
        assert_eq!(parse_command("LOGIN"), Ok(Command::LoginPrompt));
        assert_eq!(
            parse_command("LOGIN ada@demo.com"),
            Ok(Command::Login {
                email: "ada@demo.com".into(),
                role: Role::User,
                name: None,
            })
        );
        assert_eq!(
            parse_command("LOGIN ada@demo.com admin Ada Lovelace"),
            Ok(Command::Login {
                email: "ada@demo.com".into(),
                role: Role::Admin,
                name: Some("Ada Lovelace".into()),
            })
        );
        assert_eq!(
            parse_command("LOGIN ada@demo.com Ada"),
            Ok(Command::Login {
                email: "ada@demo.com".into(),
                role: Role::User,
                name: Some("Ada".into()),
            })
        );
    }

    #[test]
    fn add_with_optional_type_and_privacy() {
        assert_eq!(
            parse_command("ADD report.pdf 1024 application/pdf private"),
            Ok(Command::Add {
                name: "report.pdf".into(),
                size: 1024,
                file_type: Some("application/pdf".into()),
                privacy: Some(Privacy::Private),
            })
        );
        assert_eq!(
            parse_command("add notes.txt 7 public"),
            Ok(Command::Add {
                name: "notes.txt".into(),
                size: 7,
                file_type: None,
                privacy: Some(Privacy::Public),
            })
        );
    }

    #[test]
    fn add_accepts_names_with_spaces() {
        assert_eq!(
            parse_command("ADD Project Proposal.pdf 2048"),
            Ok(Command::Add {
                name: "Project Proposal.pdf".into(),
                size: 2048,
                file_type: None,
                privacy: None,
            })
        );
        assert_eq!(
            parse_command("ADD Budget 2024 final.xlsx 512 private text/csv"),
            Ok(Command::Add {
                name: "Budget 2024 final.xlsx".into(),
                size: 512,
                file_type: Some("text/csv".into()),
                privacy: Some(Privacy::Private),
            })
        );
    }

    #[test]
    fn add_rejects_bad_arguments() {
        assert_eq!(
            parse_command("ADD"),
            Err(ConsoleError::MissingArgument("name"))
        );
        assert_eq!(
            parse_command("ADD a.txt"),
            Err(ConsoleError::MissingArgument("size"))
        );
        assert!(matches!(
            parse_command("ADD a.txt -5"),
            Err(ConsoleError::InvalidArgument { name: "size", .. })
        ));
        assert!(matches!(
            parse_command("ADD a.txt 5 banana"),
            Err(ConsoleError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn list_filters() {
        assert_eq!(parse_command("LIST recent"), Ok(Command::List(FileFilter::Recent)));
        assert_eq!(parse_command("LIST PRIVATE"), Ok(Command::List(FileFilter::Private)));
        assert_eq!(parse_command("LIST starred"), Ok(Command::List(FileFilter::All)));
    }

    #[test]
    fn search_keeps_the_whole_query() {
        assert_eq!(
            parse_command("SEARCH quarterly report"),
            Ok(Command::Search("quarterly report".into()))
        );
        assert_eq!(parse_command("SEARCH"), Ok(Command::Search(String::new())));
    }

    #[test]
    fn privacy_and_theme() {
        assert_eq!(
            parse_command("PRIVACY abc private"),
            Ok(Command::SetPrivacy {
                id: "abc".into(),
                privacy: Privacy::Private,
            })
        );
        assert!(parse_command("PRIVACY abc hidden").is_err());
        assert_eq!(parse_command("THEME"), Ok(Command::Theme(ThemeAction::Show)));
        assert_eq!(parse_command("THEME toggle"), Ok(Command::Theme(ThemeAction::Toggle)));
        assert_eq!(
            parse_command("THEME Light"),
            Ok(Command::Theme(ThemeAction::Set(Theme::Light)))
        );
    }

    #[test]
    fn export_takes_an_optional_path() {
        assert_eq!(parse_command("EXPORT"), Ok(Command::Export(None)));
        assert_eq!(
            parse_command("export backups/my export.json"),
            Ok(Command::Export(Some("backups/my export.json".into())))
        );
    }

    #[test]
    fn unknown_verbs_are_errors() {
        assert_eq!(
            parse_command("FROB x"),
            Err(ConsoleError::UnknownCommand("FROB".into()))
        );
    }
}
