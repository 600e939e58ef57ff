//! Command handlers for the LiquidDoc console.
//!
//! Each handler runs one parsed command against the catalog, the session and
//! the preferences, and builds the reply shown to the user.

use chrono::Utc;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{CatalogExport, FileFilter, FileRecord, NewFile, Privacy};
use crate::console::commands::{Command, CommandResult, CommandStatus, ThemeAction};
use crate::console::responses::*;
use crate::console::state::Console;
use crate::error::AppError;
use crate::error::handlers::{error_to_reply, handle_error};
use crate::session::{Navigation, Role, UserProfile};
use crate::utils::{format_file_size, is_valid_display_name, is_valid_email};

const HELP_LINES: [&str; 14] = [
    "LOGIN <email> [user|admin|guest] [display name]",
    "LOGOUT",
    "WHOAMI",
    "ADD <name> <size> [mime/type] [public|private]",
    "LIST [all|public|private|recent]",
    "GET <id>",
    "DEL <id>",
    "SEARCH [query]",
    "PRIVACY <id> <public|private>",
    "STATS (admin)",
    "EXPORT [path] (admin)",
    "THEME [dark|light|toggle]",
    "HELP",
    "QUIT",
];

/// Dispatches a parsed command to its handler.
pub fn handle_command(console: &mut Console, command: &Command) -> CommandResult {
    match command {
        Command::LoginPrompt => handle_cmd_login_prompt(console),
        Command::Login { email, role, name } => {
            handle_cmd_login(console, email, *role, name.as_deref())
        }
        Command::Logout => handle_cmd_logout(console),
        Command::WhoAmI => handle_cmd_whoami(console),
        Command::Add {
            name,
            size,
            file_type,
            privacy,
        } => handle_cmd_add(console, name, *size, file_type.as_deref(), *privacy),
        Command::List(filter) => handle_cmd_list(console, *filter),
        Command::Get(id) => handle_cmd_get(console, id),
        Command::Del(id) => handle_cmd_del(console, id),
        Command::Search(query) => handle_cmd_search(console, query),
        Command::SetPrivacy { id, privacy } => handle_cmd_privacy(console, id, *privacy),
        Command::Stats => handle_cmd_stats(console),
        Command::Export(path) => handle_cmd_export(console, path.as_deref()),
        Command::Theme(action) => handle_cmd_theme(console, action),
        Command::Help => handle_cmd_help(),
        Command::Quit => handle_cmd_quit(),
    }
}

/// Reply for an error raised before or during a command.
pub fn handle_app_error(err: AppError) -> CommandResult {
    handle_error(&err);
    CommandResult::failure(err.to_string(), error_to_reply(&err))
}

/// Turns a refused auth check into a reply; `None` means go ahead.
fn check_access(nav: Navigation) -> Option<CommandResult> {
    let message = match nav {
        Navigation::Stay => return None,
        Navigation::Login => "Not logged in. Use LOGIN <email>",
        Navigation::UserDashboard => "Admins only",
        Navigation::AdminDashboard => "Not available to admins",
    };
    Some(CommandResult::failure(
        message,
        format_response(NOT_LOGGED_IN, message),
    ))
}

fn listing(header: &str, records: &[&FileRecord]) -> CommandResult {
    let now = Utc::now();
    let lines: Vec<String> = records.iter().map(|r| format_record(r, &now)).collect();
    CommandResult::success(format_listing(
        STATUS,
        &format!("{} ({} files)", header, records.len()),
        &lines,
    ))
}

fn not_found(id: &str) -> CommandResult {
    CommandResult::failure(
        "Not found",
        format_response(NOT_FOUND, &format!("No file with id {}", id)),
    )
}

fn handle_cmd_login_prompt(console: &mut Console) -> CommandResult {
    match console.preferences.saved_email() {
        Some(email) => CommandResult::success(format_response(
            OK,
            &format!("Last login: {}. Use LOGIN <email>", email),
        )),
        None => CommandResult::success(format_response(OK, "Use LOGIN <email>")),
    }
}

/// Handles LOGIN: validates the form fields, opens the session and
/// remembers the email for the next prompt.
fn handle_cmd_login(
    console: &mut Console,
    email: &str,
    role: Role,
    name: Option<&str>,
) -> CommandResult {
    // 1. Form validation
    if !is_valid_email(email) {
        return CommandResult::failure(
            "Invalid email",
            format_response(BAD_ARGUMENTS, "Please enter a valid email address"),
        );
    }
    if let Some(name) = name {
        if !is_valid_display_name(name) {
            return CommandResult::failure(
                "Invalid name",
                format_response(BAD_ARGUMENTS, "Please enter your full name"),
            );
        }
    }

    // 2. Open the session
    let profile = UserProfile::new(email, name.map(str::to_string), role);
    let greeting = format!("Welcome {} ({})", profile.name, profile.role);
    if !console.session.login(profile) {
        return CommandResult::failure(
            "Session not stored",
            format_response(STORE_FAILED, "Could not store the session"),
        );
    }

    // 3. Remember the email for the login prompt
    console.preferences.remember_email(email);

    CommandResult::success(format_response(LOGGED_IN, &greeting))
}

fn handle_cmd_logout(console: &mut Console) -> CommandResult {
    if !console.session.is_logged_in() {
        return CommandResult::failure(
            "Not logged in",
            format_response(NOT_LOGGED_IN, "Not logged in"),
        );
    }

    let nav = console.session.logout();
    let message = match nav.entry_point() {
        Some(entry) => format!("Logged out, back to {}", entry),
        None => "Logged out".to_string(),
    };
    CommandResult::success(format_response(OK, &message))
}

fn handle_cmd_whoami(console: &mut Console) -> CommandResult {
    if let Some(denied) = check_access(console.session.require_auth()) {
        return denied;
    }

    match console.session.get_user() {
        Some(user) => CommandResult::success(format_response(
            OK,
            &format!("{} <{}> role={}", user.name, user.email, user.role),
        )),
        // Flag set but no readable profile
        None => CommandResult::failure(
            "Profile missing",
            format_response(NOT_LOGGED_IN, "Session has no profile. Use LOGIN <email>"),
        ),
    }
}

/// Handles ADD: records the metadata of a file. No content is transferred.
fn handle_cmd_add(
    console: &mut Console,
    name: &str,
    size: u64,
    file_type: Option<&str>,
    privacy: Option<Privacy>,
) -> CommandResult {
    if let Some(denied) = check_access(console.session.require_auth()) {
        return denied;
    }

    let mut new_file = NewFile::new(name, size);
    if let Some(file_type) = file_type {
        new_file = new_file.with_type(file_type);
    }
    if let Some(privacy) = privacy {
        new_file = new_file.with_privacy(privacy);
    }

    match console.catalog.try_add(new_file) {
        Ok(record) => CommandResult::success(format_response(
            ACTION_DONE,
            &format!("Added {} as {} ({})", record.name, record.id, record.privacy),
        )),
        Err(e) => handle_app_error(e.into()),
    }
}

fn handle_cmd_list(console: &mut Console, filter: FileFilter) -> CommandResult {
    if let Some(denied) = check_access(console.session.require_auth()) {
        return denied;
    }

    let records = console.catalog.filter(filter);
    info!("Listed {} files ({})", records.len(), filter);
    listing(filter.as_str(), &records)
}

fn handle_cmd_get(console: &mut Console, id: &str) -> CommandResult {
    if let Some(denied) = check_access(console.session.require_auth()) {
        return denied;
    }

    match console.catalog.get(id) {
        Some(record) => listing("file", &[record]),
        None => not_found(id),
    }
}

fn handle_cmd_del(console: &mut Console, id: &str) -> CommandResult {
    if let Some(denied) = check_access(console.session.require_auth()) {
        return denied;
    }

    match console.catalog.try_remove(id) {
        Ok(true) => CommandResult::success(format_response(ACTION_DONE, &format!("Deleted {}", id))),
        Ok(false) => not_found(id),
        Err(e) => handle_app_error(e.into()),
    }
}

fn handle_cmd_search(console: &mut Console, query: &str) -> CommandResult {
    if let Some(denied) = check_access(console.session.require_auth()) {
        return denied;
    }

    let records = console.catalog.search(query);
    listing(&format!("search '{}'", query), &records)
}

fn handle_cmd_privacy(console: &mut Console, id: &str, privacy: Privacy) -> CommandResult {
    if let Some(denied) = check_access(console.session.require_auth()) {
        return denied;
    }

    match console.catalog.try_update_privacy(id, privacy) {
        Ok(true) => CommandResult::success(format_response(
            ACTION_DONE,
            &format!("{} is now {}", id, privacy),
        )),
        Ok(false) => not_found(id),
        Err(e) => handle_app_error(e.into()),
    }
}

/// Handles STATS: the admin dashboard totals.
fn handle_cmd_stats(console: &mut Console) -> CommandResult {
    if let Some(denied) = check_access(console.session.require_role(Role::Admin)) {
        return denied;
    }

    let stats = console.catalog.stats();
    let lines = vec![
        format!("Total files: {}", stats.total_files),
        format!("Total storage: {}", format_file_size(stats.total_bytes)),
        format!("Public files: {}", stats.public_files),
        format!("Private files: {}", stats.private_files),
    ];
    CommandResult::success(format_listing(STATUS, "Catalog statistics", &lines))
}

/// Handles EXPORT: writes a JSON snapshot of the catalog to `path`, or to
/// the dated export file in the working directory.
fn handle_cmd_export(console: &mut Console, path: Option<&str>) -> CommandResult {
    if let Some(denied) = check_access(console.session.require_role(Role::Admin)) {
        return denied;
    }

    let export = match console.catalog.try_export() {
        Ok(export) => export,
        Err(e) => return handle_app_error(e.into()),
    };
    let path = path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(export.file_name()));

    match write_export(&export, &path) {
        Ok(()) => CommandResult::success(format_response(
            ACTION_DONE,
            &format!("Exported {} files to {}", export.files.len(), path.display()),
        )),
        Err(e) => handle_app_error(e),
    }
}

fn write_export(export: &CatalogExport, path: &Path) -> Result<(), AppError> {
    let json = export.to_json()?;
    fs::write(path, json)?;
    info!("Exported {} files to {}", export.files.len(), path.display());
    Ok(())
}

fn handle_cmd_theme(console: &mut Console, action: &ThemeAction) -> CommandResult {
    let theme = match action {
        ThemeAction::Show => console.preferences.theme(),
        ThemeAction::Toggle => console.preferences.toggle_theme(),
        ThemeAction::Set(theme) => {
            if !console.preferences.set_theme(*theme) {
                return CommandResult::failure(
                    "Theme not stored",
                    format_response(STORE_FAILED, "Could not store the theme"),
                );
            }
            *theme
        }
    };
    CommandResult::success(format_response(OK, &format!("Theme: {}", theme)))
}

fn handle_cmd_help() -> CommandResult {
    let lines: Vec<String> = HELP_LINES.iter().map(|l| l.to_string()).collect();
    CommandResult::success(format_listing(HELP, "Commands", &lines))
}

fn handle_cmd_quit() -> CommandResult {
    CommandResult {
        status: CommandStatus::CloseSession,
        message: Some(format_response(BYE, "Goodbye")),
    }
}
