use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use colored::Colorize;
use serde_json::json;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;
use crate::form::{FormMode, UserForm};
use crate::types::User;

pub const NO_USERS: &str = "No users found";

static FORMAT: AtomicU8 = AtomicU8::new(0);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_format(format: OutputFormat) {
    FORMAT.store(format as u8, Ordering::Relaxed);
}

pub fn format() -> OutputFormat {
    match FORMAT.load(Ordering::Relaxed) {
        1 => OutputFormat::Json,
        2 => OutputFormat::Compact,
        _ => OutputFormat::Table,
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Email")]
    email: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// One list row as shown to the user: `alice (a@x.com)`.
pub fn user_line(user: &User) -> String {
    format!("{} ({})", user.username, user.email)
}

pub fn render_users(users: &[User], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(users).unwrap_or_default(),
        _ if users.is_empty() => NO_USERS.to_string(),
        OutputFormat::Table => {
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Compact => users
            .iter()
            .map(|u| format!("{}\t{}", u.id, user_line(u)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn print_users(users: &[User]) {
    println!("{}", render_users(users, format()));
}

pub fn render_form(form: &UserForm, mode: FormMode, target: Option<&User>) -> String {
    let heading = match (mode, target) {
        (FormMode::Editing, Some(user)) => format!("Editing user {}", user.id),
        _ => "New user".to_string(),
    };
    let show = |value: &str| {
        if value.is_empty() {
            "<empty>".to_string()
        } else {
            value.to_string()
        }
    };

    format!(
        "{heading}\n  Username: {}\n  Email:    {}\n  [{}]",
        show(&form.username),
        show(&form.email),
        mode.submit_label()
    )
}

pub fn print_form(form: &UserForm, mode: FormMode, target: Option<&User>) {
    println!("{}", render_form(form, mode, target));
}

/// Show the current error slot prominently.
pub fn print_error(message: &str) {
    if matches!(format(), OutputFormat::Json) {
        println!("{}", json!({ "error": message }));
    } else {
        eprintln!("{}", message.red().bold());
    }
}

/// Print a message (skipped when quiet, wrapped in an object in JSON mode)
pub fn print_message(message: &str) {
    if is_quiet() {
        return;
    }
    if matches!(format(), OutputFormat::Json) {
        println!("{}", json!({ "message": message }));
    } else {
        println!("{message}");
    }
}
