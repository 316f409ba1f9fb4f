//! Interactive session: the list and the form stay alive between commands,
//! so an edit can be started, corrected after a failed submit, or cancelled.

use std::io::{self, Write};

use crate::client::UserApi;
use crate::error::Result;
use crate::output;
use crate::prompt::{self, Confirm};
use crate::sync::{Outcome, UserListSynchronizer};
use crate::types::UserId;

const HELP: &str = "\
Commands:
  list                 Re-fetch and show all users
  username <value>     Set the username field
  email <value>        Set the email field
  submit               Add the user, or update the one being edited
  edit <id>            Load a user into the form
  delete <id>          Delete a user (asks first)
  cancel               Clear the form and stop editing
  form                 Show the form
  help                 Show this help
  quit                 Leave the shell";

#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Username(String),
    Email(String),
    Submit,
    Edit(UserId),
    Delete(UserId),
    Cancel,
    Form,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> std::result::Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let id = |what: &str| -> std::result::Result<UserId, String> {
        rest.parse()
            .map_err(|_| format!("usage: {what} <id> (got '{rest}')"))
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" | "refresh" => ShellCommand::List,
        "username" | "user" => ShellCommand::Username(rest.to_string()),
        "email" => ShellCommand::Email(rest.to_string()),
        "submit" | "save" => ShellCommand::Submit,
        "edit" => ShellCommand::Edit(id("edit")?),
        "delete" | "rm" => ShellCommand::Delete(id("delete")?),
        "cancel" | "reset" => ShellCommand::Cancel,
        "form" => ShellCommand::Form,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(command))
}

pub async fn execute<A: UserApi>(
    sync: &mut UserListSynchronizer<A>,
    command: ShellCommand,
    confirm: &mut impl Confirm,
) -> Flow {
    match command {
        ShellCommand::List => {
            if sync.refresh().await == Outcome::Applied {
                output::print_users(sync.users());
            }
        }
        ShellCommand::Username(value) => sync.form_mut().set_username(value),
        ShellCommand::Email(value) => sync.form_mut().set_email(value),
        ShellCommand::Submit => {
            let valid = sync.form().validate();
            match valid {
                Err(e) => output::print_error(&e.to_string()),
                Ok(()) => {
                    if sync.submit().await == Outcome::Applied {
                        output::print_users(sync.users());
                    }
                }
            }
        }
        ShellCommand::Edit(id) => match sync.edit(id) {
            Ok(()) => output::print_form(sync.form(), sync.mode(), sync.edit_target()),
            Err(e) => output::print_error(&e.to_string()),
        },
        ShellCommand::Delete(id) => match sync.remove(id, confirm).await {
            Outcome::Applied => output::print_users(sync.users()),
            Outcome::Declined => output::print_message("Aborted."),
            Outcome::Failed => {}
        },
        ShellCommand::Cancel => {
            sync.reset_form();
            output::print_form(sync.form(), sync.mode(), sync.edit_target());
        }
        ShellCommand::Form => output::print_form(sync.form(), sync.mode(), sync.edit_target()),
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => {
            if !sync.form().is_empty() {
                output::print_message("Discarding unsaved form input.");
            }
            return Flow::Quit;
        }
    }

    if let Some(error) = sync.error() {
        output::print_error(error);
    }
    Flow::Continue
}

pub async fn run<A: UserApi>(api: A, confirm: &mut impl Confirm) -> Result<()> {
    let mut sync = UserListSynchronizer::connect(api).await;

    println!("User Management");
    println!("===============\n");
    output::print_users(sync.users());
    if let Some(error) = sync.error() {
        output::print_error(error);
    }
    println!("\nType 'help' for commands.");

    loop {
        print!("{}> ", sync.mode().submit_label());
        io::stdout().flush()?;

        let Some(line) = prompt::read_line(&mut io::stdin().lock())? else {
            println!();
            break;
        };

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                output::print_error(&message);
                continue;
            }
        };

        if execute(&mut sync, command, confirm).await == Flow::Quit {
            break;
        }
    }

    Ok(())
}
