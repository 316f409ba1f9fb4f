use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::config::API_URL_ENV;
use crate::types::UserId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table = 0,
    Json = 1,
    Compact = 2,
}

#[derive(Parser)]
#[command(name = "users")]
#[command(about = "Manage users of a REST user service", version)]
#[command(after_help = "EXAMPLES:
    users list                                   List all users
    users add -u alice -e alice@example.com      Create a user
    users update 1 -u alice2                     Change a user's username
    users delete 1                               Delete a user (asks first)
    users shell                                  Interactive session")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base address of the user service (default: http://localhost:5000)
    #[arg(long, global = true, env = API_URL_ENV)]
    pub api_url: Option<String>,

    /// Output format (table, json, compact)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show detailed error information and debug logs
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List users
    #[command(visible_alias = "ls")]
    List,
    /// Create a user
    #[command(after_help = "EXAMPLES:
    users add --username alice --email alice@example.com")]
    Add(AddArgs),
    /// Update a user's username and/or email
    #[command(after_help = "EXAMPLES:
    users update 1 --username alice2
    users update 1 --email new@example.com")]
    Update(UpdateArgs),
    /// Delete a user
    #[command(visible_alias = "rm")]
    #[command(after_help = "EXAMPLES:
    users delete 1
    users delete 1 --yes")]
    Delete(DeleteArgs),
    /// Interactive session with a persistent form
    Shell,
    /// Initialize configuration file interactively
    Init,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    users completions bash > ~/.bash_completion.d/users
    users completions zsh > ~/.zfunc/_users")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// Username of the new user
    #[arg(long, short)]
    pub username: String,

    /// Email address of the new user
    #[arg(long, short)]
    pub email: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// User ID
    pub id: UserId,

    /// New username
    #[arg(long, short)]
    pub username: Option<String>,

    /// New email address
    #[arg(long, short)]
    pub email: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// User ID
    pub id: UserId,

    /// Do not ask for confirmation
    #[arg(long, short)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update() {
        let cli = Cli::try_parse_from(["users", "update", "1", "-u", "alice2"]).unwrap();
        match cli.command {
            Commands::Update(args) => {
                assert_eq!(args.id, 1);
                assert_eq!(args.username.as_deref(), Some("alice2"));
                assert!(args.email.is_none());
            }
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn test_json_flag_overrides_format() {
        let cli = Cli::try_parse_from(["users", "list", "--json"]).unwrap();
        assert_eq!(cli.output_format(), OutputFormat::Json);
        let cli = Cli::try_parse_from(["users", "-o", "compact", "list"]).unwrap();
        assert_eq!(cli.output_format(), OutputFormat::Compact);
    }

    #[test]
    fn test_add_requires_both_fields() {
        assert!(Cli::try_parse_from(["users", "add", "-u", "alice"]).is_err());
    }
}
