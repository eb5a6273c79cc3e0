use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

#[derive(Parser)]
#[command(name = "users")]
#[command(about = "Manage users on a remote REST API", version)]
#[command(after_help = "EXAMPLES:
    users list                        List all users
    users create --name Bob --age 25  Create a user
    users update 3 --name \"Bobby\"     Rename a user
    users delete 3                    Delete a user")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

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
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    users list
    users list --format json"
    )]
    List,
    /// Create a new user
    #[command(
        alias = "c",
        after_help = "EXAMPLES:
    users create --name \"Bob\" --age 25"
    )]
    Create(CreateArgs),
    /// Update an existing user
    #[command(
        alias = "u",
        after_help = "EXAMPLES:
    users update 3 --name \"Bobby\"
    users update 3 --age 41"
    )]
    Update(UpdateArgs),
    /// Delete a user
    #[command(
        alias = "rm",
        after_help = "EXAMPLES:
    users delete 3"
    )]
    Delete {
        /// User id
        id: i64,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    users completions bash > ~/.bash_completion.d/users
    users completions zsh > ~/.zfunc/_users
    users completions fish > ~/.config/fish/completions/users.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    users init")]
    Init,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Full name (3-30 characters)
    #[arg(long, short)]
    pub name: String,

    /// Age (18-110)
    #[arg(long, short, allow_negative_numbers = true)]
    pub age: i64,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// User id
    pub id: i64,

    /// New name (3-30 characters)
    #[arg(long, short)]
    pub name: Option<String>,

    /// New age (18-110)
    #[arg(long, short, allow_negative_numbers = true)]
    pub age: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_json_flag_overrides_format() {
        let cli = Cli::parse_from(["users", "list", "--format", "compact", "--json"]);
        assert_eq!(cli.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_parse_update() {
        let cli = Cli::parse_from(["users", "u", "3", "--age", "41"]);
        match cli.command {
            Commands::Update(args) => {
                assert_eq!(args.id, 3);
                assert_eq!(args.name, None);
                assert_eq!(args.age, Some(41));
            }
            _ => panic!("expected update"),
        }
    }
}
