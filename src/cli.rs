use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "userdir")]
#[command(about = "A CLI for browsing a remote user directory", version)]
#[command(after_help = "EXAMPLES:
    userdir users                     List all users
    userdir users --filter kilcoole   Search the list
    userdir user view 2               Show one user's details
    userdir browse                    Interactive session
    userdir users --json              Machine-readable output")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Show the error cause chain on failure
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect users
    #[command(after_help = "EXAMPLES:
    userdir user list --filter doe
    userdir user view 2")]
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// List users (alias for 'user list')
    #[command(after_help = "EXAMPLES:
    userdir users
    userdir users --filter john
    userdir users --json")]
    Users(UserListArgs),
    /// Browse the directory interactively
    #[command(after_help = "EXAMPLES:
    userdir browse")]
    Browse,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    userdir completions bash > ~/.bash_completion.d/userdir
    userdir completions zsh > ~/.zfunc/_userdir
    userdir completions fish > ~/.config/fish/completions/userdir.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    userdir init")]
    Init,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users
    List(UserListArgs),
    /// Show user details
    View {
        /// User identifier (positive integer)
        id: String,
    },
}

#[derive(Args, Clone)]
pub struct UserListArgs {
    /// Case-insensitive search over name, username, email and city
    #[arg(long, short)]
    pub filter: Option<String>,
}
