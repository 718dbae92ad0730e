pub mod event;
pub mod grocery;
pub mod reminders;
pub mod task;
pub mod user;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "lifehub")]
#[command(about = "Tasks, reminders and groceries from the terminal.")]
pub struct CommandLine {
    /// SQLite file; overrides LIFEHUB_DB_PATH
    #[arg(long, global = true)]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage user profiles
    #[command(subcommand, alias = "u")]
    User(UserCommand),
    /// Manage tasks
    #[command(subcommand, alias = "t")]
    Task(TaskCommand),
    /// Manage calendar events
    #[command(subcommand, alias = "e")]
    Event(EventCommand),
    /// Manage the grocery list
    #[command(subcommand, alias = "g")]
    Grocery(GroceryCommand),
    /// Rank open tasks and send the digest
    #[command(subcommand, alias = "r")]
    Reminders(ReminderCommand),
}

/// Selects the acting user by mail address.
#[derive(Args)]
pub struct UserArg {
    #[arg(long, short = 'u')]
    pub user: String,
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Register a profile
    Add { name: String, email: String },
    /// Show a profile
    Show { email: String },
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// Create a task
    Add {
        #[command(flatten)]
        who: UserArg,
        title: String,
        /// low | medium | high
        #[arg(long, short = 'p')]
        priority: Option<String>,
        /// RFC 3339 or `YYYY-MM-DD HH:MM` (UTC)
        #[arg(long)]
        due: Option<String>,
        /// Estimated effort in minutes
        #[arg(long)]
        minutes: Option<u32>,
    },
    /// List all tasks
    List {
        #[command(flatten)]
        who: UserArg,
    },
    /// Mark a task completed
    Done {
        #[command(flatten)]
        who: UserArg,
        id: Uuid,
    },
    /// Delete a task
    Delete {
        #[command(flatten)]
        who: UserArg,
        id: Uuid,
    },
}

#[derive(Subcommand)]
pub enum EventCommand {
    /// Schedule an event
    Add {
        #[command(flatten)]
        who: UserArg,
        title: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List events by start time
    List {
        #[command(flatten)]
        who: UserArg,
    },
    /// Delete an event
    Delete {
        #[command(flatten)]
        who: UserArg,
        id: Uuid,
    },
}

#[derive(Subcommand)]
pub enum GroceryCommand {
    /// Add an item to the list
    Add {
        #[command(flatten)]
        who: UserArg,
        name: String,
        #[arg(long, short = 'q')]
        qty: Option<u32>,
    },
    /// Show the list, newest first
    List {
        #[command(flatten)]
        who: UserArg,
    },
    /// Tick an item off
    Check {
        #[command(flatten)]
        who: UserArg,
        id: Uuid,
    },
    /// Suggest items from purchase history
    Suggest {
        #[command(flatten)]
        who: UserArg,
        /// Task titles passed to the provider as context
        #[arg(long = "context")]
        context: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ReminderCommand {
    /// Show the most urgent open tasks
    List {
        #[command(flatten)]
        who: UserArg,
    },
    /// Mail the top tasks to the user
    Send {
        #[command(flatten)]
        who: UserArg,
        /// Print the message instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
