use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "catalyst",
    about = "Catalyst Connect entity store operator tool",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory, overriding the configuration
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Kind {
    User,
    Mentor,
    Connection,
    Chat,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load the built-in datasets
    Seed,
    /// Page through one kind in index order
    List(ListArgs),
    /// Browse or search the mentor directory
    Mentors(MentorsArgs),
    /// Show one record
    Show(ShowArgs),
    /// Delete records by id
    Delete(DeleteArgs),
    /// Request a mentorship connection
    Connect(ConnectArgs),
    /// Accept or decline a connection
    Respond(RespondArgs),
    /// Post a message to a chat board
    Send(SendArgs),
    /// Print the messages of a chat board
    Messages(MessagesArgs),
}

#[derive(Args)]
pub struct PageArgs {
    #[arg(long)]
    pub cursor: Option<String>,
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct ListArgs {
    pub kind: Kind,
    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args)]
pub struct MentorsArgs {
    #[arg(short, long)]
    pub search: Option<String>,
    /// Comma-separated specialty tags
    #[arg(long)]
    pub specialties: Option<String>,
    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args)]
pub struct ShowArgs {
    pub kind: Kind,
    pub id: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub kind: Kind,
    #[arg(required = true)]
    pub ids: Vec<String>,
}

#[derive(Args)]
pub struct ConnectArgs {
    pub mentor_id: String,
    pub mentee_id: String,
    #[arg(short, long)]
    pub message: Option<String>,
}

#[derive(Args)]
pub struct RespondArgs {
    pub connection_id: String,
    /// accepted | declined
    pub status: String,
}

#[derive(Args)]
pub struct SendArgs {
    pub chat_id: String,
    pub user_id: String,
    pub text: String,
}

#[derive(Args)]
pub struct MessagesArgs {
    pub chat_id: String,
}
