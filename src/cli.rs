use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(about, version, author)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[clap(short = 'c', long, env = "PORTFOLIO_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log fewer messages
    #[clap(short = 'q', long, global = true)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the portfolio web server
    Serve(ServeArgs),

    /// Replace all site content with the contents of a TOML content file
    Import(ImportArgs),

    /// List received contact messages
    Messages(MessagesArgs),

    /// Mark a contact message as read
    MarkRead(MarkReadArgs),

    /// Delete a contact message
    DeleteMessage(DeleteMessageArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to
    #[clap(long)]
    pub host: Option<String>,

    /// HTTP server port
    #[clap(short = 'p', long, env = "PORT")]
    pub port: Option<u16>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Path to the content file
    pub content: PathBuf,
}

#[derive(Args)]
pub struct MessagesArgs {
    /// Only show messages that haven't been read
    #[clap(short = 'u', long)]
    pub unread: bool,
}

#[derive(Args)]
pub struct MarkReadArgs {
    /// Id of the message
    pub id: i32,

    /// Mark the message as unread instead
    #[clap(long)]
    pub unread: bool,
}

#[derive(Args)]
pub struct DeleteMessageArgs {
    /// Id of the message
    pub id: i32,
}
