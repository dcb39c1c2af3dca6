use clap::{Parser, Subcommand};

/// Command-line control of the hosted game server
#[derive(Parser)]
#[command(name = "bh", version, about = "Control the hosted game server")]
pub struct Cli {
    /// Control-plane URL
    #[arg(long, global = true, default_value = "http://127.0.0.1:8000")]
    pub url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current lifecycle state
    Status,
    /// Ask for the server to be started
    Start,
    /// Ask for the server to be stopped
    Stop,
}
