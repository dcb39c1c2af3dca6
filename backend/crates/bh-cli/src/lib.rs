pub mod cli;
pub mod client;
pub mod commands;

pub use cli::{Cli, Commands};
pub use client::client::Client;
pub use client::error::{CliClientResult, ClientError};
