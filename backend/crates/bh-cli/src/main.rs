use bh_cli::{Cli, commands};

use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
