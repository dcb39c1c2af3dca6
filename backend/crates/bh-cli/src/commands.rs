use crate::{Cli, CliClientResult, Client, Commands};

use serde_json::Value;

/// Dispatch the parsed command against the control plane
pub async fn run(cli: Cli) -> CliClientResult<()> {
    let client = Client::new(&cli.url);

    let body = match cli.command {
        Commands::Status => client.status().await?,
        Commands::Start => client.start().await?,
        Commands::Stop => client.stop().await?,
    };

    print_state(&body);

    Ok(())
}

fn print_state(body: &Value) {
    let server = &body["server"];

    let phase = server["phase"].as_str().unwrap_or("unknown");
    println!("phase: {}", phase);

    if let Some(address) = server["address"].as_str() {
        println!("address: {}", address);
    }

    if let Some(run) = server.get("active_run") {
        println!(
            "in-flight: {} run {} (since {})",
            run["kind"].as_str().unwrap_or("?"),
            run["id"].as_str().unwrap_or("?"),
            run["started_at"].as_str().unwrap_or("?"),
        );
    }

    if let Some(error) = server.get("last_error") {
        println!(
            "last error: [{}] {} (at {})",
            error["kind"].as_str().unwrap_or("?"),
            error["message"].as_str().unwrap_or("?"),
            error["at"].as_str().unwrap_or("?"),
        );
    }
}
