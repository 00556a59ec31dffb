#![forbid(unsafe_code)]

mod api_client;
mod cli;
mod commands;
mod shutdown;
mod startup;

use anyhow::Result;

use api_client::ApiClient;
use cli::{AlertsCommand, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::parse();
    let output = cli.output;

    match cli.command {
        Some(Command::Version) => {
            println!("alertdispatch-agent {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }

        Some(Command::Health { conn }) => {
            let client = ApiClient::new(&conn.host, conn.port, cli.token);
            commands::cmd_health(&client, output).await
        }

        Some(Command::Metrics { conn }) => {
            let client = ApiClient::new(&conn.host, conn.port, cli.token);
            commands::cmd_metrics(&client).await
        }

        Some(Command::Send { conn, to, message }) => {
            let client = ApiClient::new(&conn.host, conn.port, cli.token);
            commands::cmd_send(&client, &to, &message, output).await
        }

        Some(Command::Alerts(args)) => {
            let client = ApiClient::new(&args.conn.host, args.conn.port, cli.token);
            match args.command {
                AlertsCommand::Create {
                    message,
                    recipients,
                } => commands::cmd_alerts_create(&client, &message, &recipients, output).await,
                AlertsCommand::Get { id } => commands::cmd_alerts_get(&client, &id, output).await,
            }
        }

        // No subcommand = run the service daemon
        None => startup::run(&cli).await,
    }
}
