use clap::{Args, Parser, Subcommand, ValueEnum};
use infrastructure::config::{LogFormat, LogLevel};
use infrastructure::constants::{DEFAULT_CONFIG_PATH, DEFAULT_HTTP_PORT};

#[derive(Parser, Debug)]
#[command(
    name = "alertdispatch-agent",
    about = "Emergency SMS alert dispatch service",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Log level override (takes precedence over config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Log format: json (default, production) or text (development)
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    /// API key for authenticated API requests
    #[arg(long, env = "ALERTDISPATCH_TOKEN", global = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    Table,
    /// Raw JSON from the API
    Json,
}

/// Connection parameters for reaching a running service.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Service API host
    #[arg(long, default_value = "127.0.0.1", env = "ALERTDISPATCH_HOST")]
    pub host: String,

    /// Service API port
    #[arg(long, default_value_t = DEFAULT_HTTP_PORT, env = "ALERTDISPATCH_PORT")]
    pub port: u16,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display version information
    Version,

    /// Check service liveness and readiness
    Health {
        #[command(flatten)]
        conn: ConnectionArgs,
    },

    /// Display Prometheus metrics
    Metrics {
        #[command(flatten)]
        conn: ConnectionArgs,
    },

    /// Send a single SMS to one recipient
    Send {
        #[command(flatten)]
        conn: ConnectionArgs,

        /// Destination phone number (E.164)
        #[arg(long)]
        to: String,

        /// Message body
        #[arg(long)]
        message: String,
    },

    /// Create and inspect emergency alerts
    Alerts(DomainArgs<AlertsCommand>),
}

/// Generic domain args: connection + subcommand.
#[derive(Args, Debug)]
pub struct DomainArgs<T: Subcommand> {
    #[command(flatten)]
    pub conn: ConnectionArgs,

    #[command(subcommand)]
    pub command: T,
}

#[derive(Subcommand, Debug)]
pub enum AlertsCommand {
    /// Create an alert and fan it out to all recipients
    Create {
        /// Message body sent to every recipient
        #[arg(long)]
        message: String,

        /// Recipient phone number (repeat for multiple)
        #[arg(long = "recipient")]
        recipients: Vec<String>,
    },
    /// Fetch one alert record with its delivery results
    Get {
        /// Alert id
        id: String,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
