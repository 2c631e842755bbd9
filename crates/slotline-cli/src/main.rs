use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "slotline",
    about = "Slotline: pool slot timelines reconstructed from pipeline traces",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the slot timeline for one or more runs
    Derive {
        /// Path to slotline.toml (defaults to ./slotline.toml when present)
        #[arg(short, long)]
        config: Option<String>,
        /// Run id to fetch; repeat for a multi-run timeline
        #[arg(short, long = "run", value_name = "RUN_ID", conflicts_with = "inputs")]
        runs: Vec<String>,
        /// Read a task-instance JSON export instead of fetching; repeatable
        #[arg(short, long = "input", value_name = "FILE")]
        inputs: Vec<String>,
        /// Write the timeline rows to a file instead of stdout
        #[arg(short, long)]
        out: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Show inferred pool capacities and slot usage for a trace
    Pools {
        /// Path to slotline.toml (defaults to ./slotline.toml when present)
        #[arg(short, long)]
        config: Option<String>,
        /// Run id to fetch; repeatable
        #[arg(short, long = "run", value_name = "RUN_ID", conflicts_with = "inputs")]
        runs: Vec<String>,
        /// Read a task-instance JSON export instead of fetching; repeatable
        #[arg(short, long = "input", value_name = "FILE")]
        inputs: Vec<String>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Derive { config, runs, inputs, out, pretty } => {
            commands::derive::derive(config.as_deref(), &runs, &inputs, out.as_deref(), pretty)
                .await
        }
        Commands::Pools { config, runs, inputs, format } => {
            commands::pools::pools(config.as_deref(), &runs, &inputs, &format).await
        }
    }
}
