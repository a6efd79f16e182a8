use clap::{Parser, Subcommand};
use runner::handler;
use runner::settings::Settings;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "runner")]
#[command(about = "Keeps a GitHub activity graph populated with scheduled empty commits")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one invocation, the way the scheduler would
    Invoke {
        /// JSON event payload file (accepted and ignored, like a schedule event)
        #[arg(short, long)]
        event: Option<PathBuf>,
    },
    /// Resolve settings and print the target without contacting GitHub
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Invoke { event } => {
            let payload = load_event(event.as_deref())?;
            let result = handler::handle(payload).await;
            println!("{}", serde_json::to_string(&result)?);

            if !result.is_success() {
                std::process::exit(1);
            }
        }
        Commands::Check => {
            let settings = Settings::from_env()?;
            println!("Configured for {}", settings.target());
        }
    }

    Ok(())
}

fn load_event(path: Option<&Path>) -> Result<Value, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(Value::Null),
    }
}
