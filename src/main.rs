//! pair CLI - convenience commands against the DQM GraphQL API.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cooper_pair::{CooperPair, PairConfig};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "pair")]
#[command(version)]
#[command(about = "Convenience commands against the DQM GraphQL API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "pair.toml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration file
    Validate,

    /// Show example configuration
    Example,

    /// Checkpoint operations
    Checkpoint {
        #[command(subcommand)]
        command: CheckpointCommands,
    },

    /// Dataset operations
    Dataset {
        #[command(subcommand)]
        command: DatasetCommands,
    },

    /// Evaluate a checkpoint against a local file
    Evaluate {
        /// Checkpoint id
        #[arg(long)]
        checkpoint: String,

        /// Project id owning the uploaded dataset
        #[arg(long)]
        project: String,

        /// File to upload and evaluate
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum CheckpointCommands {
    /// Fetch a checkpoint by id
    Get {
        id: String,

        /// Render as an expectations config instead of the raw payload
        #[arg(long)]
        as_config: bool,

        /// Include deactivated expectations
        #[arg(long)]
        include_inactive: bool,
    },

    /// List all checkpoints
    List,
}

#[derive(Subcommand)]
enum DatasetCommands {
    /// Upload a file as a new dataset
    Add {
        /// Project id owning the dataset
        #[arg(long)]
        project: String,

        /// File to upload
        file: PathBuf,
    },

    /// List all datasets
    List,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn print_example_config() {
    let example = r#"# cooper-pair configuration file

# GraphQL endpoint (can also use the DQM_GRAPHQL_URL env var)
graphql_endpoint = "http://localhost:3010/graphql"

# Account used for the login mutation
email = "machine@example.com"
# password = "..."            # prefer password_env outside local development
password_env = "DQM_PASSWORD"

timeout_secs = 30
max_retries = 3
"#;
    println!("{example}");
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn connect(config_path: &PathBuf) -> Result<CooperPair> {
    let config = PairConfig::from_file(config_path)
        .with_context(|| format!("Failed to load config from {config_path:?}"))?;
    CooperPair::new(&config).context("Failed to create client")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Example => {
            print_example_config();
        }

        Commands::Validate => {
            let config = PairConfig::from_file(&cli.config)
                .with_context(|| format!("Failed to load config from {:?}", cli.config))?;

            let endpoint = config
                .resolve_endpoint()
                .context("Failed to resolve endpoint")?;
            let credentials = config
                .resolve_credentials()
                .context("Failed to resolve credentials")?;

            info!("Configuration is valid");
            info!("  Endpoint: {endpoint}");
            match credentials {
                Some((email, _)) => info!("  Account:  {email}"),
                None => info!("  Account:  none (unauthenticated)"),
            }
        }

        Commands::Checkpoint { command } => {
            let pair = connect(&cli.config)?;
            match command {
                CheckpointCommands::Get {
                    id,
                    as_config,
                    include_inactive,
                } => {
                    if as_config {
                        let json = pair
                            .get_checkpoint_as_json_string(&id, include_inactive)
                            .await?;
                        println!("{json}");
                    } else {
                        let checkpoint = pair.get_checkpoint(&id).await?;
                        print_json(&checkpoint)?;
                    }
                }
                CheckpointCommands::List => {
                    let checkpoints = pair.list_checkpoints().await?;
                    print_json(&checkpoints)?;
                }
            }
        }

        Commands::Dataset { command } => {
            let pair = connect(&cli.config)?;
            match command {
                DatasetCommands::Add { project, file } => {
                    let dataset = pair.add_dataset_from_path(&file, &project, None).await?;
                    print_json(&dataset)?;
                }
                DatasetCommands::List => {
                    let datasets = pair.list_datasets().await?;
                    print_json(&datasets)?;
                }
            }
        }

        Commands::Evaluate {
            checkpoint,
            project,
            file,
        } => {
            let pair = connect(&cli.config)?;
            let evaluation = pair
                .evaluate_checkpoint_on_path(&checkpoint, &file, &project, None)
                .await?;
            print_json(&evaluation)?;
        }
    }

    Ok(())
}
