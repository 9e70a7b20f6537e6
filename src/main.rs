#![allow(missing_docs)]

//! hcplog CLI — the thin collaborator over the extraction pipeline.
//!
//! One-shot subcommands: interpret a message (`chat`), list recent
//! records (`recent`), or show an HCP profile (`profile`). Output is the
//! canonical JSON payload a front end would consume.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use hcplog::agent::Agent;
use hcplog::config::HcplogConfig;
use hcplog::pipeline::Pipeline;
use hcplog::providers::openai::OpenAiCompatProvider;
use hcplog::providers::LlmProvider;
use hcplog::store::InteractionStore;

#[derive(Debug, Parser)]
#[command(name = "hcplog", about = "Log HCP interactions from free text")]
struct Cli {
    /// Write JSON logs (daily rotation) to this directory as well as stderr.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interpret one message and print the resulting UI action as JSON.
    Chat {
        /// The free-text message, e.g. "Met Dr. Smith, positive, 2025-12-02".
        message: String,
    },
    /// Print the most recently logged interactions.
    Recent {
        /// Maximum number of records to print.
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Print the interaction profile for one HCP.
    Profile {
        /// HCP name exactly as stored, e.g. "Dr. Smith".
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so config env overrides see it.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = HcplogConfig::load().context("failed to load configuration")?;

    let _guard = match cli.log_dir {
        Some(ref dir) => Some(hcplog::logging::init_with_file(dir, &config.log.level)?),
        None => {
            hcplog::logging::init_cli(&config.log.level);
            None
        }
    };

    let store = Arc::new(
        InteractionStore::open(&config.storage.db_path)
            .await
            .with_context(|| format!("failed to open store at {}", config.storage.db_path))?,
    );

    match cli.command {
        Command::Chat { message } => {
            let provider: Option<Arc<dyn LlmProvider>> = config.llm.as_ref().map(|llm| {
                Arc::new(OpenAiCompatProvider::new(
                    llm.base_url.clone(),
                    llm.api_key.clone(),
                    llm.model.clone(),
                )) as Arc<dyn LlmProvider>
            });
            let agent = Agent::new(Pipeline::new(Arc::clone(&store)), provider);

            match agent.interpret(&message).await {
                Ok(response) => println!("{}", serde_json::to_string_pretty(&response)?),
                Err(err) => {
                    warn!(error = %err, "chat request rejected");
                    let rejection = serde_json::json!({ "error": err.to_string() });
                    println!("{}", serde_json::to_string_pretty(&rejection)?);
                }
            }
        }

        Command::Recent { limit } => {
            let records = store.recent(limit).await?;
            info!(count = records.len(), "fetched recent interactions");
            println!("{}", serde_json::to_string_pretty(&records)?);
        }

        Command::Profile { name } => {
            let interactions = store.count_by_hcp(&name).await?;
            let last = store.find_by_hcp(&name, 1).await?;
            let profile = hcplog::record::HcpProfile {
                hcp_name: name,
                interactions,
                last_interaction: last.into_iter().next().map(|r| r.date),
            };
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
    }

    Ok(())
}
