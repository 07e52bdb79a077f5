use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use yatri_agents::PlannerAgent;
use yatri_core::{ConversationLog, PlanningQuery, TrainClass, TravelMode, TravelParty};
use yatri_observability::{init_tracing, EngineMetrics};
use yatri_providers::ProviderConfig;
use yatri_retrieval::Corpus;

#[derive(Debug, Parser)]
#[command(name = "yatri")]
#[command(about = "Yatri trip planning CLI")]
struct Cli {
    /// Load corpus JSON from this directory instead of the builtin set.
    #[arg(long)]
    kb_root: Option<PathBuf>,

    /// Skip every remote provider; serve static fallback data only.
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// One planning turn from structured flags, printed as pretty JSON.
    Plan {
        #[arg(long)]
        origin: Option<String>,
        #[arg(long)]
        destination: Option<String>,
        #[arg(long)]
        from_date: Option<NaiveDate>,
        #[arg(long)]
        to_date: Option<NaiveDate>,
        /// solo, couple, family, or friends.
        #[arg(long)]
        party: Option<String>,
        /// train, flight, cab, or mixed.
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        budget_min: Option<u32>,
        #[arg(long)]
        budget_max: Option<u32>,
        /// Train class code such as SL, 3A, 2A, 1A, CC, EC.
        #[arg(long)]
        class: Option<String>,
        #[arg(long)]
        passengers: Option<u8>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Interactive loop holding one in-memory conversation log.
    Chat,
    Corpus {
        #[command(subcommand)]
        command: CorpusCommand,
    },
}

#[derive(Debug, Subcommand)]
enum CorpusCommand {
    Search {
        query: String,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("yatri_cli");
    let cli = Cli::parse();

    let agent = build_agent(cli.kb_root.as_deref(), cli.offline)?;

    match cli.command {
        Command::Plan {
            origin,
            destination,
            from_date,
            to_date,
            party,
            mode,
            budget_min,
            budget_max,
            class,
            passengers,
            notes,
        } => {
            let query = PlanningQuery {
                origin,
                destination,
                from_date,
                to_date,
                party: party
                    .as_deref()
                    .map(|value| TravelParty::parse(value).context("invalid --party value"))
                    .transpose()?,
                mode: mode
                    .as_deref()
                    .map(|value| TravelMode::parse(value).context("invalid --mode value"))
                    .transpose()?,
                budget_min,
                budget_max,
                train_class: class
                    .as_deref()
                    .map(|value| TrainClass::parse(value).context("invalid --class value"))
                    .transpose()?,
                passengers,
                notes,
            };

            let mut log = ConversationLog::default();
            let response = agent.plan(Some(query), &mut log).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Chat => run_chat(agent).await?,
        Command::Corpus { command } => match command {
            CorpusCommand::Search { query, limit } => {
                let hits = agent.corpus_search(&query, limit);
                println!("{}", serde_json::to_string_pretty(&hits)?);
            }
        },
    }

    Ok(())
}

async fn run_chat(agent: PlannerAgent) -> Result<()> {
    let mut log = ConversationLog::default();

    println!("Yatri planning chat. type 'exit' to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }
        if message.is_empty() {
            continue;
        }

        let query = PlanningQuery {
            notes: Some(message.to_string()),
            ..PlanningQuery::default()
        };
        let response = agent.plan(Some(query), &mut log).await?;

        println!("\n{}\n", response.narrative);

        if let Some(status) = response.live_status.as_deref() {
            println!("Live status: {status}\n");
        }
        if !response.sources.is_empty() {
            println!("Sources:");
            for source in &response.sources {
                println!("- {} ({:.2})", source.title, source.score);
            }
            println!();
        }
    }

    Ok(())
}

fn build_agent(kb_root: Option<&Path>, offline: bool) -> Result<PlannerAgent> {
    let config = if offline {
        ProviderConfig::offline()
    } else {
        ProviderConfig::from_env()
    };

    let corpus = match kb_root {
        Some(root) => Corpus::from_dir(root)
            .with_context(|| format!("failed loading corpus from {}", root.display()))?,
        None => Corpus::builtin(),
    };

    PlannerAgent::new(Arc::new(corpus), &config, EngineMetrics::shared())
}
