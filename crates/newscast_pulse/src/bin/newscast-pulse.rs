use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use newscast_pulse::{tracing::init_tracing_subscriber, EpisodeResolverBuilder, HttpFetcher};
use newscast_registry::ShowRegistry;

#[derive(Parser)]
#[command(
    name = "newscast-pulse",
    about = "Answers inline queries with the newest episode of tagesschau shows"
)]
struct Cli {
    /// Path to a JSON show registry; the embedded registry is used if unset
    #[arg(long, env = "SHOW_REGISTRY_PATH")]
    registry: Option<PathBuf>,

    /// Timeout for a single feed request in seconds
    #[arg(long, env = "FEED_TIMEOUT_SECS", default_value = "10")]
    timeout_secs: u64,

    /// Pick entries by publication date instead of feed order
    #[arg(long, env = "NEWEST_BY_DATE")]
    newest_by_date: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve an inline query and print the answer as JSON
    Query {
        /// Query text: <keyword> [quality] [link-only]
        text: Vec<String>,

        /// Inline query id echoed in the answer
        #[arg(long, default_value = "cli")]
        query_id: String,
    },
    /// List the configured shows
    Shows,
}

fn load_registry(path: Option<&PathBuf>) -> anyhow::Result<ShowRegistry> {
    match path {
        Some(path) => ShowRegistry::from_path(path)
            .with_context(|| format!("Failed to load show registry from {}", path.display())),
        None => ShowRegistry::builtin().context("Embedded show registry is invalid"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let registry = load_registry(cli.registry.as_ref())?;

    match cli.command {
        Command::Query { text, query_id } => {
            let fetcher = HttpFetcher::with_timeout(Duration::from_secs(cli.timeout_secs))
                .context("Failed to build http client")?;

            let mut builder = EpisodeResolverBuilder::new()
                .registry(&registry)
                .fetcher(fetcher);
            if cli.newest_by_date {
                builder = builder.newest_by_date();
            }
            let resolver = builder.build();

            let answer = resolver.answer(query_id, &text.join(" ")).await;
            println!("{}", serde_json::to_string_pretty(&answer)?);
        }
        Command::Shows => {
            for show in &registry {
                println!("{show}");
            }
        }
    }

    Ok(())
}
