use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;
use tracing::{debug, error, info};

use flashdeck::config::{ClientConfig, DeckParams, MAX_BATCH_SIZE};
use flashdeck::render::{render_deck_markdown, render_deck_text};
use flashdeck::{define_term, run_deck, DeckError, WikiClient};

/// Flashdeck - flashcards of related topics from Wikipedia
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// MediaWiki API endpoint (overrides FLASHDECK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a deck of cards related to a subject
    Deck {
        /// Subject article title
        subject: String,

        /// Number of cards to generate
        #[arg(short = 'n', long, default_value_t = 10)]
        deck_size: usize,

        /// Description length in characters; 0 keeps the whole intro section
        #[arg(short, long, default_value_t = 300)]
        desc_length: usize,

        /// Candidates fetched per requested card
        #[arg(long, default_value_t = 10)]
        multiplier: usize,

        /// Titles per metadata request
        #[arg(long, default_value_t = MAX_BATCH_SIZE)]
        batch_size: usize,

        /// Longest phrase feature used for similarity
        #[arg(long, default_value_t = 3)]
        max_ngram: usize,

        /// Title prefix to skip (repeatable; replaces the defaults)
        #[arg(long = "exclude")]
        exclude: Vec<String>,

        /// Write the deck as JSON to this path
        #[arg(short, long)]
        output: Option<String>,

        /// Stdout format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the intro extract of a single term
    Define {
        term: String,

        #[arg(short, long, default_value_t = 300)]
        desc_length: usize,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Markdown,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // CLI arg > FLASHDECK_* env > defaults
    let mut client_cfg = ClientConfig::from_env();
    if let Some(url) = args.api_url {
        debug!("Using API URL from --api-url: {}", url);
        client_cfg.api_url = url;
    }
    client_cfg.timeout = Duration::from_secs(args.timeout_secs);

    match args.command {
        Command::Deck {
            subject,
            deck_size,
            desc_length,
            multiplier,
            batch_size,
            max_ngram,
            exclude,
            output,
            format,
        } => {
            let mut params = DeckParams {
                deck_size,
                desc_length,
                fetch_multiplier: multiplier,
                batch_size,
                max_ngram,
                ..Default::default()
            };
            if !exclude.is_empty() {
                params.excluded_prefixes = exclude;
            }
            params.validate()?;

            let client = WikiClient::new(&client_cfg)?;
            let deck = match run_deck(&client, &subject, &params).await {
                Ok(deck) => deck,
                Err(e) => return Err(report(e)),
            };

            if let Some(path) = output {
                std::fs::write(&path, serde_json::to_vec_pretty(&deck)?)
                    .with_context(|| format!("writing deck to {}", path))?;
                info!("Deck written - path={}", path);
            }

            match format {
                Format::Text => print!("{}", render_deck_text(&deck)),
                Format::Markdown => print!("{}", render_deck_markdown(&deck)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&deck)?),
            }
        }
        Command::Define { term, desc_length } => {
            let client = WikiClient::new(&client_cfg)?;
            match define_term(&client, &term, desc_length).await {
                Ok((title, text)) => println!("{}\n\n{}", title, text),
                Err(e) => return Err(report(e)),
            }
        }
    }

    Ok(())
}

/// Log a pipeline failure; subject misses also list what open search found.
fn report(err: DeckError) -> anyhow::Error {
    if err.needs_fallback() {
        let suggestions = err.suggestions();
        if suggestions.is_empty() {
            error!("{} - nothing close was found, try another subject", err);
        } else {
            error!("{} - did you mean: {}?", err, suggestions.join(", "));
        }
    }
    anyhow::Error::new(err)
}
