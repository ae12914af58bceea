//! Ganjifa - command line match runner
//!
//! `hotseat` runs one match with both seats driven from stdin: every input
//! line is `<seat> <json message>` (or `<seat> leave`), and everything the
//! match sends is printed as `<seat> <json message>`.

use anyhow::{bail, Context as _};
use clap::{Parser, Subcommand};
use ganjifa::{
    cards,
    config::MatchConfig,
    core::Seat,
    game::{MatchHandle, MatchSetup, MatchStatus},
    loader::{CardRegistry, DeckList, DeckLoader},
    protocol::{ServerMessage, Writer},
};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ganjifa")]
#[command(about = "Ganjifa - two-player card game match engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a match with both seats fed from stdin
    Hotseat {
        /// Deck file for player 1
        #[arg(value_name = "PLAYER1_DECK")]
        deck1: PathBuf,

        /// Deck file for player 2
        #[arg(value_name = "PLAYER2_DECK")]
        deck2: PathBuf,

        /// Match rules as JSON (defaults apply to missing fields)
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<PathBuf>,

        /// Seed for deck shuffles, overrides the config file
        #[arg(long)]
        seed: Option<u64>,

        /// Player 1 name
        #[arg(long, default_value = "Player 1")]
        p1_name: String,

        /// Player 2 name
        #[arg(long, default_value = "Player 2")]
        p2_name: String,
    },

    /// List the card templates in the starter set
    Cards,
}

/// Prints every message for one seat as a line on stdout
struct StdoutWriter {
    seat: Seat,
}

impl Writer for StdoutWriter {
    fn write(&self, msg: &ServerMessage) {
        let n = self.seat.index() + 1;
        match serde_json::to_string(msg) {
            Ok(json) => {
                let mut out = std::io::stdout().lock();
                if let Err(err) = writeln!(out, "{n} {json}") {
                    tracing::warn!("Couldn't write to stdout: {err}");
                }
            }
            Err(err) => tracing::warn!(header = msg.header(), "Couldn't encode message: {err}"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hotseat {
            deck1,
            deck2,
            config,
            seed,
            p1_name,
            p2_name,
        } => run_hotseat(deck1, deck2, config, seed, p1_name, p2_name).await?,
        Commands::Cards => list_cards(&cards::starter_registry()),
    }

    Ok(())
}

fn load_deck(path: &Path, registry: &CardRegistry) -> anyhow::Result<DeckList> {
    DeckLoader::load_from_file(path, registry)
        .with_context(|| format!("loading deck {}", path.display()))
}

async fn run_hotseat(
    deck1: PathBuf,
    deck2: PathBuf,
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    p1_name: String,
    p2_name: String,
) -> anyhow::Result<()> {
    let mut config = match config_path {
        Some(path) => MatchConfig::load_from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MatchConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let registry = Arc::new(cards::starter_registry());
    let decks = [load_deck(&deck1, &registry)?, load_deck(&deck2, &registry)?];

    let mut setup = MatchSetup::new(config, registry);
    for (seat, name) in Seat::BOTH.into_iter().zip([p1_name, p2_name]) {
        setup.add_player(name, Arc::new(StdoutWriter { seat }))?;
    }
    let mut m = setup.build()?;
    for (seat, deck) in Seat::BOTH.into_iter().zip(decks) {
        m.choose_deck(seat, &deck.to_ids())
            .with_context(|| format!("choosing deck for {seat}"))?;
    }
    m.start();
    let handle = MatchHandle::spawn(m)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            status = handle.finished() => {
                report(&status);
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("Input closed, stopping match");
                    break;
                };
                if let Err(err) = feed_line(&handle, &line) {
                    tracing::warn!("{err:#}");
                }
            }
        }
    }

    if let Some(m) = handle.shutdown() {
        tracing::debug!(turn = m.turn.turn_number, "Match worker joined");
    }
    Ok(())
}

/// Route one `<seat> <json>` input line to the match
fn feed_line(handle: &MatchHandle, line: &str) -> anyhow::Result<()> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(());
    }
    let Some((seat, rest)) = line.split_once(' ') else {
        bail!("expected '<seat> <message>', got '{line}'");
    };
    let seat: Seat = seat.parse()?;
    let rest = rest.trim();

    if rest == "leave" {
        handle.disconnect(seat);
    } else {
        handle.parse(seat, rest.as_bytes());
    }
    Ok(())
}

fn report(status: &MatchStatus) {
    match status {
        MatchStatus::Finished { winner, reason } => {
            tracing::info!(%winner, %reason, "Match finished");
        }
        other => tracing::info!(?other, "Match stopped before finishing"),
    }
}

fn list_cards(registry: &CardRegistry) {
    for id in registry.ids() {
        match registry.construct(id) {
            Ok(card) => println!(
                "{:>3}  {:<22} {:<8} {:<10} rank {}  {}/{}",
                id.as_u32(),
                card.name.as_str(),
                card.civilisation.to_string(),
                card.family.to_string(),
                card.rank,
                card.attack,
                card.defence
            ),
            Err(err) => tracing::warn!("{err}"),
        }
    }
}
