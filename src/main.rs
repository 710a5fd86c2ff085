use anyhow::{Context, Result};
use clap::Parser;
use pokemon_duel::generator::random_combatant;
use pokemon_duel::{
    Battle, BattleConfig, BattleEvent, BattleSide, Dex, EventSink, HumanSelector, MoveSelector,
    RandomSelector, TurnRng,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const COMPUTER: &str = "computer";
const COMPUTER_NAMES: [&str; 2] = ["Brock", "Misty"];

/// Pokemon Duel - a one-on-one battle between two trainers
#[derive(Parser, Debug)]
#[command(name = "pokemon-duel", version)]
#[command(about = "Battle two randomly generated Pokemon against each other")]
struct Cli {
    /// Side one: a trainer name, or "computer"
    player1: String,

    /// Side two: a trainer name, or "computer"
    player2: String,

    /// Random seed for a reproducible battle
    #[arg(long)]
    seed: Option<u64>,

    /// Battle configuration file (RON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding moves.ron and species.ron
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Print every battle event as a JSON line instead of text
    #[arg(long)]
    json: bool,

    /// Diagnostic log filter, e.g. "debug" (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

/// Writes battle events to stdout as they happen.
struct ConsoleSink {
    json: bool,
}

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: BattleEvent) {
        if self.json {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(err) => tracing::warn!(%err, "could not serialize event"),
            }
        } else if let Some(line) = event.format() {
            if matches!(event, BattleEvent::TurnStarted { .. }) {
                println!();
            }
            println!("{}", line);
        }
    }
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<BattleConfig> {
    let mut config = match &cli.config {
        Some(path) => BattleConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => BattleConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir.clone();
    }
    Ok(config)
}

fn build_side(
    index: usize,
    name: &str,
    dex: &Dex,
    rng: &mut StdRng,
    seed: Option<u64>,
) -> Result<BattleSide> {
    let combatant = random_combatant(dex, rng)
        .with_context(|| format!("generating a Pokemon for side {}", index + 1))?;

    let is_computer = name.eq_ignore_ascii_case(COMPUTER);
    let (owner, selector): (String, Box<dyn MoveSelector>) = if is_computer {
        let seed = seed.map(|seed| seed.wrapping_add(index as u64 + 1));
        (
            COMPUTER_NAMES[index].to_string(),
            Box::new(RandomSelector::new(seed)),
        )
    } else {
        (name.to_string(), Box::new(HumanSelector::stdio()))
    };
    Ok(BattleSide::new(owner, combatant, selector))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let config = load_config(&cli)?;
    let dex = match &config.data_dir {
        Some(dir) => {
            Dex::load(dir).with_context(|| format!("loading data from {}", dir.display()))?
        }
        None => Dex::builtin().context("loading built-in data")?,
    };

    let mut setup_rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let player1 = build_side(0, &cli.player1, &dex, &mut setup_rng, config.seed)?;
    let player2 = build_side(1, &cli.player2, &dex, &mut setup_rng, config.seed)?;

    let turn_rng = match config.seed {
        Some(seed) => TurnRng::seeded(seed),
        None => TurnRng::new_random(),
    };

    let mut sink = ConsoleSink { json: cli.json };
    let mut battle = Battle::new(player1, player2, turn_rng, config);
    let outcome = battle.run(&mut sink).context("battle aborted")?;
    tracing::info!(?outcome, "done");
    Ok(())
}
