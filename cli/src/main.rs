mod statistics;

use std::cell::RefCell;
use std::error::Error;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use enum_iterator::all;
use fivehundred::{AiConfig, AiLevel, GameEngine, GameEvent, GameListener, Player, Seat, PLAYERS};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use statistics::{GameStatistics, SeatSummary};

#[derive(Parser)]
#[command(name = "fivehundred")]
#[command(about = "Plays batches of Five Hundred between robot players", long_about = None)]
struct Args {
    /// Number of games to play
    #[arg(short = 'g', long = "games", default_value = "100")]
    games: usize,

    /// Random seed (defaults to a random one)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Robot level for North, East, South and West
    #[arg(
        short = 'p',
        long = "players",
        value_delimiter = ',',
        default_value = "advanced,basic,advanced,basic"
    )]
    players: Vec<AiLevel>,

    /// JSON file of robot tuning values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    players: Vec<String>,
    statistics: GameStatistics,
    seats: Vec<SeatSummary>,
}

fn load_config(path: Option<&PathBuf>) -> Result<AiConfig, Box<dyn Error>> {
    let config = match path {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => AiConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<Summary, Box<dyn Error>> {
    if args.players.len() != PLAYERS {
        return Err(format!("expected {PLAYERS} player levels, got {}", args.players.len()).into());
    }
    let config = load_config(args.config.as_ref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, games = args.games, "starting");

    let names: [String; PLAYERS] = all::<Seat>()
        .zip(&args.players)
        .map(|(seat, level)| format!("{seat} ({level})"))
        .collect::<Vec<_>>()
        .try_into()
        .map_err(|_| "expected four player names")?;
    let mut players = Vec::with_capacity(PLAYERS);
    for (index, level) in args.players.iter().enumerate() {
        let seed = seed.wrapping_add(index as u64);
        players.push(Player::robot(names[index].clone(), *level, &config, seed)?);
    }
    let players: [Player; PLAYERS] = players
        .try_into()
        .map_err(|_| "expected four players")?;

    let statistics = Rc::new(RefCell::new(GameStatistics::default()));
    let mut engine = GameEngine::seeded(players, seed);
    let listener = statistics.clone();
    engine.add_listener(move |event: &GameEvent| listener.borrow_mut().on_event(event));

    for game in 0..args.games {
        let winners = engine.play_game()?;
        info!(game, %winners, scores = ?engine.team_scores(), "game finished");
    }

    let statistics = statistics.borrow().clone();
    let seats = statistics.by_success(&names);
    Ok(Summary {
        seed,
        players: names.to_vec(),
        statistics,
        seats,
    })
}

fn main() {
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run(Args::parse()) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Cannot write summary: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
