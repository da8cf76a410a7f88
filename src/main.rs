//! Terminal front end for Celestial Duel.
//!
//! Type a move number (1-4) and press enter to attack, `r` to reset the
//! battle and `q` to quit. Deferred transitions run on a real-time clock.

use celestial_duel::config::{parse_seed, DuelConfig, Timings};
use celestial_duel::errors::DuelResult;
use celestial_duel::presenter::render_screen;
use celestial_duel::roster::{default_roster, load_roster};
use celestial_duel::{Battle, BattleObserver, BattleSnapshot, Submission};
use clap::Parser;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "celestial-duel", version, about = "A deterministic elemental duel in your terminal")]
struct Args {
    /// RON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// RON roster file, overriding the config and DUEL_ROSTER
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Generator seed, decimal or 0x hex
    #[arg(long, value_parser = parse_seed_arg)]
    seed: Option<u32>,

    /// Draw a fresh seed instead of using the configured one
    #[arg(long, conflicts_with = "seed")]
    random_seed: bool,

    /// Run every deferred transition without delay
    #[arg(long)]
    instant: bool,

    /// Print a JSON snapshot after every transition instead of the screen
    #[arg(long)]
    json: bool,
}

fn parse_seed_arg(text: &str) -> Result<u32, String> {
    parse_seed(text).ok_or_else(|| format!("'{}' is not a valid 32-bit seed", text))
}

enum Command {
    Move(usize),
    Reset,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    match line {
        "q" | "quit" => Some(Command::Quit),
        "r" | "reset" => Some(Command::Reset),
        _ => match line.parse::<usize>() {
            Ok(number) if number >= 1 => Some(Command::Move(number - 1)),
            _ => None,
        },
    }
}

/// Marks the screen for a redraw whenever the battle changes.
struct RedrawFlag(Rc<Cell<bool>>);

impl BattleObserver for RedrawFlag {
    fn on_state_changed(&mut self, _snapshot: &BattleSnapshot) {
        self.0.set(true);
    }
}

/// Streams one JSON snapshot per line to stdout.
struct JsonStream;

impl BattleObserver for JsonStream {
    fn on_state_changed(&mut self, snapshot: &BattleSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(line) => println!("{}", line),
            Err(err) => warn!(%err, "failed to encode snapshot"),
        }
    }
}

fn load_config(args: &Args) -> DuelResult<DuelConfig> {
    let mut config = match &args.config {
        Some(path) => DuelConfig::from_file(path)?,
        None => DuelConfig::default(),
    }
    .apply_env()?;

    if let Some(path) = &args.roster {
        config.roster_path = Some(path.clone());
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.random_seed {
        config.seed = rand::random::<u32>();
    }
    if args.instant {
        config.timings = Timings::instant();
    }
    Ok(config)
}

fn draw(battle: &Battle) {
    println!(
        "\n{}",
        render_screen(&battle.snapshot(), &battle.legal_moves())
    );
    if battle.winner().is_some() {
        println!("Press r to battle again or q to quit.");
    } else {
        println!("Choose a move (1-4), r to reset, q to quit:");
    }
}

#[tokio::main]
async fn main() -> DuelResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let roster = match &config.roster_path {
        Some(path) => load_roster(path)?,
        None => default_roster(),
    };
    info!(seed = config.seed, roster = ?config.roster_path, "starting duel");

    let mut battle = Battle::new(&roster, &config)?;
    let redraw = Rc::new(Cell::new(true));
    if args.json {
        battle.subscribe(Box::new(JsonStream));
        println!("{}", serde_json::to_string(&battle.snapshot())?);
    } else {
        battle.subscribe(Box::new(RedrawFlag(Rc::clone(&redraw))));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_tick = Instant::now();

    loop {
        if !args.json && redraw.replace(false) {
            draw(&battle);
        }

        let wait = battle.time_until_next_task();
        let input = tokio::select! {
            line = lines.next_line() => Some(line?),
            _ = tokio::time::sleep(wait.unwrap_or(Duration::ZERO)), if wait.is_some() => None,
        };

        // Catch the clock up before handling input, so new tasks are
        // scheduled from the moment the input arrived.
        let now = Instant::now();
        battle.advance(now - last_tick);
        last_tick = now;

        let Some(line) = input else {
            continue;
        };
        let Some(line) = line else {
            // Input closed: let the current exchange play out.
            battle.run_until_idle();
            if !args.json && redraw.replace(false) {
                draw(&battle);
            }
            break;
        };
        match parse_command(&line) {
            Some(Command::Move(index)) => {
                if let Submission::Ignored(reason) = battle.submit_player_move(index) {
                    debug!(?reason, "input ignored");
                }
            }
            Some(Command::Reset) => battle.request_reset(),
            Some(Command::Quit) => break,
            None if !args.json => println!("Unrecognised command {:?}.", line.trim()),
            None => {}
        }
    }

    info!(winner = ?battle.winner(), "duel closed");
    Ok(())
}
