//! `card-ring` command line.
//!
//! ```text
//! card-ring play --players 4 --pack four.txt --output-dir out
//! card-ring generate --players 4 --seed 7 --out four.txt
//! ```
//!
//! `play` without `--players` or `--pack` asks for them on stdin and keeps
//! asking until it gets usable answers.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use card_ring::{CardGame, FileTraces, GameConfig, GameError, GameRng, Pack};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one game.
    Play {
        /// Number of players.
        #[arg(long)]
        players: Option<usize>,

        /// Pack file, one card value per line.
        #[arg(long)]
        pack: Option<PathBuf>,

        /// Directory for player and deck traces.
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// JSON game configuration. Command-line values take precedence.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write a JSON summary of the outcome here.
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Stop without a winner after this many seconds.
        #[arg(long)]
        game_timeout_secs: Option<u64>,
    },
    /// Write a playable pack file.
    Generate {
        /// Number of players the pack is for.
        #[arg(long)]
        players: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file.
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let result = match args.command {
        Command::Play {
            players,
            pack,
            output_dir,
            config,
            summary,
            game_timeout_secs,
        } => play(
            players,
            pack,
            &output_dir,
            config.as_deref(),
            summary.as_deref(),
            game_timeout_secs,
        ),
        Command::Generate { players, seed, out } => generate(players, seed, &out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn play(
    players: Option<usize>,
    pack: Option<PathBuf>,
    output_dir: &Path,
    config: Option<&Path>,
    summary: Option<&Path>,
    game_timeout_secs: Option<u64>,
) -> Result<(), GameError> {
    let mut config = match config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let (player_count, pack) = match (players, pack) {
        (Some(n), Some(path)) => {
            let pack = Pack::load(&path)?;
            pack.validate_for(n)?;
            (n, pack)
        }
        (players, pack) => prompt(players, pack)?,
    };

    config = config.with_player_count(player_count);
    if let Some(secs) = game_timeout_secs {
        config = config.with_game_timeout(Duration::from_secs(secs));
    }

    let traces = FileTraces::new(output_dir)?;
    let mut game = CardGame::setup(pack, config, traces)?;
    let outcome = game.run()?;

    if let Some(winner) = outcome.winner() {
        println!("player {} wins", winner.raw());
    }
    for error in &outcome.errors {
        log::error!("{}", error);
    }
    if let Some(path) = summary {
        let json = serde_json::to_string_pretty(&outcome).map_err(io::Error::from)?;
        std::fs::write(path, json)?;
    }
    println!("Game Over!");
    Ok(())
}

/// Ask for whatever was not given on the command line.
fn prompt(players: Option<usize>, mut pack: Option<PathBuf>) -> Result<(usize, Pack), GameError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut next_line = |question: &str| -> io::Result<String> {
        print!("{}", question);
        io::stdout().flush()?;
        match lines.next() {
            Some(line) => line,
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed")),
        }
    };

    let n = match players {
        Some(n) => n,
        None => loop {
            match next_line("Enter number of players: ")?.trim().parse::<usize>() {
                Ok(n) if n > 0 => break n,
                Ok(_) => eprintln!("Error: Number of players must be positive."),
                Err(_) => eprintln!("Error: Please enter a valid integer."),
            }
        },
    };

    loop {
        let location = match pack.take() {
            Some(path) => path,
            None => PathBuf::from(next_line("Enter pack location: ")?.trim()),
        };
        let pack = match Pack::load(&location) {
            Ok(pack) => pack,
            Err(e) => {
                eprintln!("Error: {}", e);
                continue;
            }
        };
        match pack.validate_for(n) {
            Ok(()) => return Ok((n, pack)),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}

fn generate(players: usize, seed: u64, out: &Path) -> Result<(), GameError> {
    let mut rng = GameRng::new(seed);
    let pack = Pack::generate(players, &mut rng);
    pack.validate_for(players)?;

    let file = std::fs::File::create(out)?;
    pack.write_to(io::BufWriter::new(file))?;
    log::info!("wrote {} cards to {}", pack.len(), out.display());
    Ok(())
}
