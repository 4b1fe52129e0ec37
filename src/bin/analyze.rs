use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use minimax_connect_four::ai::{Minimax, DEFAULT_DEPTH};
use minimax_connect_four::game::{Board, GameOutcome, GameState};

/// Print the computer's choice for a position.
#[derive(Parser)]
#[command(name = "analyze", about = "Show the computer's move for a Connect Four position")]
struct Cli {
    /// Columns (0-6) played alternately from the player, e.g. 3,3,4
    #[arg(long, value_delimiter = ',', conflicts_with = "board_file")]
    moves: Vec<usize>,

    /// Text board to analyze: six rows of '.', 'X' (player) and 'O' (computer), top row first
    #[arg(long)]
    board_file: Option<PathBuf>,

    /// Search depth in plies
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,

    /// Disable alpha-beta pruning
    #[arg(long)]
    exhaustive: bool,

    /// Search each root move on its own thread
    #[arg(long)]
    parallel: bool,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = LevelFilter::from_str(&cli.log_level)
        .map_err(|_| anyhow!("unknown log level '{}'", cli.log_level))?;
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .init()
        .context("initializing logger")?;

    if cli.depth == 0 {
        bail!("--depth must be at least 1");
    }

    let board = match &cli.board_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            text.parse::<Board>()
                .with_context(|| format!("parsing board from {}", path.display()))?
        }
        None => replay(&cli.moves)?,
    };

    println!("{board}");
    println!();

    let outcome = board.outcome();
    if outcome.is_over() {
        println!("Outcome: {outcome:?}");
        return Ok(());
    }

    let searcher = Minimax::new(cli.depth)
        .pruning(!cli.exhaustive)
        .parallel_root(cli.parallel);
    info!("searching with {searcher:?}");

    let start = Instant::now();
    let best = searcher.best_move(&board).context("searching for the computer's move")?;
    let elapsed = start.elapsed();

    println!("Computer plays column {} (score {})", best.column, best.score);
    println!(
        "{} nodes, {} leaves, {} cutoffs in {:.1?}",
        best.stats.nodes, best.stats.leaves, best.stats.cutoffs, elapsed
    );
    Ok(())
}

/// Apply `moves` alternately starting with the player.
fn replay(moves: &[usize]) -> Result<Board> {
    let mut state = GameState::initial();
    for (i, &col) in moves.iter().enumerate() {
        let side = state.turn().side();
        let outcome = state
            .apply_move_mut(col, side)
            .with_context(|| format!("move {} ({} in column {col})", i + 1, side.name()))?;
        if outcome != GameOutcome::InProgress && i + 1 < moves.len() {
            bail!("game ended after move {} ({outcome:?})", i + 1);
        }
    }
    Ok(*state.board())
}
