use clap::Parser;
use minesweeper_ai::solver::{self, InferenceEngine, Move};
use minesweeper_ai::{Game, GameConfig, GameError, GameState};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Watch the knowledge-base AI play a game of Minesweeper.
#[derive(Parser, Debug)]
#[command(name = "minesweeper-ai", version, about = "Knowledge-base Minesweeper AI")]
struct Cli {
    /// Number of rows
    #[arg(long, default_value_t = 8)]
    height: usize,

    /// Number of columns
    #[arg(long, default_value_t = 8)]
    width: usize,

    /// Number of mines
    #[arg(short, long, default_value_t = 8)]
    mines: usize,

    /// Seed for board layout and random moves
    #[arg(short, long)]
    seed: Option<u64>,

    /// Only print the final result
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    match run_game(&cli) {
        Ok(state) => println!("{}", describe(state)),
        Err(e) => eprintln!("Game error: {}", e),
    }
}

fn run_game(cli: &Cli) -> Result<GameState, GameError> {
    let config = GameConfig {
        height: cli.height,
        width: cli.width,
        mines: cli.mines,
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = Game::new_with_rng(config, &mut rng)?;
    let mut engine = InferenceEngine::new(game.dimensions());

    if !cli.quiet {
        println!("{}", game.board());
    }

    let report = solver::play_with(&mut game, &mut engine, &mut rng, |turn, engine| {
        if cli.quiet {
            return;
        }
        match turn.chosen {
            Move::Safe(pos) => println!("AI making safe move {}", pos),
            Move::Random(pos) => println!("No known safe moves, AI making random move {}", pos),
        }
        for pos in &turn.flagged {
            println!("Flagged mine at {}", pos);
        }
        println!("{}", engine.knowledge());
    })?;

    if report.out_of_moves {
        println!("No moves left to make.");
    }
    if !cli.quiet {
        println!(
            "{} safe moves, {} random moves, {} cells revealed, {} mines flagged",
            report.safe_moves, report.random_moves, report.cells_revealed, report.mines_flagged
        );
    }

    Ok(report.state)
}

fn describe(state: GameState) -> &'static str {
    match state {
        GameState::Won => "Won",
        GameState::Lost => "Lost",
        GameState::Playing => "Stopped",
    }
}
