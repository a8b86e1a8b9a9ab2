use super::engine::InferenceEngine;
use super::traits::Move;
use crate::{Action, Game, GameError, GameState, Position};
use rand::Rng;

/// What happened on a single turn of an automated game.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub chosen: Move,
    /// Cells opened by the move with their neighbouring mine counts
    pub revealed: Vec<(Position, u8)>,
    /// Mines the engine proved during this turn, now flagged
    pub flagged: Vec<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameReport {
    pub state: GameState,
    /// True when the engine stopped because no move was left to make
    pub out_of_moves: bool,
    pub safe_moves: usize,
    pub random_moves: usize,
    pub cells_revealed: usize,
    pub mines_flagged: usize,
    pub last_move: Option<Move>,
}

impl GameReport {
    fn new() -> Self {
        Self {
            state: GameState::Playing,
            out_of_moves: false,
            safe_moves: 0,
            random_moves: 0,
            cells_revealed: 0,
            mines_flagged: 0,
            last_move: None,
        }
    }
}

pub fn play<R: Rng + ?Sized>(
    game: &mut Game,
    engine: &mut InferenceEngine,
    rng: &mut R,
) -> Result<GameReport, GameError> {
    play_with(game, engine, rng, |_, _| {})
}

/// Lets the engine play `game` until it is won, lost, or no move remains.
///
/// Every revealed cell is fed back to the engine and every mine it proves is
/// flagged. `on_turn` sees each turn along with the engine state after it.
pub fn play_with<R, F>(
    game: &mut Game,
    engine: &mut InferenceEngine,
    rng: &mut R,
    mut on_turn: F,
) -> Result<GameReport, GameError>
where
    R: Rng + ?Sized,
    F: FnMut(&Turn, &InferenceEngine),
{
    let mut report = GameReport::new();

    while game.state() == GameState::Playing {
        let Some(chosen) = engine.next_move(rng) else {
            report.out_of_moves = true;
            break;
        };
        report.last_move = Some(chosen);
        if chosen.is_safe() {
            report.safe_moves += 1;
        } else {
            report.random_moves += 1;
        }

        let revealed = game.perform_action(chosen.position(), Action::Reveal)?;
        for &(pos, count) in &revealed {
            engine.add_knowledge(pos, count);
        }
        report.cells_revealed += revealed.len();

        let mut flagged = Vec::new();
        if game.state() == GameState::Playing {
            let mut unflagged: Vec<Position> = engine
                .mines()
                .difference(game.flagged())
                .copied()
                .collect();
            unflagged.sort();
            for mine in unflagged {
                game.perform_action(mine, Action::Flag)?;
                flagged.push(mine);
                if game.state() != GameState::Playing {
                    break;
                }
            }
        }
        report.mines_flagged += flagged.len();

        on_turn(
            &Turn {
                chosen,
                revealed,
                flagged,
            },
            engine,
        );
    }

    report.state = game.state();
    Ok(report)
}
