// Turn order and final standings
//
// Built only on the public queries of `Game`, so any front end can drive a
// game the same way.

use serde::Serialize;

use crate::engine::Game;
use crate::types::PlayerId;

/// Whether `player` has any legal move: a free field to use or a special move
pub fn can_move(game: &mut Game, player: PlayerId) -> bool {
    game.free_fields(player) > 0 || game.special_move_possible(player)
}

/// Finds the next player after `prev`, in cyclic order, who can move.
///
/// Returns `prev` itself when it is the only player still able to move and
/// `None` when nobody can.
pub fn next_moving_player(game: &mut Game, prev: PlayerId) -> Option<PlayerId> {
    let players = game.players();
    let mut candidate = prev;
    for _ in 0..players {
        candidate = if candidate >= players { 1 } else { candidate + 1 };
        if can_move(game, candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Busy field totals at the end of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standings {
    /// `(player, busy fields)` for every player in order
    pub scores: Vec<(PlayerId, u64)>,
    pub best_score: u64,
    pub winners: Vec<PlayerId>,
}

impl Standings {
    pub fn of(game: &Game) -> Self {
        let scores: Vec<(PlayerId, u64)> = (1..=game.players())
            .map(|player| (player, game.busy_fields(player)))
            .collect();
        let best_score = scores.iter().map(|&(_, busy)| busy).max().unwrap_or(0);
        let winners = scores
            .iter()
            .filter(|&&(_, busy)| busy == best_score)
            .map(|&(player, _)| player)
            .collect();

        Standings {
            scores,
            best_score,
            winners,
        }
    }

    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }
}
