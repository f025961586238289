use arrayvec::ArrayVec;
use shakmaty::{Move, MoveList};

use crate::evaluation::evaluate;
use crate::rules::Position;
use crate::types::Score;

/// A legal move with the shallow evaluation used to order it.
pub struct ScoredMove {
    pub mv: Move,
    pub score: Score,
}

/// Order the legal moves by 1-ply static evaluation: apply, evaluate,
/// undo, then sort. The direction is the caller's: descending when the
/// side to move maximizes, ascending when it minimizes. The sort is
/// stable so equal scores keep generation order and repeat searches
/// stay deterministic.
pub fn order_moves(pos: &mut Position, descending: bool) -> ArrayVec<ScoredMove, 256> {
    let mut scored: ArrayVec<ScoredMove, 256> = ArrayVec::new();

    for m in pos.legal_moves() {
        pos.make_move(&m);
        let score = evaluate(pos);
        pos.unmake_move();
        scored.push(ScoredMove { mv: m, score });
    }

    if descending {
        scored.sort_by(|a, b| b.score.cmp(&a.score));
    } else {
        scored.sort_by(|a, b| a.score.cmp(&b.score));
    }
    scored
}

/// The moves quiescence may explore: captures, promotions, and any
/// move that leaves the mover giving check. The check probe makes the
/// move, tests, and unmakes it before deciding.
pub fn noisy_moves(pos: &mut Position) -> MoveList {
    let mut noisy = MoveList::new();

    for m in pos.legal_moves() {
        if pos.is_capture(&m) || m.is_promotion() {
            noisy.push(m);
            continue;
        }
        pos.make_move(&m);
        let gives_check = pos.is_check();
        pos.unmake_move();
        if gives_check {
            noisy.push(m);
        }
    }
    noisy
}
