use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use shakmaty::{Color, Move};

use crate::evaluation::evaluate;
use crate::movegen::{noisy_moves, order_moves};
use crate::rules::{GameResult, Position};
use crate::tt::{TTFlag, TranspositionTable};
use crate::types::{Score, SearchResult, SCORE_INFINITY};

/// Mutable state threaded through one search: the cache handle, node
/// counter, and the cooperative stop flag checked at every node.
pub struct SearchContext<'a> {
    pub tt: &'a mut TranspositionTable,
    pub nodes: u64,
    pub stop: Arc<AtomicBool>,
    pub verbose: bool,
}

impl<'a> SearchContext<'a> {
    pub fn new(tt: &'a mut TranspositionTable, stop: Arc<AtomicBool>, verbose: bool) -> Self {
        Self {
            tt,
            nodes: 0,
            stop,
            verbose,
        }
    }

    #[inline]
    fn stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

/// Iterative-deepening driver: searches depth 1 upward, re-examining
/// the root moves each round, and keeps the best move of the newest
/// fully-completed depth. A raised stop flag discards the iteration in
/// flight and falls back to the previous one.
pub fn find_best_move(
    pos: &mut Position,
    max_depth: u8,
    root_color: Color,
    ctx: &mut SearchContext,
) -> SearchResult {
    let start = Instant::now();
    let legal = pos.legal_moves();

    if legal.is_empty() {
        return SearchResult {
            best_move: None,
            score: evaluate(pos),
            depth: 0,
            nodes: ctx.nodes,
        };
    }
    // A forced reply needs no search.
    if legal.len() == 1 {
        return SearchResult {
            best_move: Some(legal[0].clone()),
            score: evaluate(pos),
            depth: 0,
            nodes: ctx.nodes,
        };
    }

    let maximize_root = root_color == Color::White;
    let mut best_move: Option<Move> = None;
    let mut best_score = 0;
    let mut completed = 0;

    for depth in 1..=max_depth {
        let mut alpha = -SCORE_INFINITY;
        let mut beta = SCORE_INFINITY;
        let mut depth_best: Option<Move> = None;
        let mut depth_score = if maximize_root {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };

        for m in &legal {
            pos.make_move(m);
            let eval = minimax(pos, depth - 1, alpha, beta, !maximize_root, ctx);
            pos.unmake_move();
            if ctx.stopped() {
                break;
            }

            if maximize_root {
                if eval >= depth_score {
                    depth_score = eval;
                    depth_best = Some(m.clone());
                }
                alpha = alpha.max(depth_score);
            } else {
                if eval <= depth_score {
                    depth_score = eval;
                    depth_best = Some(m.clone());
                }
                beta = beta.min(depth_score);
            }
        }

        if ctx.stopped() {
            break;
        }
        if let Some(m) = depth_best {
            best_move = Some(m);
            best_score = depth_score;
            completed = depth;
        }

        if ctx.verbose {
            let elapsed = start.elapsed().as_millis().max(1);
            println!(
                "info depth {} score cp {} nodes {} time {}",
                depth, best_score, ctx.nodes, elapsed
            );
        }
    }

    SearchResult {
        best_move,
        score: best_score,
        depth: completed,
        nodes: ctx.nodes,
    }
}

/// Depth-limited alpha-beta with an explicit maximize flag. At the
/// horizon, and in finished positions, the score comes from quiescence
/// so tactics never get cut mid-exchange.
pub(crate) fn minimax(
    pos: &mut Position,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximize: bool,
    ctx: &mut SearchContext,
) -> Score {
    ctx.nodes += 1;
    if ctx.stopped() {
        return 0;
    }

    if depth == 0 || pos.game_state().1 != GameResult::Ongoing {
        return quiesce(pos, alpha, beta, maximize, ctx);
    }

    let hash = pos.hash();
    if let Some(entry) = ctx.tt.probe(hash) {
        if entry.depth >= depth {
            if let Some(score) = entry.cutoff(alpha, beta) {
                return score;
            }
        }
    }

    let moves = order_moves(pos, maximize);
    if moves.is_empty() {
        // Mate or stalemate; the terminal check above normally
        // short-circuits before this point.
        return if maximize {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };
    }

    let original_alpha = alpha;
    let original_beta = beta;

    let best = if maximize {
        let mut max_eval = -SCORE_INFINITY;
        for scored in &moves {
            pos.make_move(&scored.mv);
            let eval = minimax(pos, depth - 1, alpha, beta, false, ctx);
            pos.unmake_move();
            if ctx.stopped() {
                return max_eval.max(eval);
            }
            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = SCORE_INFINITY;
        for scored in &moves {
            pos.make_move(&scored.mv);
            let eval = minimax(pos, depth - 1, alpha, beta, true, ctx);
            pos.unmake_move();
            if ctx.stopped() {
                return min_eval.min(eval);
            }
            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    };

    let flag = if best <= original_alpha {
        TTFlag::UpperBound
    } else if best >= original_beta {
        TTFlag::LowerBound
    } else {
        TTFlag::Exact
    };
    ctx.tt.store(hash, depth, best, flag);

    best
}

/// Quiescence: refine the horizon score along captures, promotions,
/// and checks until the position quiets down. Stand-pat gives the side
/// to move the option of not entering the tactic at all.
pub(crate) fn quiesce(
    pos: &mut Position,
    mut alpha: Score,
    mut beta: Score,
    maximize: bool,
    ctx: &mut SearchContext,
) -> Score {
    ctx.nodes += 1;

    let stand_pat = evaluate(pos);
    if pos.game_state().1 != GameResult::Ongoing {
        return stand_pat;
    }

    if let Some(entry) = ctx.tt.probe(pos.hash()) {
        if let Some(score) = entry.cutoff(alpha, beta) {
            return score;
        }
    }

    if maximize {
        if stand_pat >= beta {
            return stand_pat;
        }
        alpha = alpha.max(stand_pat);
    } else {
        if stand_pat <= alpha {
            return stand_pat;
        }
        beta = beta.min(stand_pat);
    }

    let noisy = noisy_moves(pos);
    if noisy.is_empty() {
        return stand_pat;
    }

    if maximize {
        let mut max_eval = alpha;
        for m in &noisy {
            pos.make_move(m);
            let eval = quiesce(pos, alpha, beta, false, ctx);
            pos.unmake_move();
            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if alpha >= beta {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = beta;
        for m in &noisy {
            pos.make_move(m);
            let eval = quiesce(pos, alpha, beta, true, ctx);
            pos.unmake_move();
            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if alpha >= beta {
                break;
            }
        }
        min_eval
    }
}
