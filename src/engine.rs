use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use shakmaty::{CastlingMode, Color, Move};

use crate::error::EngineError;
use crate::evaluation::evaluate;
use crate::rules::Position;
use crate::search::{self, SearchContext};
use crate::tt::TranspositionTable;
use crate::types::{EngineConfig, Score, SearchResult};

/// An engine session: the transposition cache and configuration live
/// here, and search borrows them mutably for the duration of a call.
pub struct Engine {
    tt: TranspositionTable,
    stop: Arc<AtomicBool>,
    config: EngineConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            tt: TranspositionTable::new(config.hash_mb),
            stop: Arc::new(AtomicBool::new(false)),
            config,
        }
    }

    /// Search up to `max_depth` plies and return the chosen move. The
    /// result is validated against the legal-move list; a violation
    /// clears the cache and retries once before giving up, since a
    /// poisoned cache entry is the only state that could explain it.
    pub fn find_best_move(
        &mut self,
        pos: &mut Position,
        max_depth: u8,
        root_color: Color,
    ) -> Result<Move, EngineError> {
        let mut retried = false;
        loop {
            let result = self.search(pos, max_depth, root_color);
            let Some(best) = result.best_move else {
                return Err(EngineError::NoLegalMoves);
            };
            if pos.legal_moves().contains(&best) {
                return Ok(best);
            }
            if retried {
                return Err(EngineError::Internal(
                    best.to_uci(CastlingMode::Standard).to_string(),
                ));
            }
            self.reset_cache();
            retried = true;
        }
    }

    /// One full iterative-deepening run with the engine's cache.
    pub fn search(&mut self, pos: &mut Position, max_depth: u8, root_color: Color) -> SearchResult {
        self.stop.store(false, Ordering::SeqCst);
        let mut ctx = SearchContext::new(&mut self.tt, self.stop.clone(), self.config.verbose);
        search::find_best_move(pos, max_depth, root_color, &mut ctx)
    }

    /// White-positive static evaluation, exposed for diagnostics.
    pub fn static_eval(&self, pos: &Position) -> Score {
        evaluate(pos)
    }

    pub fn reset_cache(&mut self) {
        self.tt.clear();
    }

    /// Flag that cancels an in-flight search from another thread; the
    /// driver then returns the deepest completed iteration's move.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_move_is_legal() {
        let mut engine = Engine::new();
        let mut pos = Position::new();
        let m = engine.find_best_move(&mut pos, 2, Color::White).unwrap();
        assert!(pos.legal_moves().contains(&m));
    }

    #[test]
    fn test_no_legal_moves_is_an_error() {
        let mut engine = Engine::new();
        // Stalemated side to move.
        let mut pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let err = engine.find_best_move(&mut pos, 2, Color::Black);
        assert!(matches!(err, Err(EngineError::NoLegalMoves)));
    }

    #[test]
    fn test_static_eval_exposed() {
        let engine = Engine::new();
        let pos = Position::new();
        assert_eq!(engine.static_eval(&pos), 0);
    }

    #[test]
    fn test_reset_cache_keeps_engine_usable() {
        let mut engine = Engine::new();
        let mut pos = Position::new();
        let first = engine.find_best_move(&mut pos, 2, Color::White).unwrap();
        engine.reset_cache();
        let second = engine.find_best_move(&mut pos, 2, Color::White).unwrap();
        assert_eq!(first, second);
    }
}
