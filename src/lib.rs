//! A classical chess engine core: composite bitboard evaluation under
//! depth-limited alpha-beta search with quiescence refinement and a
//! bounded transposition cache. Board rules (move generation, legality,
//! hashing, FEN) come from `shakmaty`; this crate supplies judgment.

pub mod attacks;
pub mod bitops;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod movegen;
pub mod pst;
pub mod rules;
pub mod search;
pub mod tt;
pub mod types;

pub use engine::Engine;
pub use error::EngineError;
pub use evaluation::evaluate;
pub use rules::{GameResult, GameStatus, Position};
pub use types::{EngineConfig, Score, SearchResult, DEFAULT_DEPTH, MATE_SCORE, SCORE_INFINITY};
