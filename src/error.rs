use thiserror::Error;

/// Errors surfaced by the engine and its harness.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// User-entered move that is not in the legal-move list.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Search was asked for a move in a finished position.
    #[error("no legal moves available")]
    NoLegalMoves,

    /// The search returned a move outside the legal set twice in a
    /// row (once before and once after a cache reset).
    #[error("search produced an illegal move: {0}")]
    Internal(String),
}
