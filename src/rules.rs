use shakmaty::fen::Fen;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{
    Bitboard, CastlingMode, Chess, Color, EnPassantMode, Move, MoveList, Position as _, Role,
    Square,
};

use crate::error::EngineError;

/// Why a game ended (or [`GameStatus::Ongoing`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

/// A chess position backed by the rules library, with an undo stack so
/// the search can make and unmake moves in perfect balance. The stack
/// doubles as the game history for threefold-repetition detection.
#[derive(Clone)]
pub struct Position {
    chess: Chess,
    hash: u64,
    undo: Vec<(Chess, u64)>,
}

impl Position {
    /// The standard starting position.
    pub fn new() -> Self {
        Self::from_chess(Chess::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|_| EngineError::InvalidFen(fen.to_string()))?;
        let chess: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|_| EngineError::InvalidFen(fen.to_string()))?;
        Ok(Self::from_chess(chess))
    }

    fn from_chess(chess: Chess) -> Self {
        let hash = zobrist(&chess);
        Self {
            chess,
            hash,
            undo: Vec::new(),
        }
    }

    pub fn fen(&self) -> String {
        Fen(self.chess.clone().into_setup(EnPassantMode::Legal)).to_string()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.chess.turn()
    }

    /// Occupancy of one (piece kind, color) pair.
    #[inline]
    pub fn pieces(&self, role: Role, color: Color) -> Bitboard {
        self.chess.board().by_role(role) & self.chess.board().by_color(color)
    }

    /// All men of one color, king included.
    #[inline]
    pub fn us(&self, color: Color) -> Bitboard {
        self.chess.board().by_color(color)
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.chess.board().occupied()
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        // A legal position always has both kings.
        self.chess.board().king_of(color).expect("king on board")
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.chess.ep_square(EnPassantMode::Legal)
    }

    /// Zobrist key of the current position, cached across reads.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.chess.is_check()
    }

    pub fn legal_moves(&self) -> MoveList {
        self.chess.legal_moves()
    }

    #[inline]
    pub fn is_capture(&self, m: &Move) -> bool {
        m.is_capture()
    }

    /// Apply a legal move. Must be balanced by exactly one
    /// [`Position::unmake_move`] before control returns to the caller.
    pub fn make_move(&mut self, m: &Move) {
        self.undo.push((self.chess.clone(), self.hash));
        self.chess.play_unchecked(m);
        self.hash = zobrist(&self.chess);
    }

    /// Revert the most recent [`Position::make_move`].
    pub fn unmake_move(&mut self) {
        if let Some((chess, hash)) = self.undo.pop() {
            self.chess = chess;
            self.hash = hash;
        }
    }

    /// Game-over classification. Draw reasons cover the fifty-move
    /// rule and threefold repetition (derived from the undo history)
    /// in addition to the rules library's own stalemate and
    /// insufficient-material detection.
    pub fn game_state(&self) -> (GameStatus, GameResult) {
        if self.chess.halfmoves() >= 100 {
            return (GameStatus::FiftyMoveRule, GameResult::Draw);
        }
        if self.chess.is_insufficient_material() {
            return (GameStatus::InsufficientMaterial, GameResult::Draw);
        }
        if self.repetitions() >= 3 {
            return (GameStatus::ThreefoldRepetition, GameResult::Draw);
        }
        if self.chess.legal_moves().is_empty() {
            return if self.chess.is_check() {
                let result = match self.chess.turn() {
                    Color::White => GameResult::BlackWins,
                    Color::Black => GameResult::WhiteWins,
                };
                (GameStatus::Checkmate, result)
            } else {
                (GameStatus::Stalemate, GameResult::Draw)
            };
        }
        (GameStatus::Ongoing, GameResult::Ongoing)
    }

    /// How many times the current position has occurred, itself
    /// included.
    fn repetitions(&self) -> usize {
        1 + self
            .undo
            .iter()
            .filter(|(_, hash)| *hash == self.hash)
            .count()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

fn zobrist(chess: &Chess) -> u64 {
    u64::from(chess.zobrist_hash::<Zobrist64>(EnPassantMode::Legal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos() {
        let pos = Position::new();
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.occupied().count(), 32);
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(pos.game_state(), (GameStatus::Ongoing, GameResult::Ongoing));
    }

    #[test]
    fn test_make_unmake_restores_hash() {
        let mut pos = Position::new();
        let before = pos.hash();
        let moves = pos.legal_moves();
        for m in &moves {
            pos.make_move(m);
            assert_ne!(pos.hash(), before);
            pos.unmake_move();
            assert_eq!(pos.hash(), before);
        }
    }

    #[test]
    fn test_invalid_fen_rejected() {
        assert!(Position::from_fen("not a fen").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn test_fen_roundtrip() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.fen(), fen);
    }

    #[test]
    fn test_checkmate_detected() {
        // Fool's mate.
        let pos =
            Position::from_fen("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert_eq!(pos.game_state(), (GameStatus::Checkmate, GameResult::BlackWins));
    }

    #[test]
    fn test_stalemate_detected() {
        // Kh8 has no legal move against Qf7/Kg6 and is not in check.
        let pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(pos.game_state(), (GameStatus::Stalemate, GameResult::Draw));
    }

    #[test]
    fn test_fifty_move_rule() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/4R3/4K3 b - - 100 80").unwrap();
        assert_eq!(pos.game_state(), (GameStatus::FiftyMoveRule, GameResult::Draw));
    }

    #[test]
    fn test_threefold_repetition() {
        let mut pos = Position::new();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        for _ in 0..2 {
            for uci in shuffle {
                let m = find_move(&pos, uci);
                pos.make_move(&m);
            }
        }
        // Startpos has now occurred three times.
        assert_eq!(
            pos.game_state(),
            (GameStatus::ThreefoldRepetition, GameResult::Draw)
        );
    }

    #[test]
    fn test_insufficient_material() {
        let pos = Position::from_fen("8/8/4k3/8/8/3K4/8/8 w - - 0 1").unwrap();
        assert_eq!(
            pos.game_state(),
            (GameStatus::InsufficientMaterial, GameResult::Draw)
        );
    }

    fn find_move(pos: &Position, uci: &str) -> Move {
        pos.legal_moves()
            .iter()
            .find(|m| m.to_uci(CastlingMode::Standard).to_string() == uci)
            .expect("move is legal")
            .clone()
    }
}

// Unmake restores a stored prior state rather than reversing the move
// arithmetically; the clone is a handful of bitboards, and it makes the
// balance invariant impossible to get wrong on early-return paths.
