use arrayvec::ArrayVec;
use shakmaty::{attacks, Bitboard, Color, Role, Square};

use crate::attacks::attackers_by_kind;
use crate::bitops;
use crate::pst;
use crate::rules::{GameResult, Position};
use crate::types::{Score, MATE_SCORE};

// Material values, no king entry.
const PAWN_VALUE: Score = 200;
const KNIGHT_VALUE: Score = 600;
const BISHOP_VALUE: Score = 700;
const ROOK_VALUE: Score = 1000;
const QUEEN_VALUE: Score = 1800;

// Pawn structure weights.
const DOUBLED_PAWN_PENALTY: Score = 20;
const ISOLATED_PAWN_PENALTY: Score = 20;
const PASSED_PAWN_BONUS: Score = 50;
const PAWN_CENTER_CONTROL: Score = 100;
const VALUABLE_PAWN_CAPTURES_BONUS: Score = 5;
const BACKWARDS_PAWN_PENALTY: Score = 20;
const PAWN_CHAIN_BONUS: Score = 30;

// Bishop.
const BISHOP_MOBILITY_BONUS: Score = 5;
const BISHOP_CENTER_BONUS: Score = 40;
// Half a point for the pair; integer units round it away.
const BISHOP_PAIR_BONUS: Score = 1 / 2;

// Knight.
const KNIGHT_MOBILITY_BONUS: Score = 25;

// Rook.
const ROOK_OPEN_LINE_BONUS: Score = 35;
const STACKED_ROOKS_BONUS: Score = 25;
const ROOK_MOBILITY_BONUS: Score = 5;

// King pressure, all piece kinds.
const KING_CHECK_BONUS: Score = 25;
const KING_RESTRICTION_BONUS: Score = 8;
const DOUBLE_CHECK_PENALTY: Score = 300;

// Exchange-safety penalties: a piece standing where the opponent wins
// the exchange bleeds score before the capture ever happens.
const HANGING_PAWN_PENALTY: Score = 40;
const PAWN_EXCHANGE_WEIGHT: Score = 10;
const HANGING_BISHOP_PENALTY: Score = 75;
const HANGING_KNIGHT_PENALTY: Score = 50;
const HANGING_ROOK_PENALTY: Score = 125;
const MINOR_EXCHANGE_WEIGHT: Score = 15;
const ROOK_EXCHANGE_WEIGHT: Score = 15;
const ROOK_MINOR_ATTACK_PENALTY: Score = 50;

/// A queen stops being table-pinned to the back ranks once the enemy
/// army has thinned to this many men or fewer.
const QUEEN_EARLY_THRESHOLD: i32 = 10;

/// Static evaluation of a position, white-positive. Terminal positions
/// collapse to the mate sentinel or zero, so search never has to treat
/// game over as an error.
pub fn evaluate(pos: &Position) -> Score {
    Evaluation::new(pos).score()
}

/// Node-local evaluation pass. The positional accumulators are shared
/// across piece kinds because king-pressure terms are discovered while
/// walking each kind's attack sets.
struct Evaluation<'a> {
    pos: &'a Position,
    occupied: Bitboard,
    pawn_position: Score,
    knight_position: Score,
    bishop_position: Score,
    rook_position: Score,
    queen_position: Score,
    king_position: Score,
    pins_and_checks: Score,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct PawnCounts {
    doubled: Score,
    isolated: Score,
    passed: Score,
    center: Score,
    valuable_captures: Score,
    backwards: Score,
    chain: Score,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct BishopCounts {
    mobility: Score,
    center: Score,
    pair: Score,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct RookCounts {
    open_lines: Score,
    stacked: Score,
    mobility: Score,
}

impl<'a> Evaluation<'a> {
    fn new(pos: &'a Position) -> Self {
        Self {
            pos,
            occupied: pos.occupied(),
            pawn_position: 0,
            knight_position: 0,
            bishop_position: 0,
            rook_position: 0,
            queen_position: 0,
            king_position: 0,
            pins_and_checks: 0,
        }
    }

    fn score(mut self) -> Score {
        match self.pos.game_state().1 {
            GameResult::WhiteWins => return MATE_SCORE,
            GameResult::BlackWins => return -MATE_SCORE,
            GameResult::Draw => return 0,
            GameResult::Ongoing => {}
        }

        let material = self.material_balance();
        let pawns = self.pawn_score();
        let bishops = self.bishop_score();
        let knights = self.knight_score();
        let rooks = self.rook_score();
        self.queen_eval(Color::White);
        self.queen_eval(Color::Black);
        self.king_eval(Color::White);
        self.king_eval(Color::Black);

        let position = self.pawn_position
            + self.knight_position
            + self.bishop_position
            + self.rook_position
            + self.queen_position
            + self.king_position;

        material + pawns + bishops + knights + rooks + position + self.pins_and_checks
    }

    fn material_balance(&self) -> Score {
        let mut balance = 0;
        for (role, value) in [
            (Role::Pawn, PAWN_VALUE),
            (Role::Knight, KNIGHT_VALUE),
            (Role::Bishop, BISHOP_VALUE),
            (Role::Rook, ROOK_VALUE),
            (Role::Queen, QUEEN_VALUE),
        ] {
            balance += self.pos.pieces(role, Color::White).count() as Score * value;
            balance -= self.pos.pieces(role, Color::Black).count() as Score * value;
        }
        balance
    }

    // --- pawns ---

    fn pawn_score(&mut self) -> Score {
        let white = self.pawn_structure(Color::White);
        let black = self.pawn_structure(Color::Black);

        -(white.doubled - black.doubled) * DOUBLED_PAWN_PENALTY
            - (white.isolated - black.isolated) * ISOLATED_PAWN_PENALTY
            + (white.passed - black.passed) * PASSED_PAWN_BONUS
            + (white.center - black.center) * PAWN_CENTER_CONTROL
            + (white.valuable_captures - black.valuable_captures) * VALUABLE_PAWN_CAPTURES_BONUS
            - (white.backwards - black.backwards) * BACKWARDS_PAWN_PENALTY
            + (white.chain - black.chain) * PAWN_CHAIN_BONUS
    }

    /// Walks the files once, classifying the pawns of `color` and
    /// collecting their king-pressure and piece-square side effects.
    fn pawn_structure(&mut self, color: Color) -> PawnCounts {
        let allied = self.pos.pieces(Role::Pawn, color);
        let enemy = self.pos.pieces(Role::Pawn, !color);
        let enemy_men = self.pos.us(!color);
        let enemy_king = Bitboard::from(self.pos.king_square(!color));

        let mut counts = PawnCounts::default();
        if allied.is_empty() {
            return counts;
        }
        let mut squares: ArrayVec<Square, 8> = ArrayVec::new();

        for index in 0..8 {
            let file_bb = bitops::file_mask(index);
            let adj_left = bitops::shift_left(file_bb);
            let adj_right = bitops::shift_right(file_bb);
            // Capture squares of this file's pawns: one step forward,
            // then one file to each side.
            let pushed = bitops::shift_forward(allied, color) & file_bb;
            let captures = bitops::shift_left(pushed) | bitops::shift_right(pushed);

            let on_file = allied & file_bb;
            let count = on_file.count() as Score;

            if count > 0 {
                if count > 1 {
                    counts.doubled += count - 1;
                }
                if (allied & adj_left).is_empty() && (allied & adj_right).is_empty() {
                    counts.isolated += count;
                }
                if (enemy & (adj_left | file_bb | adj_right)).is_empty() {
                    counts.passed += count;
                }
                counts.valuable_captures += (captures & enemy_men & !enemy).count() as Score;

                if (captures & enemy_king).any() {
                    self.pins_and_checks += signed(color, KING_CHECK_BONUS);
                }
                if (captures & bitops::ring(enemy_king)).any() {
                    self.pins_and_checks += signed(color, KING_RESTRICTION_BONUS);
                }

                // A pawn supported from both sides anchors a chain but
                // cannot advance past its supporters; with exactly one
                // supporter it is backwards only when the far file
                // offers no fallback pawn.
                let supporters = captures & allied;
                match supporters.count() {
                    2 => {
                        counts.backwards += 1;
                        counts.chain += 2;
                    }
                    1 => {
                        counts.chain += 1;
                        let far_side = if (supporters & adj_left).any() {
                            adj_right
                        } else {
                            adj_left
                        };
                        if (allied & far_side).is_empty() {
                            counts.backwards += 1;
                        }
                    }
                    _ => {}
                }

                for sq in on_file {
                    squares.push(sq);
                    self.pawn_position += pawn_table(color, sq);
                }
            }

            if index == 3 {
                counts.center += (center_region() & allied).count() as Score;
            }
        }

        for &sq in &squares {
            let enemy_attack = attackers_by_kind(self.pos, sq, !color).total();
            let support = attackers_by_kind(self.pos, sq, color).total();
            if enemy_attack > 0 && support == 0 {
                self.pawn_position -= signed(color, HANGING_PAWN_PENALTY);
            } else if enemy_attack >= support {
                self.pawn_position -=
                    signed(color, (enemy_attack - support) * PAWN_EXCHANGE_WEIGHT);
            }
        }

        counts
    }

    // --- bishops ---

    fn bishop_score(&mut self) -> Score {
        let white = self.bishop_eval(Color::White);
        let black = self.bishop_eval(Color::Black);

        (white.mobility - black.mobility) * BISHOP_MOBILITY_BONUS
            + (white.center - black.center) * BISHOP_CENTER_BONUS
            + (white.pair - black.pair)
    }

    fn bishop_eval(&mut self, color: Color) -> BishopCounts {
        let bishops = self.pos.pieces(Role::Bishop, color);
        let enemy_king = Bitboard::from(self.pos.king_square(!color));

        let mut counts = BishopCounts::default();
        if bishops.is_empty() {
            return counts;
        }

        if bishops.count() > 1 {
            counts.pair += BISHOP_PAIR_BONUS;
        }
        counts.center += (center_region() & bishops).count() as Score;

        for sq in bishops {
            self.bishop_position += piece_table(&pst::WHITE_BISHOP, &pst::BLACK_BISHOP, color, sq);

            let attack_set = attacks::bishop_attacks(sq, self.occupied);
            counts.mobility += attack_set.count() as Score;
            self.king_pressure(attack_set, enemy_king, color);
        }

        for sq in bishops {
            let enemy_attack = attackers_by_kind(self.pos, sq, !color);
            let support = attackers_by_kind(self.pos, sq, color).total();
            let total = enemy_attack.total();
            if enemy_attack.of(Role::Pawn) > 0 {
                // A pawn attacker wins the exchange no matter the
                // defense.
                self.bishop_position -= signed(color, HANGING_BISHOP_PENALTY);
            } else if total > 0 && support == 0 {
                self.bishop_position -= signed(color, HANGING_BISHOP_PENALTY);
            } else if total >= support {
                self.bishop_position -=
                    signed(color, (total - support) * MINOR_EXCHANGE_WEIGHT);
            }
        }

        counts
    }

    // --- knights ---

    fn knight_score(&mut self) -> Score {
        let white = self.knight_eval(Color::White);
        let black = self.knight_eval(Color::Black);
        (white - black) * KNIGHT_MOBILITY_BONUS
    }

    fn knight_eval(&mut self, color: Color) -> Score {
        let knights = self.pos.pieces(Role::Knight, color);
        let allied_men = self.pos.us(color);
        let enemy_king = Bitboard::from(self.pos.king_square(!color));

        if knights.is_empty() {
            return 0;
        }
        let mut mobility = 0;

        for sq in knights {
            self.knight_position += piece_table(&pst::WHITE_KNIGHT, &pst::BLACK_KNIGHT, color, sq);

            let attack_set = attacks::knight_attacks(sq);
            // Squares held by allied men are no outlet for a knight.
            mobility += (attack_set & !allied_men).count() as Score;
            self.king_pressure(attack_set, enemy_king, color);
        }

        for sq in knights {
            let enemy_attack = attackers_by_kind(self.pos, sq, !color);
            let support = attackers_by_kind(self.pos, sq, color).total();
            let total = enemy_attack.total();
            if enemy_attack.of(Role::Pawn) > 0 {
                self.knight_position -= signed(color, HANGING_KNIGHT_PENALTY);
            } else if total > 0 && support == 0 {
                self.knight_position -= signed(color, HANGING_KNIGHT_PENALTY);
            } else if total >= support {
                self.knight_position -=
                    signed(color, (total - support) * MINOR_EXCHANGE_WEIGHT);
            }
        }

        mobility
    }

    // --- rooks ---

    fn rook_score(&mut self) -> Score {
        let white = self.rook_eval(Color::White);
        let black = self.rook_eval(Color::Black);

        (white.open_lines - black.open_lines) * ROOK_OPEN_LINE_BONUS
            + (white.stacked - black.stacked) * STACKED_ROOKS_BONUS
            + (white.mobility - black.mobility) * ROOK_MOBILITY_BONUS
    }

    fn rook_eval(&mut self, color: Color) -> RookCounts {
        let rooks = self.pos.pieces(Role::Rook, color);
        let enemy_pawns = self.pos.pieces(Role::Pawn, !color);
        let enemy_king = Bitboard::from(self.pos.king_square(!color));

        let mut counts = RookCounts::default();
        if rooks.is_empty() {
            return counts;
        }

        for index in 0..8 {
            if (rooks & bitops::file_mask(index)).count() >= 2 {
                counts.stacked += 1;
            }
            if (rooks & bitops::rank_mask(index)).count() >= 2 {
                counts.stacked += 1;
            }
        }

        for sq in rooks {
            self.rook_position += piece_table(&pst::WHITE_ROOK, &pst::BLACK_ROOK, color, sq);

            // A line is open when no enemy pawn stands on it.
            if (bitops::file_mask(usize::from(sq.file())) & enemy_pawns).is_empty() {
                counts.open_lines += 1;
            }
            if (bitops::rank_mask(usize::from(sq.rank())) & enemy_pawns).is_empty() {
                counts.open_lines += 1;
            }

            let attack_set = attacks::rook_attacks(sq, self.occupied);
            counts.mobility += attack_set.count() as Score;
            self.king_pressure(attack_set, enemy_king, color);
        }

        for sq in rooks {
            let enemy_attack = attackers_by_kind(self.pos, sq, !color);
            let support = attackers_by_kind(self.pos, sq, color).total();
            let total = enemy_attack.total();
            if total > 0 && support == 0 {
                self.rook_position -= signed(color, HANGING_ROOK_PENALTY);
            } else if enemy_attack.of(Role::Pawn) > 0 {
                self.rook_position -= signed(color, HANGING_ROOK_PENALTY);
            } else if enemy_attack.of(Role::Knight) > 0 || enemy_attack.of(Role::Bishop) > 0 {
                if support < total {
                    self.rook_position -= signed(color, ROOK_MINOR_ATTACK_PENALTY);
                }
            } else if total >= support {
                self.rook_position -=
                    signed(color, (total - support) * ROOK_EXCHANGE_WEIGHT);
            }
        }

        counts
    }

    // --- queens ---

    /// Queens contribute table position and king pressure only; no
    /// mobility term keeps the early queen from being dragged forward.
    fn queen_eval(&mut self, color: Color) {
        let queens = self.pos.pieces(Role::Queen, color);
        let enemy_king = Bitboard::from(self.pos.king_square(!color));
        let enemy_men = self.pos.us(!color).count() as i32;

        if queens.is_empty() {
            return;
        }

        for sq in queens {
            self.queen_position += if enemy_men > QUEEN_EARLY_THRESHOLD {
                piece_table(&pst::EARLY_WHITE_QUEEN, &pst::EARLY_BLACK_QUEEN, color, sq)
            } else {
                piece_table(&pst::LATE_WHITE_QUEEN, &pst::LATE_BLACK_QUEEN, color, sq)
            };
        }

        for sq in queens {
            let attack_set = attacks::queen_attacks(sq, self.occupied);
            if enemy_men <= QUEEN_EARLY_THRESHOLD && (attack_set & enemy_king).any() {
                self.pins_and_checks += signed(color, KING_CHECK_BONUS);
            }
            if (attack_set & bitops::ring(enemy_king)).any() {
                self.pins_and_checks += signed(color, KING_RESTRICTION_BONUS);
            }
        }
    }

    // --- kings ---

    /// Table position plus a hard penalty when two or more enemy
    /// pieces bear on the king square at once (the shadow of a double
    /// check).
    fn king_eval(&mut self, color: Color) {
        let king_sq = self.pos.king_square(color);
        self.king_position += piece_table(&pst::WHITE_KING, &pst::BLACK_KING, color, king_sq);
        if attackers_by_kind(self.pos, king_sq, !color).total() >= 2 {
            self.king_position -= signed(color, DOUBLE_CHECK_PENALTY);
        }
    }

    fn king_pressure(&mut self, attack_set: Bitboard, enemy_king: Bitboard, color: Color) {
        if (attack_set & enemy_king).any() {
            self.pins_and_checks += signed(color, KING_CHECK_BONUS);
        }
        if (attack_set & bitops::ring(enemy_king)).any() {
            self.pins_and_checks += signed(color, KING_RESTRICTION_BONUS);
        }
    }
}

/// d4/e4/d5/e5.
#[inline]
fn center_region() -> Bitboard {
    (bitops::file_mask(3) | bitops::file_mask(4)) & (bitops::rank_mask(3) | bitops::rank_mask(4))
}

#[inline]
fn signed(color: Color, value: Score) -> Score {
    match color {
        Color::White => value,
        Color::Black => -value,
    }
}

#[inline]
fn pawn_table(color: Color, sq: Square) -> Score {
    piece_table(&pst::WHITE_PAWN, &pst::BLACK_PAWN, color, sq)
}

/// White adds from its (mirrored) table, black subtracts from the
/// authored one.
#[inline]
fn piece_table(white: &[Score; 64], black: &[Score; 64], color: Color, sq: Square) -> Score {
    match color {
        Color::White => white[usize::from(sq)],
        Color::Black => -black[usize::from(sq)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_is_balanced() {
        let pos = Position::new();
        assert_eq!(evaluate(&pos), 0);
    }

    #[test]
    fn test_extra_pawn_is_positive() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(evaluate(&pos) > 0);
    }

    #[test]
    fn test_checkmated_white_gets_mate_sentinel() {
        let pos = Position::from_fen("8/8/8/8/8/4k3/4q3/4K3 w - - 0 1").unwrap();
        assert_eq!(evaluate(&pos), -MATE_SCORE);
    }

    #[test]
    fn test_checkmated_black_gets_mate_sentinel() {
        let pos = Position::from_fen("4k3/4Q3/4K3/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(evaluate(&pos), MATE_SCORE);
    }

    #[test]
    fn test_stalemate_scores_zero() {
        let pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(evaluate(&pos), 0);
    }

    #[test]
    fn test_material_balance() {
        let pos = Position::new();
        assert_eq!(Evaluation::new(&pos).material_balance(), 0);

        let queen_odds =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1")
                .unwrap();
        assert_eq!(Evaluation::new(&queen_odds).material_balance(), -QUEEN_VALUE);
    }

    #[test]
    fn test_pawn_counts_doubled_isolated_passed() {
        let pos = Position::from_fen("4k3/8/8/8/8/P7/P1P5/4K3 w - - 0 1").unwrap();
        let mut ev = Evaluation::new(&pos);
        let counts = ev.pawn_structure(Color::White);
        assert_eq!(
            counts,
            PawnCounts {
                doubled: 1,
                isolated: 3,
                passed: 3,
                center: 0,
                valuable_captures: 0,
                backwards: 0,
                chain: 0,
            }
        );
    }

    #[test]
    fn test_pawn_counts_chain_and_backwards() {
        // e3 is supported by d4 alone and the f-file is empty, so it
        // counts as both a chain link and a backwards pawn.
        let pos = Position::from_fen("4k3/8/8/8/3P4/4P3/8/4K3 w - - 0 1").unwrap();
        let mut ev = Evaluation::new(&pos);
        let counts = ev.pawn_structure(Color::White);
        assert_eq!(counts.chain, 1);
        assert_eq!(counts.backwards, 1);
        assert_eq!(counts.passed, 2);
        assert_eq!(counts.center, 1); // d4
        assert_eq!(counts.isolated, 0);
    }

    #[test]
    fn test_pawn_counts_double_support() {
        let pos = Position::from_fen("4k3/8/8/8/3P1P2/4P3/8/4K3 w - - 0 1").unwrap();
        let mut ev = Evaluation::new(&pos);
        let counts = ev.pawn_structure(Color::White);
        assert_eq!(counts.chain, 2);
        assert_eq!(counts.backwards, 1);
        assert_eq!(counts.center, 1);
    }

    #[test]
    fn test_pawn_counts_valuable_capture() {
        let pos = Position::from_fen("4k3/8/8/3n4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let mut ev = Evaluation::new(&pos);
        let counts = ev.pawn_structure(Color::White);
        assert_eq!(counts.valuable_captures, 1);
        assert_eq!(counts.passed, 1);
        assert_eq!(counts.center, 1);
    }

    #[test]
    fn test_knight_mobility_excludes_allies() {
        let pos = Position::new();
        let mut ev = Evaluation::new(&pos);
        // b1 reaches a3/c3, g1 reaches f3/h3; d2/e2 are blocked by
        // allied pawns.
        assert_eq!(ev.knight_eval(Color::White), 4);
    }

    #[test]
    fn test_bishop_counts_at_start() {
        let pos = Position::new();
        let mut ev = Evaluation::new(&pos);
        let counts = ev.bishop_eval(Color::White);
        // Raw attack sets: c1 sees b2/d2, f1 sees e2/g2.
        assert_eq!(counts.mobility, 4);
        assert_eq!(counts.center, 0);
        assert_eq!(counts.pair, 0); // half-point truncates away
    }

    #[test]
    fn test_rook_counts_open_lines_and_stacking() {
        let pos = Position::from_fen("4k3/8/8/8/8/7p/8/R2RK3 w - - 0 1").unwrap();
        let mut ev = Evaluation::new(&pos);
        let counts = ev.rook_eval(Color::White);
        // Both rooks sit on files and a rank free of black pawns.
        assert_eq!(counts.open_lines, 4);
        assert_eq!(counts.stacked, 1);
        assert!(counts.mobility > 0);
    }

    #[test]
    fn test_rook_open_line_counts_enemy_pawns_only() {
        // An allied pawn on the rook's file must not close it.
        let pos = Position::from_fen("4k3/8/8/8/8/8/R7/R3K3 w - - 0 1").unwrap();
        let mut ev = Evaluation::new(&pos);
        let counts = ev.rook_eval(Color::White);
        assert_eq!(counts.open_lines, 4);
    }

    #[test]
    fn test_hanging_bishop_penalized() {
        let pos = Position::from_fen("4k3/8/8/3b4/8/8/3R4/4K3 b - - 0 1").unwrap();
        let mut ev = Evaluation::new(&pos);
        ev.bishop_eval(Color::Black);
        // Undefended bishop under rook attack: sign flips to white's
        // favor, minus the table value of d5.
        assert_eq!(ev.bishop_position, HANGING_BISHOP_PENALTY - 10);
    }

    #[test]
    fn test_double_attack_on_king_penalized() {
        let pos = Position::from_fen("4k3/8/8/8/7b/5n2/8/4K3 w - - 0 1").unwrap();
        let mut ev = Evaluation::new(&pos);
        ev.king_eval(Color::White);
        assert_eq!(ev.king_position, -DOUBLE_CHECK_PENALTY);
    }

    #[test]
    fn test_queen_stays_home_early() {
        // With the full black army on the board, the white queen's
        // early table applies and d1 carries its stay-home premium.
        let pos = Position::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap();
        let mut ev = Evaluation::new(&pos);
        ev.queen_eval(Color::White);
        assert_eq!(ev.queen_position, 150);
    }

    #[test]
    fn test_mirrored_position_negates() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
        let mirrored = "rnbqk2r/pppp1ppp/5n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R b KQkq - 4 4";
        let pos = Position::from_fen(fen).unwrap();
        let mirror = Position::from_fen(mirrored).unwrap();
        assert_eq!(evaluate(&pos), -evaluate(&mirror));
    }
}

// The evaluator recomputes everything from the piece masks on every
// call; there is no incremental state to keep consistent across
// make/unmake, which is what lets quiescence call it at every node.
