use shakmaty::{Bitboard, Color};

/// Directional shifts and neighborhood expansion over 64-bit board
/// masks. Bit 0 = A1, bit 63 = H8 (rank-major), so "up" means toward
/// rank 8 and "left" means toward file A.

pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);
pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00ff);

/// Full-file mask for file index 0..=7 (0 = file A).
#[inline]
pub fn file_mask(file: usize) -> Bitboard {
    Bitboard(FILE_A.0 << file)
}

/// Full-rank mask for rank index 0..=7 (0 = rank 1).
#[inline]
pub fn rank_mask(rank: usize) -> Bitboard {
    Bitboard(RANK_1.0 << (8 * rank))
}

/// Shift one file toward A. Bits already on file A are discarded.
#[inline]
pub fn shift_left(b: Bitboard) -> Bitboard {
    Bitboard((b.0 >> 1) & !FILE_H.0)
}

/// Shift one file toward H. Bits already on file H are discarded.
#[inline]
pub fn shift_right(b: Bitboard) -> Bitboard {
    Bitboard((b.0 << 1) & !FILE_A.0)
}

/// Shift one rank toward rank 8.
#[inline]
pub fn shift_up(b: Bitboard) -> Bitboard {
    Bitboard(b.0 << 8)
}

/// Shift one rank toward rank 1.
#[inline]
pub fn shift_down(b: Bitboard) -> Bitboard {
    Bitboard(b.0 >> 8)
}

/// Shift one rank in the given color's pawn-advance direction.
#[inline]
pub fn shift_forward(b: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => shift_up(b),
        Color::Black => shift_down(b),
    }
}

/// Opposite of [`shift_forward`].
#[inline]
pub fn shift_backward(b: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => shift_down(b),
        Color::Black => shift_up(b),
    }
}

/// Union of `b` and all eight one-step neighbor shifts.
#[inline]
pub fn expand(b: Bitboard) -> Bitboard {
    let horizontal = b | shift_left(b) | shift_right(b);
    horizontal | shift_up(horizontal) | shift_down(horizontal)
}

/// The up-to-8 squares surrounding `b`, origin cleared. Only
/// meaningful for single-bit inputs (a king square).
#[inline]
pub fn ring(b: Bitboard) -> Bitboard {
    expand(b) & !b
}


// Masks never wrap: the left/right shifts clear the wrapped-around
// file, the vertical shifts simply drop bits off the board edge.
