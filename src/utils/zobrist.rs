use crate::game::{Color, Piece, Square, SquareExt};
use strum::EnumCount;

/// Linear congruential generator usable in const context, so the keys are
/// baked into the binary.
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub const fn next_u64(mut self) -> (u64, Self) {
        // constants from Numerical Recipes
        const A: u64 = 1664525;
        const C: u64 = 1013904223;

        self.state = self.state.wrapping_mul(A).wrapping_add(C);

        (self.state, self)
    }
}

pub struct ZobristKeys {
    pub pieces: [[[u64; 64]; Piece::COUNT]; Color::COUNT],
    pub castling: [u64; 16], // white rights << 2 | black rights
    pub en_passant: [u64; 8 + 1], // [0] no en passant square, else file + 1
    pub side_to_move: u64,
}

const fn fill<const N: usize>(mut rng: Lcg, keys: &mut [u64; N], start: usize) -> Lcg {
    let mut index = start;
    while index < N {
        let (value, next) = rng.next_u64();
        keys[index] = value;
        rng = next;
        index += 1;
    }
    rng
}

impl ZobristKeys {
    pub const fn new() -> Self {
        let mut rng = Lcg::new(0xbadc0ffee);

        let mut pieces = [[[0u64; 64]; Piece::COUNT]; Color::COUNT];
        let mut color = 0;
        while color < Color::COUNT {
            let mut piece = 0;
            while piece < Piece::COUNT {
                rng = fill(rng, &mut pieces[color][piece], 0);
                piece += 1;
            }
            color += 1;
        }

        let mut castling = [0u64; 16];
        rng = fill(rng, &mut castling, 0);

        let mut en_passant = [0u64; 8 + 1];
        rng = fill(rng, &mut en_passant, 1);

        let (side_to_move, _) = rng.next_u64();

        Self {
            pieces,
            castling,
            en_passant,
            side_to_move,
        }
    }

    pub fn piece(&self, piece: Piece, color: Color, square: Square) -> u64 {
        let index = (square.get_rank() * 8 + square.get_file()) as usize;
        self.pieces[color as usize][piece as usize][index]
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();
