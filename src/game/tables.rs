use crate::game::pieces::Piece;

/// Largest `|attacker - target|` between two on-board 0x88 squares (h8 - a1).
pub const MAX_DELTA: i16 = 119;

const TABLE_SIZE: usize = 2 * MAX_DELTA as usize + 2;

pub const KNIGHT_OFFSETS: [i16; 8] = [-18, -33, -31, -14, 18, 33, 31, 14];
pub const BISHOP_OFFSETS: [i16; 4] = [-17, -15, 17, 15];
pub const ROOK_OFFSETS: [i16; 4] = [-16, 1, 16, -1];
pub const QUEEN_OFFSETS: [i16; 8] = [-17, -16, -15, 1, 17, 16, 15, -1];
pub const KING_OFFSETS: [i16; 8] = QUEEN_OFFSETS;

pub fn piece_offsets(piece: Piece) -> &'static [i16] {
    match piece {
        Piece::Pawn => &[],
        Piece::Knight => &KNIGHT_OFFSETS,
        Piece::Bishop => &BISHOP_OFFSETS,
        Piece::Rook => &ROOK_OFFSETS,
        Piece::Queen => &QUEEN_OFFSETS,
        Piece::King => &KING_OFFSETS,
    }
}

const fn signum(value: i16) -> i16 {
    if value > 0 {
        1
    } else if value < 0 {
        -1
    } else {
        0
    }
}

// 0x88 deltas are unique per (rank, file) displacement, so every attacker/target
// pair with the same delta gets the same entry; we just fill them all in
const fn calculate_attack_tables() -> ([u8; TABLE_SIZE], [i8; TABLE_SIZE]) {
    let mut attacks = [0u8; TABLE_SIZE];
    let mut rays = [0i8; TABLE_SIZE];

    let mut from = 0i16;
    while from < 128 {
        if from & 0x88 != 0 {
            from += 1;
            continue;
        }

        let mut to = 0i16;
        while to < 128 {
            if to & 0x88 != 0 || to == from {
                to += 1;
                continue;
            }

            let index = (from - to + MAX_DELTA) as usize;

            let dr = (to >> 4) - (from >> 4);
            let df = (to & 0x0f) - (from & 0x0f);
            let (adr, adf) = (dr.abs(), df.abs());

            let mut mask = 0u8;
            let mut ray = 0i16;

            if dr == 0 || df == 0 {
                mask |= Piece::Rook.mask() | Piece::Queen.mask();
                if adr + adf == 1 {
                    mask |= Piece::King.mask();
                }
                ray = signum(dr) * 16 + signum(df);
            } else if adr == adf {
                mask |= Piece::Bishop.mask() | Piece::Queen.mask();
                if adr == 1 {
                    // the detector decides the pawn's direction from the delta's sign
                    mask |= Piece::King.mask() | Piece::Pawn.mask();
                }
                ray = signum(dr) * 16 + signum(df);
            } else if (adr == 1 && adf == 2) || (adr == 2 && adf == 1) {
                mask |= Piece::Knight.mask();
            }

            attacks[index] = mask;
            rays[index] = ray as i8;

            to += 1;
        }

        from += 1;
    }

    (attacks, rays)
}

const TABLES: ([u8; TABLE_SIZE], [i8; TABLE_SIZE]) = calculate_attack_tables();

/// Piece types able to attack across `attacker - target + 119` on an empty board.
pub const ATTACKS: [u8; TABLE_SIZE] = TABLES.0;

/// Step from the attacker towards the target for the same index, 0 for knights.
pub const RAYS: [i8; TABLE_SIZE] = TABLES.1;
