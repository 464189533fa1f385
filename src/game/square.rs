/// A square in 0x88 layout: `rank * 16 + file`, so a1 = 0 and h8 = 0x77.
///
/// The high nibble is the rank and the low nibble the file. Any square with
/// a bit of `0x88` set is off the board, which makes stepping off an edge a
/// single mask test instead of a pair of bounds checks.
pub type Square = u8;

/// Number of slots in the board buffer, half of which are never on the board.
pub const BOARD_SLOTS: usize = 128;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SquareColor {
    Light,
    Dark,
}

pub trait SquareExt {
    fn get_file(&self) -> u8;
    fn get_rank(&self) -> u8;
    fn is_on_board(&self) -> bool;
    fn parse(string: &str) -> Option<Square>;
    fn unparse(&self) -> String;
    fn from_position(file: u8, rank: u8) -> Square;
    fn offset(&self, offset: i16) -> Option<Square>;
    fn file_char(&self) -> char;
    fn rank_char(&self) -> char;
    fn color(&self) -> SquareColor;

    const A1: Square = 0x00;
    const E1: Square = 0x04;
    const H1: Square = 0x07;

    const A8: Square = 0x70;
    const H8: Square = 0x77;
}

impl SquareExt for u8 {
    fn get_file(&self) -> u8 {
        self & 0x0f
    }

    fn get_rank(&self) -> u8 {
        self >> 4
    }

    fn is_on_board(&self) -> bool {
        self & 0x88 == 0
    }

    fn parse(string: &str) -> Option<Square> {
        let mut chars = string.chars();

        match (chars.next(), chars.next(), chars.next()) {
            (Some(file @ 'a'..='h'), Some(rank @ '1'..='8'), None) => Some(
                Square::from_position(file as u8 - b'a', rank as u8 - b'1'),
            ),
            _ => None,
        }
    }

    fn unparse(&self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    fn from_position(file: u8, rank: u8) -> Square {
        (rank << 4) | file
    }

    /// Steps by a 0x88 offset, `None` once the result leaves the board.
    ///
    /// Offsets are at most 33 in magnitude, so a step below a1 wraps into a
    /// value whose bit 7 is set and is caught by the same mask.
    fn offset(&self, offset: i16) -> Option<Square> {
        let target = *self as i16 + offset;

        if target & 0x88 != 0 {
            None
        } else {
            Some(target as Square)
        }
    }

    fn file_char(&self) -> char {
        (b'a' + self.get_file()) as char
    }

    fn rank_char(&self) -> char {
        (b'1' + self.get_rank()) as char
    }

    fn color(&self) -> SquareColor {
        if (self.get_file() + self.get_rank()) % 2 == 0 {
            SquareColor::Dark
        } else {
            SquareColor::Light
        }
    }
}

/// Iterates the 64 on-board squares from a1 to h8.
pub fn board_squares() -> impl Iterator<Item = Square> {
    (0..BOARD_SLOTS as u8).filter(|square| square.is_on_board())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_unparse() {
        assert_eq!(Square::parse("a1"), Some(0x00));
        assert_eq!(Square::parse("h8"), Some(0x77));
        assert_eq!(Square::parse("e4"), Some(0x34));
        assert_eq!(Square::parse("i1"), None);
        assert_eq!(Square::parse("a9"), None);
        assert_eq!(Square::parse("a10"), None);

        for square in board_squares() {
            assert_eq!(Square::parse(&square.unparse()), Some(square));
        }
    }

    #[test]
    fn test_offset_leaves_board() {
        assert_eq!(Square::A1.offset(-1), None);
        assert_eq!(Square::A1.offset(-16), None);
        assert_eq!(Square::A1.offset(-33), None);
        assert_eq!(Square::H1.offset(1), None);
        assert_eq!(Square::H8.offset(17), None);
        assert_eq!(Square::H8.offset(33), None);
        assert_eq!(Square::E1.offset(16), Some(0x14));
    }

    #[test]
    fn test_square_colors() {
        assert_eq!(Square::A1.color(), SquareColor::Dark);
        assert_eq!(Square::H1.color(), SquareColor::Light);
        assert_eq!(Square::A8.color(), SquareColor::Light);
        assert_eq!(Square::H8.color(), SquareColor::Dark);
        assert_eq!(board_squares().count(), 64);
    }
}
