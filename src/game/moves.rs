use crate::game::pieces::{Color, Piece};
use crate::game::square::{Square, SquareExt};

/// The elementary kind of a move; promotion and capture details ride along
/// on [`BoardMove`] as optional payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Capture,
    BigPawn,
    EnPassant,
    KingsideCastle,
    QueensideCastle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardMove {
    pub color: Color,
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    pub piece: Piece,
    pub promotion: Option<Piece>,
    pub captured: Option<Piece>,
}

impl BoardMove {
    pub fn is_capture(&self) -> bool {
        matches!(self.kind, MoveKind::Capture | MoveKind::EnPassant)
    }

    pub fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::KingsideCastle | MoveKind::QueensideCastle)
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Long algebraic notation, e.g. `e2e4` or `e7e8q`.
    pub fn unparse(&self) -> String {
        format!(
            "{}{}{}",
            self.from.unparse(),
            self.to.unparse(),
            self.promotion
                .map(|p| p.to_char().to_string())
                .unwrap_or_default()
        )
    }

    /// Single-letter flags, one per elementary property of the move:
    /// `n` normal, `c` capture, `b` big pawn push, `e` en passant,
    /// `p` promotion, `k`/`q` king/queen side castle.
    pub fn flags(&self) -> String {
        let mut flags = String::new();

        match self.kind {
            MoveKind::Normal => flags.push('n'),
            MoveKind::Capture => flags.push('c'),
            MoveKind::BigPawn => flags.push('b'),
            MoveKind::EnPassant => flags.push('e'),
            MoveKind::KingsideCastle => flags.push('k'),
            MoveKind::QueensideCastle => flags.push('q'),
        }

        if self.is_promotion() {
            flags.push('p');
        }

        flags
    }
}

/// Parsed long algebraic notation: from, to and an optional promotion.
pub fn parse_long_algebraic(string: &str) -> Option<(Square, Square, Option<Piece>)> {
    if !string.is_ascii() || !(4..=5).contains(&string.len()) {
        return None;
    }

    let from = Square::parse(&string[0..2])?;
    let to = Square::parse(&string[2..4])?;

    let promotion = match string[4..].chars().next() {
        Some(c) => match Piece::from_char(c) {
            Some(piece @ (Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen)) => {
                Some(piece)
            }
            _ => return None,
        },
        None => None,
    };

    Some((from, to, promotion))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_algebraic() {
        assert_eq!(
            parse_long_algebraic("e2e4"),
            Some((Square::parse("e2").unwrap(), Square::parse("e4").unwrap(), None))
        );
        assert_eq!(
            parse_long_algebraic("a7a8n"),
            Some((
                Square::parse("a7").unwrap(),
                Square::parse("a8").unwrap(),
                Some(Piece::Knight)
            ))
        );
        assert_eq!(parse_long_algebraic("a7a8k"), None);
        assert_eq!(parse_long_algebraic("e2"), None);
        assert_eq!(parse_long_algebraic("Nf3"), None);
    }

    #[test]
    fn test_flags() {
        let capture_promotion = BoardMove {
            color: Color::White,
            from: Square::parse("b7").unwrap(),
            to: Square::parse("a8").unwrap(),
            kind: MoveKind::Capture,
            piece: Piece::Pawn,
            promotion: Some(Piece::Queen),
            captured: Some(Piece::Rook),
        };

        assert_eq!(capture_promotion.flags(), "cp");
        assert_eq!(capture_promotion.unparse(), "b7a8q");
        assert!(capture_promotion.is_capture());
        assert!(!capture_promotion.is_castle());
    }
}
