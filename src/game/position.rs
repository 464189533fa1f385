use crate::game::movegen::MoveOptions;
use crate::game::moves::{BoardMove, MoveKind};
use crate::game::pieces::{Color, Piece};
use crate::game::square::{BOARD_SLOTS, Square, SquareColor, SquareExt, board_squares};
use crate::game::tables::{ATTACKS, MAX_DELTA, RAYS};
use crate::utils::zobrist::ZOBRIST;
use strum::EnumCount;

pub const DEFAULT_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const KINGSIDE: u8 = 0b01;
pub const QUEENSIDE: u8 = 0b10;

/// Home squares of the rooks and the castling right each one guards, by color.
const CASTLING_ROOKS: [[(Square, u8); 2]; Color::COUNT] = [
    [(Square::A8, QUEENSIDE), (Square::H8, KINGSIDE)],
    [(Square::A1, QUEENSIDE), (Square::H1, KINGSIDE)],
];

pub type PieceBoard = [Option<(Piece, Color)>; BOARD_SLOTS];

/// Offset of a single pawn push for the given color.
pub fn pawn_push(color: Color) -> i16 {
    match color {
        Color::White => 16,
        Color::Black => -16,
    }
}

/// Everything [`Position::make_move`] changes apart from the board buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PositionState {
    pub kings: [Option<Square>; Color::COUNT],
    pub side: Color,
    pub castling: [u8; Color::COUNT],
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) pieces: PieceBoard,
    pub(crate) kings: [Option<Square>; Color::COUNT],

    pub side: Color,

    pub castling: [u8; Color::COUNT], // KINGSIDE | QUEENSIDE per color
    pub en_passant: Option<Square>,   // the square a pawn just skipped over

    pub halfmove_clock: u32, // halfmoves since the last capture or pawn move
    pub fullmove_number: u32, // starts at 1, incremented after black's move
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl Position {
    /// An empty board with white to move.
    pub fn empty() -> Self {
        Self {
            pieces: [None; BOARD_SLOTS],
            kings: [None; Color::COUNT],
            side: Color::White,
            castling: [0; Color::COUNT],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn starting() -> Self {
        let mut position = Self::empty();
        position.load_unchecked(DEFAULT_POSITION);
        position
    }

    pub fn reset(&mut self) {
        *self = Self::empty();
    }

    pub fn get(&self, square: Square) -> Option<(Piece, Color)> {
        if !square.is_on_board() {
            return None;
        }

        self.pieces[square as usize]
    }

    /// Places a piece, returning false for an off-board square.
    pub fn put(&mut self, piece: Piece, color: Color, square: Square) -> bool {
        if !square.is_on_board() {
            return false;
        }

        if let Some((Piece::King, old_color)) = self.pieces[square as usize] {
            self.kings[old_color as usize] = None;
        }

        // a second king replaces the first
        if piece == Piece::King {
            if let Some(old_square) = self.kings[color as usize] {
                self.pieces[old_square as usize] = None;
            }
            self.kings[color as usize] = Some(square);
        }

        self.pieces[square as usize] = Some((piece, color));
        true
    }

    pub fn remove(&mut self, square: Square) -> Option<(Piece, Color)> {
        if !square.is_on_board() {
            return None;
        }

        let removed = self.pieces[square as usize].take();

        if let Some((Piece::King, color)) = removed {
            self.kings[color as usize] = None;
        }

        removed
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color as usize]
    }

    pub fn square_color(&self, square: Square) -> Option<SquareColor> {
        square.is_on_board().then(|| square.color())
    }

    pub fn state(&self) -> PositionState {
        PositionState {
            kings: self.kings,
            side: self.side,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    fn restore(&mut self, state: &PositionState) {
        self.kings = state.kings;
        self.side = state.side;
        self.castling = state.castling;
        self.en_passant = state.en_passant;
        self.halfmove_clock = state.halfmove_clock;
        self.fullmove_number = state.fullmove_number;
    }

    /// Whether any piece of `color` attacks `square`.
    pub fn is_attacked(&self, color: Color, square: Square) -> bool {
        if !square.is_on_board() {
            return false;
        }

        for attacker in board_squares() {
            let (piece, piece_color) = match self.pieces[attacker as usize] {
                Some(entry) => entry,
                None => continue,
            };

            if piece_color != color || attacker == square {
                continue;
            }

            let difference = attacker as i16 - square as i16;
            let index = (difference + MAX_DELTA) as usize;

            if ATTACKS[index] & piece.mask() == 0 {
                continue;
            }

            match piece {
                // a pawn below its target is white's, above it is black's
                Piece::Pawn => {
                    if (difference < 0) == (color == Color::White) {
                        return true;
                    }
                }
                Piece::Knight | Piece::King => return true,
                _ => {
                    let offset = RAYS[index] as i16;
                    let mut current = attacker as i16 + offset;
                    let mut blocked = false;

                    while current != square as i16 {
                        if self.pieces[current as usize].is_some() {
                            blocked = true;
                            break;
                        }
                        current += offset;
                    }

                    if !blocked {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// A side without a king on the board is never in check.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        match self.kings[color as usize] {
            Some(king) => self.is_attacked(!color, king),
            None => false,
        }
    }

    pub fn is_in_check(&self) -> bool {
        self.is_king_attacked(self.side)
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.is_in_check() && self.generate_moves(Default::default()).is_empty()
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.is_in_check() && self.generate_moves(Default::default()).is_empty()
    }

    /// Bare kings, a lone minor piece, or bishops that all share one square color.
    pub fn has_insufficient_material(&self) -> bool {
        let mut counts = [0usize; Piece::COUNT];
        let mut bishop_colors = Vec::new();
        let mut total = 0;

        for square in board_squares() {
            if let Some((piece, _)) = self.pieces[square as usize] {
                counts[piece as usize] += 1;
                total += 1;

                if piece == Piece::Bishop {
                    bishop_colors.push(square.color());
                }
            }
        }

        match total {
            2 => true,
            3 if counts[Piece::Bishop as usize] == 1 || counts[Piece::Knight as usize] == 1 => true,
            _ if total == counts[Piece::Bishop as usize] + 2 => bishop_colors
                .windows(2)
                .all(|pair| pair[0] == pair[1]),
            _ => false,
        }
    }

    /// Builds a move for the piece on `from`, recording the piece it captures.
    /// Returns `None` when `from` holds no piece.
    pub fn build_move(
        &self,
        from: Square,
        to: Square,
        kind: MoveKind,
        promotion: Option<Piece>,
    ) -> Option<BoardMove> {
        let (piece, color) = self.get(from)?;
        Some(self.new_move(piece, color, from, to, kind, promotion))
    }

    pub(crate) fn new_move(
        &self,
        piece: Piece,
        color: Color,
        from: Square,
        to: Square,
        kind: MoveKind,
        promotion: Option<Piece>,
    ) -> BoardMove {
        let captured = match kind {
            MoveKind::EnPassant => Some(Piece::Pawn),
            _ => self.pieces[to as usize].map(|(piece, _)| piece),
        };

        BoardMove {
            color,
            from,
            to,
            kind,
            piece,
            promotion,
            captured,
        }
    }

    fn move_rook(&mut self, from: usize, to: usize) {
        self.pieces[to] = self.pieces[from].take();
    }

    pub fn make_move(&mut self, board_move: &BoardMove) {
        let us = self.side;
        let them = !us;

        let from = board_move.from as usize;
        let to = board_move.to as usize;

        self.pieces[to] = self.pieces[from].take();

        if board_move.kind == MoveKind::EnPassant {
            let passed = (board_move.to as i16 - pawn_push(us)) as usize;
            self.pieces[passed] = None;
        }

        if let Some(promotion) = board_move.promotion {
            self.pieces[to] = Some((promotion, us));
        }

        if board_move.piece == Piece::King {
            self.kings[us as usize] = Some(board_move.to);

            match board_move.kind {
                MoveKind::KingsideCastle => self.move_rook(to + 1, to - 1),
                MoveKind::QueensideCastle => self.move_rook(to - 2, to + 1),
                _ => {}
            }

            self.castling[us as usize] = 0;
        }

        // a rook leaving its corner, or being captured on it, loses that side's right
        if self.castling[us as usize] != 0 {
            for (square, right) in CASTLING_ROOKS[us as usize] {
                if board_move.from == square {
                    self.castling[us as usize] &= !right;
                }
            }
        }

        if self.castling[them as usize] != 0 {
            for (square, right) in CASTLING_ROOKS[them as usize] {
                if board_move.to == square {
                    self.castling[them as usize] &= !right;
                }
            }
        }

        self.en_passant = match board_move.kind {
            MoveKind::BigPawn => Some((board_move.to as i16 - pawn_push(us)) as Square),
            _ => None,
        };

        if board_move.piece == Piece::Pawn || board_move.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if us == Color::Black {
            self.fullmove_number += 1;
        }

        self.side = them;
    }

    /// Reverts [`Position::make_move`], given the state saved just before it.
    ///
    /// Panics if the destination square is empty, which can only happen when
    /// the move was never made on this position.
    pub fn unmake_move(&mut self, board_move: &BoardMove, state: &PositionState) {
        let us = board_move.color;
        let them = !us;

        let from = board_move.from as usize;
        let to = board_move.to as usize;

        if self.pieces[to].take().is_none() {
            panic!(
                "Unmaking {} but {} is empty",
                board_move.unparse(),
                board_move.to.unparse()
            );
        }

        self.pieces[from] = Some((board_move.piece, us));

        match board_move.kind {
            MoveKind::Capture => self.pieces[to] = board_move.captured.map(|piece| (piece, them)),
            MoveKind::EnPassant => {
                let passed = (board_move.to as i16 - pawn_push(us)) as usize;
                self.pieces[passed] = Some((Piece::Pawn, them));
            }
            MoveKind::KingsideCastle => self.move_rook(to - 1, to + 1),
            MoveKind::QueensideCastle => self.move_rook(to + 1, to - 2),
            MoveKind::Normal | MoveKind::BigPawn => {}
        }

        self.restore(state);
    }

    /// Makes the move, runs `f` on the resulting position and reverts it.
    pub fn with_move<T>(&mut self, board_move: &BoardMove, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.state();
        self.make_move(board_move);
        let result = f(self);
        self.unmake_move(board_move, &state);
        result
    }

    /// Number of leaf nodes of the legal move tree `depth` plies deep.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let us = self.side;
        let moves = self.generate_moves(MoveOptions::pseudo_legal());

        let mut nodes = 0;
        for board_move in &moves {
            let state = self.state();
            self.make_move(board_move);

            if !self.is_king_attacked(us) {
                nodes += if depth == 1 { 1 } else { self.perft(depth - 1) };
            }

            self.unmake_move(board_move, &state);
        }

        nodes
    }

    /// Hash of everything that makes two positions the same for repetition
    /// purposes; the clocks are left out.
    pub fn repetition_key(&self) -> u64 {
        let mut key = 0;

        for square in board_squares() {
            if let Some((piece, color)) = self.pieces[square as usize] {
                key ^= ZOBRIST.piece(piece, color, square);
            }
        }

        if self.side == Color::White {
            key ^= ZOBRIST.side_to_move;
        }

        let castling = (self.castling[Color::White as usize] << 2) | self.castling[Color::Black as usize];
        key ^= ZOBRIST.castling[castling as usize];

        if let Some(square) = self.en_passant {
            key ^= ZOBRIST.en_passant[square.get_file() as usize + 1];
        }

        key
    }

    pub fn ascii(&self) -> String {
        let mut result = String::from("   +------------------------+\n");

        for rank in (0..8).rev() {
            result.push_str(&format!(" {} |", rank + 1));

            for file in 0..8 {
                let symbol = match self.pieces[Square::from_position(file, rank) as usize] {
                    Some((piece, color)) => piece.to_fen_char(color),
                    None => '.',
                };
                result.push_str(&format!(" {} ", symbol));
            }

            result.push_str("|\n");
        }

        result.push_str("   +------------------------+\n");
        result.push_str("     a  b  c  d  e  f  g  h");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    #[test]
    fn test_put_and_remove_track_kings() {
        let mut position = Position::empty();

        assert!(position.put(Piece::King, Color::White, square("e1")));
        assert_eq!(position.king_square(Color::White), Some(square("e1")));

        // moving the king by putting it elsewhere clears the old square
        assert!(position.put(Piece::King, Color::White, square("d1")));
        assert_eq!(position.get(square("e1")), None);
        assert_eq!(position.king_square(Color::White), Some(square("d1")));

        assert!(!position.put(Piece::Rook, Color::White, 0x08));

        assert_eq!(
            position.remove(square("d1")),
            Some((Piece::King, Color::White))
        );
        assert_eq!(position.king_square(Color::White), None);
        assert!(!position.is_in_check());
    }

    #[test]
    fn test_sliding_attacks_are_blocked() {
        let mut position = Position::empty();
        position.put(Piece::Rook, Color::White, square("a1"));
        position.put(Piece::Bishop, Color::Black, square("h8"));

        assert!(position.is_attacked(Color::White, square("a8")));
        assert!(position.is_attacked(Color::White, square("h1")));
        assert!(position.is_attacked(Color::Black, square("a1")));

        position.put(Piece::Pawn, Color::White, square("d4"));
        assert!(!position.is_attacked(Color::Black, square("a1")));
        assert!(position.is_attacked(Color::Black, square("d4")));
    }

    #[test]
    fn test_pawn_attacks_depend_on_color() {
        let mut position = Position::empty();
        position.put(Piece::Pawn, Color::White, square("e4"));
        position.put(Piece::Pawn, Color::Black, square("e5"));

        assert!(position.is_attacked(Color::White, square("d5")));
        assert!(position.is_attacked(Color::White, square("f5")));
        assert!(!position.is_attacked(Color::White, square("d3")));

        assert!(position.is_attacked(Color::Black, square("d4")));
        assert!(!position.is_attacked(Color::Black, square("d6")));
    }

    #[test]
    fn test_insufficient_material() {
        let mut position = Position::empty();
        position.put(Piece::King, Color::White, square("e1"));
        position.put(Piece::King, Color::Black, square("e8"));
        assert!(position.has_insufficient_material());

        position.put(Piece::Knight, Color::White, square("b1"));
        assert!(position.has_insufficient_material());

        position.remove(square("b1"));
        position.put(Piece::Bishop, Color::White, square("c1"));
        position.put(Piece::Bishop, Color::Black, square("f4"));
        // c1 and f4 are both dark
        assert!(position.has_insufficient_material());

        position.put(Piece::Bishop, Color::Black, square("f5"));
        assert!(!position.has_insufficient_material());

        assert!(!Position::starting().has_insufficient_material());
    }

    #[test]
    fn test_repetition_key_ignores_clocks() {
        let mut position = Position::starting();
        let key = position.repetition_key();

        position.halfmove_clock = 12;
        position.fullmove_number = 30;
        assert_eq!(position.repetition_key(), key);

        position.side = Color::Black;
        assert_ne!(position.repetition_key(), key);
    }
}
