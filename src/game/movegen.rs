use crate::game::moves::{BoardMove, MoveKind};
use crate::game::pieces::{Color, PROMOTION_PIECES, Piece};
use crate::game::position::{KINGSIDE, Position, QUEENSIDE, pawn_push};
use crate::game::square::{Square, SquareExt, board_squares};
use crate::game::tables::piece_offsets;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveOptions {
    /// Drop moves that leave the mover's own king attacked.
    pub legal: bool,
    /// Only generate moves of the piece on this square.
    pub square: Option<Square>,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            legal: true,
            square: None,
        }
    }
}

impl MoveOptions {
    pub fn pseudo_legal() -> Self {
        Self {
            legal: false,
            square: None,
        }
    }

    pub fn for_square(square: Square) -> Self {
        Self {
            legal: true,
            square: Some(square),
        }
    }
}

fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

fn pawn_captures(color: Color) -> [i16; 2] {
    match color {
        Color::White => [17, 15],
        Color::Black => [-17, -15],
    }
}

impl Position {
    fn add_move(
        &self,
        moves: &mut Vec<BoardMove>,
        piece: Piece,
        from: Square,
        to: Square,
        kind: MoveKind,
    ) {
        let last_rank = to.get_rank() == 0 || to.get_rank() == 7;

        if piece == Piece::Pawn && last_rank {
            for promotion in PROMOTION_PIECES {
                moves.push(self.new_move(piece, self.side, from, to, kind, Some(promotion)));
            }
        } else {
            moves.push(self.new_move(piece, self.side, from, to, kind, None));
        }
    }

    fn generate_pawn_moves(&self, moves: &mut Vec<BoardMove>, from: Square) {
        let us = self.side;
        let push = pawn_push(us);

        if let Some(single) = from.offset(push) {
            if self.pieces[single as usize].is_none() {
                self.add_move(moves, Piece::Pawn, from, single, MoveKind::Normal);

                if from.get_rank() == home_rank(us) {
                    if let Some(double) = from.offset(2 * push) {
                        if self.pieces[double as usize].is_none() {
                            self.add_move(moves, Piece::Pawn, from, double, MoveKind::BigPawn);
                        }
                    }
                }
            }
        }

        for offset in pawn_captures(us) {
            let Some(target) = from.offset(offset) else {
                continue;
            };

            match self.pieces[target as usize] {
                Some((_, color)) if color != us => {
                    self.add_move(moves, Piece::Pawn, from, target, MoveKind::Capture)
                }
                None if self.en_passant == Some(target) => {
                    self.add_move(moves, Piece::Pawn, from, target, MoveKind::EnPassant)
                }
                _ => {}
            }
        }
    }

    fn generate_piece_moves(&self, moves: &mut Vec<BoardMove>, piece: Piece, from: Square) {
        for &offset in piece_offsets(piece) {
            let mut current = from;

            while let Some(to) = current.offset(offset) {
                match self.pieces[to as usize] {
                    None => self.add_move(moves, piece, from, to, MoveKind::Normal),
                    Some((_, color)) => {
                        if color != self.side {
                            self.add_move(moves, piece, from, to, MoveKind::Capture);
                        }
                        break;
                    }
                }

                if !piece.is_slider() {
                    break;
                }

                current = to;
            }
        }
    }

    fn is_castling_path_clear(&self, king: Square, empty: &[i16], safe: &[i16], rook: i16) -> bool {
        let them = !self.side;

        match king.offset(rook).and_then(|square| self.pieces[square as usize]) {
            Some((Piece::Rook, color)) if color == self.side => {}
            _ => return false,
        }

        let all_empty = empty.iter().all(|&offset| {
            king.offset(offset)
                .is_some_and(|square| self.pieces[square as usize].is_none())
        });

        all_empty
            && !self.is_attacked(them, king)
            && safe.iter().all(|&offset| {
                king.offset(offset)
                    .is_some_and(|square| !self.is_attacked(them, square))
            })
    }

    fn generate_castling_moves(&self, moves: &mut Vec<BoardMove>, king: Square) {
        let rights = self.castling[self.side as usize];

        if rights & KINGSIDE != 0 && self.is_castling_path_clear(king, &[1, 2], &[1, 2], 3) {
            if let Some(to) = king.offset(2) {
                self.add_move(moves, Piece::King, king, to, MoveKind::KingsideCastle);
            }
        }

        if rights & QUEENSIDE != 0 && self.is_castling_path_clear(king, &[-1, -2, -3], &[-1, -2], -4)
        {
            if let Some(to) = king.offset(-2) {
                self.add_move(moves, Piece::King, king, to, MoveKind::QueensideCastle);
            }
        }
    }

    /// Moves for the side to move, legal unless asked otherwise.
    ///
    /// An off-board `square` yields no moves. Legality is checked by making
    /// each candidate and testing the mover's king, so the position is
    /// mutated and restored during the call.
    pub fn generate_moves(&mut self, options: MoveOptions) -> Vec<BoardMove> {
        let us = self.side;
        let mut moves = Vec::with_capacity(64);

        let squares: Vec<Square> = match options.square {
            Some(square) if !square.is_on_board() => return moves,
            Some(square) => vec![square],
            None => board_squares().collect(),
        };

        for from in squares {
            let piece = match self.pieces[from as usize] {
                Some((piece, color)) if color == us => piece,
                _ => continue,
            };

            match piece {
                Piece::Pawn => self.generate_pawn_moves(&mut moves, from),
                _ => self.generate_piece_moves(&mut moves, piece, from),
            }
        }

        if let Some(king) = self.kings[us as usize] {
            if options.square.is_none() || options.square == Some(king) {
                self.generate_castling_moves(&mut moves, king);
            }
        }

        if options.legal {
            moves.retain(|board_move| {
                let state = self.state();
                self.make_move(board_move);
                let legal = !self.is_king_attacked(us);
                self.unmake_move(board_move, &state);
                legal
            });
        }

        log::trace!("Generated {} moves for {:?}", moves.len(), us);

        moves
    }
}
