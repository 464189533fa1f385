use crate::game::movegen::MoveOptions;
use crate::game::moves::{BoardMove, MoveKind};
use crate::game::pieces::Piece;
use crate::game::position::{Position, pawn_push};
use crate::game::square::{Square, SquareExt};
use crate::game::tables::piece_offsets;
use regex::Regex;
use std::sync::LazyLock;

static SAN_MOVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([NBKRQ])?([a-h1-8][1-8]?)?(x)?([a-h][1-8])(=?[NBRQ])?").unwrap()
});

/// Whether `square` fits a SAN disambiguator: a file, a rank or a full square.
fn fits_disambiguator(square: Square, disambiguator: &str) -> bool {
    let mut chars = disambiguator.chars();

    match (chars.next(), chars.next()) {
        (None, _) => true,
        (Some(file @ 'a'..='h'), None) => square.file_char() == file,
        (Some(rank), None) => square.rank_char() == rank,
        (Some(_), Some(_)) => square.unparse() == disambiguator,
    }
}

/// Whether `text` has the shape of a SAN move, legal or not.
pub fn is_san_shaped(text: &str) -> bool {
    let text = text.trim();

    ["O-O", "0-0"].iter().any(|castle| text.starts_with(castle)) || SAN_MOVE.is_match(text)
}

impl Position {
    /// Origin qualifier needed to tell `board_move` apart from other legal
    /// moves of the same piece type to the same square.
    fn disambiguator(&mut self, board_move: &BoardMove) -> String {
        let moves = self.generate_moves(MoveOptions::default());

        let mut ambiguous = false;
        let mut same_rank = false;
        let mut same_file = false;

        for other in moves.iter().filter(|other| {
            other.piece == board_move.piece
                && other.from != board_move.from
                && other.to == board_move.to
        }) {
            ambiguous = true;

            if other.from.get_rank() == board_move.from.get_rank() {
                same_rank = true;
            }

            if other.from.get_file() == board_move.from.get_file() {
                same_file = true;
            }
        }

        if !ambiguous {
            String::new()
        } else if same_rank && same_file {
            board_move.from.unparse()
        } else if same_file {
            board_move.from.rank_char().to_string()
        } else {
            board_move.from.file_char().to_string()
        }
    }

    /// Standard algebraic notation of a legal move in this position,
    /// including the `+`/`#` suffix.
    pub fn to_san(&mut self, board_move: &BoardMove) -> String {
        let mut san = match board_move.kind {
            MoveKind::KingsideCastle => "O-O".to_string(),
            MoveKind::QueensideCastle => "O-O-O".to_string(),
            _ => {
                let mut san = String::new();

                if board_move.piece != Piece::Pawn {
                    san.push(board_move.piece.to_char().to_ascii_uppercase());
                    san.push_str(&self.disambiguator(board_move));
                }

                if board_move.is_capture() {
                    if board_move.piece == Piece::Pawn {
                        san.push(board_move.from.file_char());
                    }
                    san.push('x');
                }

                san.push_str(&board_move.to.unparse());

                if let Some(promotion) = board_move.promotion {
                    san.push('=');
                    san.push(promotion.to_char().to_ascii_uppercase());
                }

                san
            }
        };

        let suffix = self.with_move(board_move, |position| {
            if position.is_checkmate() {
                Some('#')
            } else if position.is_in_check() {
                Some('+')
            } else {
                None
            }
        });

        san.extend(suffix);
        san
    }

    /// Squares holding a piece of the side to move that could have made a
    /// move described by the SAN fields, found by walking back from `to`.
    fn san_origins(&self, piece: Piece, to: Square, disambiguator: &str, capture: bool) -> Vec<Square> {
        let us = self.side;
        let mut origins = Vec::new();

        let is_ours = |square: Square| self.pieces[square as usize] == Some((piece, us));

        if piece == Piece::Pawn {
            let push = pawn_push(us);

            if capture {
                for offset in [push - 1, push + 1] {
                    if let Some(from) = to.offset(-offset) {
                        if is_ours(from) && fits_disambiguator(from, disambiguator) {
                            origins.push(from);
                        }
                    }
                }
            } else if let Some(single) = to.offset(-push) {
                if is_ours(single) {
                    origins.push(single);
                } else if self.pieces[single as usize].is_none() {
                    if let Some(double) = single.offset(-push) {
                        if is_ours(double) {
                            origins.push(double);
                        }
                    }
                }
            }

            return origins;
        }

        for &offset in piece_offsets(piece) {
            let mut current = to;

            while let Some(from) = current.offset(-offset) {
                if self.pieces[from as usize].is_some() {
                    // nothing further along the ray can reach `to`
                    if is_ours(from) && fits_disambiguator(from, disambiguator) {
                        origins.push(from);
                    }
                    break;
                }

                if !piece.is_slider() {
                    break;
                }

                current = from;
            }
        }

        origins
    }

    /// Resolves a SAN string to a legal move in this position.
    ///
    /// Trailing check marks and annotations are ignored; `None` is returned
    /// when no legal move, or more than one, fits the text.
    pub fn from_san(&mut self, san: &str) -> Option<BoardMove> {
        let san = san.trim();

        let castle = if san.starts_with("O-O-O") || san.starts_with("0-0-0") {
            Some(MoveKind::QueensideCastle)
        } else if san.starts_with("O-O") || san.starts_with("0-0") {
            Some(MoveKind::KingsideCastle)
        } else {
            None
        };

        if let Some(kind) = castle {
            let king = self.king_square(self.side)?;
            return self
                .generate_moves(MoveOptions::for_square(king))
                .into_iter()
                .find(|board_move| board_move.kind == kind);
        }

        let captures = SAN_MOVE.captures(san)?;

        let piece = match captures.get(1) {
            Some(letter) => Piece::from_char(letter.as_str().chars().next()?.to_ascii_lowercase())?,
            None => Piece::Pawn,
        };
        let disambiguator = captures.get(2).map_or("", |m| m.as_str());
        let capture = captures.get(3).is_some();
        let to = Square::parse(captures.get(4)?.as_str())?;
        let promotion = match captures.get(5) {
            Some(m) => Some(Piece::from_char(m.as_str().chars().last()?.to_ascii_lowercase())?),
            None => None,
        };

        // a pawn with a file in front of it is always capturing
        let pawn_capture = capture || (piece == Piece::Pawn && !disambiguator.is_empty());

        let mut matching = Vec::new();
        for from in self.san_origins(piece, to, disambiguator, pawn_capture) {
            matching.extend(
                self.generate_moves(MoveOptions::for_square(from))
                    .into_iter()
                    .filter(|board_move| board_move.to == to && board_move.promotion == promotion),
            );
        }

        match matching.as_slice() {
            [board_move] => Some(*board_move),
            [] => {
                log::warn!("No legal move matches '{}'", san);
                None
            }
            _ => {
                log::warn!("'{}' is ambiguous between {} moves", san, matching.len());
                None
            }
        }
    }
}
