use crate::game::pieces::{Color, Piece};
use crate::game::position::{KINGSIDE, Position, QUEENSIDE};
use crate::game::square::{Square, SquareExt};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static CASTLING_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(KQ?k?q?|Qk?q?|kq?|q|-)$").unwrap());

static EN_PASSANT_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-|[a-h][36])$").unwrap());

/// Reasons a FEN string is rejected, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN string must contain six space-delimited fields.")]
    FieldCount,
    #[error("6th field (move number) must be a positive integer.")]
    MoveNumber,
    #[error("5th field (half move counter) must be a non-negative integer.")]
    HalfMoveCounter,
    #[error("4th field (en-passant square) is invalid.")]
    EnPassant,
    #[error("3rd field (castling availability) is invalid.")]
    Castling,
    #[error("2nd field (side to move) is invalid.")]
    SideToMove,
    #[error("1st field (piece positions) does not contain 8 '/'-delimited rows.")]
    RowCount,
    #[error("1st field (piece positions) is invalid [consecutive numbers].")]
    ConsecutiveNumbers,
    #[error("1st field (piece positions) is invalid [invalid piece].")]
    InvalidPiece,
    #[error("1st field (piece positions) is invalid [row too large].")]
    RowTooLarge,
}

impl FenError {
    /// Stable numeric code of the failed rule, 1 to 10.
    pub fn code(&self) -> u8 {
        match self {
            FenError::FieldCount => 1,
            FenError::MoveNumber => 2,
            FenError::HalfMoveCounter => 3,
            FenError::EnPassant => 4,
            FenError::Castling => 5,
            FenError::SideToMove => 6,
            FenError::RowCount => 7,
            FenError::ConsecutiveNumbers => 8,
            FenError::InvalidPiece => 9,
            FenError::RowTooLarge => 10,
        }
    }
}

fn is_digits(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

fn validate_row(row: &str) -> Result<(), FenError> {
    let mut files = 0u32;
    let mut previous_was_number = false;

    for c in row.chars() {
        if let Some(digit) = c.to_digit(10) {
            if previous_was_number {
                return Err(FenError::ConsecutiveNumbers);
            }
            files += digit;
            previous_was_number = true;
        } else {
            if Piece::from_fen_char(c).is_none() {
                return Err(FenError::InvalidPiece);
            }
            files += 1;
            previous_was_number = false;
        }
    }

    if files != 8 {
        return Err(FenError::RowTooLarge);
    }

    Ok(())
}

/// Checks a FEN string, reporting the first rule it breaks.
pub fn validate_fen(fen: &str) -> Result<(), FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();

    if fields.len() != 6 {
        return Err(FenError::FieldCount);
    }

    if !is_digits(fields[5]) || fields[5].parse::<u32>().map_or(true, |n| n == 0) {
        return Err(FenError::MoveNumber);
    }

    if !is_digits(fields[4]) || fields[4].parse::<u32>().is_err() {
        return Err(FenError::HalfMoveCounter);
    }

    if !EN_PASSANT_FIELD.is_match(fields[3]) {
        return Err(FenError::EnPassant);
    }

    if !CASTLING_FIELD.is_match(fields[2]) {
        return Err(FenError::Castling);
    }

    if !matches!(fields[1], "w" | "b") {
        return Err(FenError::SideToMove);
    }

    let rows: Vec<&str> = fields[0].split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::RowCount);
    }

    rows.into_iter().try_for_each(validate_row)
}

impl Position {
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut position = Self::empty();
        position.load(fen)?;
        Ok(position)
    }

    /// Replaces this position with the one described by `fen`, leaving it
    /// untouched if the string is invalid.
    pub fn load(&mut self, fen: &str) -> Result<(), FenError> {
        validate_fen(fen).inspect_err(|error| {
            log::warn!("Rejected FEN '{}': {}", fen, error);
        })?;

        self.load_unchecked(fen);
        Ok(())
    }

    /// Loads a FEN string that already passed [`validate_fen`].
    pub(crate) fn load_unchecked(&mut self, fen: &str) {
        self.reset();

        let mut fields = fen.split_whitespace();

        let placement = fields.next().unwrap_or_default();
        let mut rank = 7u8;
        let mut file = 0u8;

        for c in placement.chars() {
            match c {
                '/' => {
                    rank = rank.saturating_sub(1);
                    file = 0;
                }
                c if c.is_ascii_digit() => file += c as u8 - b'0',
                _ => {
                    if let Some((piece, color)) = Piece::from_fen_char(c) {
                        self.put(piece, color, Square::from_position(file, rank));
                    }
                    file += 1;
                }
            }
        }

        self.side = fields
            .next()
            .and_then(|field| field.chars().next())
            .and_then(Color::from_char)
            .unwrap_or(Color::White);

        for c in fields.next().unwrap_or_default().chars() {
            match c {
                'K' => self.castling[Color::White as usize] |= KINGSIDE,
                'Q' => self.castling[Color::White as usize] |= QUEENSIDE,
                'k' => self.castling[Color::Black as usize] |= KINGSIDE,
                'q' => self.castling[Color::Black as usize] |= QUEENSIDE,
                _ => {}
            }
        }

        self.en_passant = fields.next().and_then(Square::parse);
        self.halfmove_clock = fields.next().and_then(|f| f.parse().ok()).unwrap_or(0);
        self.fullmove_number = fields.next().and_then(|f| f.parse().ok()).unwrap_or(1);
    }

    pub fn fen(&self) -> String {
        let mut placement = String::new();

        for rank in (0..8).rev() {
            let mut empty = 0;

            for file in 0..8 {
                match self.get(Square::from_position(file, rank)) {
                    Some((piece, color)) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                placement.push_str(&empty.to_string());
            }

            if rank > 0 {
                placement.push('/');
            }
        }

        let mut castling = String::new();
        for (color, right, symbol) in [
            (Color::White, KINGSIDE, 'K'),
            (Color::White, QUEENSIDE, 'Q'),
            (Color::Black, KINGSIDE, 'k'),
            (Color::Black, QUEENSIDE, 'q'),
        ] {
            if self.castling[color as usize] & right != 0 {
                castling.push(symbol);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .en_passant
            .map(|square| square.unparse())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{} {} {} {} {} {}",
            placement,
            self.side.to_char(),
            castling,
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}
