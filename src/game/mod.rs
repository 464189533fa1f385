pub mod fen;
pub mod movegen;
pub mod moves;
pub mod nag;
pub mod pgn;
pub mod pieces;
pub mod position;
pub mod san;
pub mod square;
pub mod tables;

pub use fen::{FenError, validate_fen};
pub use movegen::MoveOptions;
pub use moves::{BoardMove, MoveKind, parse_long_algebraic};
pub use nag::{NAGS, nag_description, nag_from_suffix, split_suffix};
pub use pgn::{PgnError, PgnEvent};
pub use pieces::{Color, PROMOTION_PIECES, Piece};
pub use position::{DEFAULT_POSITION, KINGSIDE, Position, PositionState, QUEENSIDE};
pub use square::{Square, SquareColor, SquareExt, board_squares};
