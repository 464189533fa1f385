use crate::controller::history::PositionHistory;
use crate::game::pgn::{self, PgnError, PgnEvent};
use crate::game::san::is_san_shaped;
use crate::game::{
    BoardMove, Color, DEFAULT_POSITION, FenError, MoveOptions, Position, PositionState, Square,
    parse_long_algebraic, split_suffix,
};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResultType {
    Success,         // the move was made
    InvalidNotation, // neither SAN nor long algebraic
    InvalidMove,     // well formed, but not legal here
}

/// A move made on the controller's position, with what is needed to undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub board_move: BoardMove,
    pub state: PositionState,
    pub san: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnOptions {
    pub max_width: usize, // 0 disables wrapping
    pub newline: String,
}

impl Default for PgnOptions {
    fn default() -> Self {
        Self {
            max_width: 0,
            newline: "\n".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameController {
    pub position: Position,
    moves: Vec<MoveRecord>,
    repetitions: PositionHistory,
    headers: Vec<(String, String)>,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl GameController {
    pub fn new() -> Self {
        let mut controller = Self {
            position: Position::starting(),
            moves: Vec::new(),
            repetitions: PositionHistory::new(),
            headers: Vec::new(),
        };

        controller.repetitions.push(controller.position.repetition_key());
        controller
    }

    pub fn new_game(&mut self) {
        *self = Self::new();
    }

    /// Starts a game from `fen`, recording the `SetUp`/`FEN` headers for a
    /// non-standard start. The current game is kept if the FEN is invalid.
    pub fn new_game_from_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let position = Position::from_fen(fen)?;

        self.headers.clear();
        self.start_from(position);

        Ok(())
    }

    fn start_from(&mut self, position: Position) {
        self.position = position;
        self.moves.clear();
        self.repetitions.clear();
        self.repetitions.push(self.position.repetition_key());

        let fen = self.position.fen();
        if fen == DEFAULT_POSITION {
            self.remove_header("SetUp");
            self.remove_header("FEN");
        } else {
            self.set_header("SetUp", "1");
            self.set_header("FEN", &fen);
        }
    }

    pub fn fen(&self) -> String {
        self.position.fen()
    }

    pub fn turn(&self) -> Color {
        self.position.side
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets a header, keeping the position of an existing one.
    pub fn set_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(key, _)| key != name);
    }

    pub fn make_move(&mut self, board_move: BoardMove) {
        let san = self.position.to_san(&board_move);
        let state = self.position.state();

        self.position.make_move(&board_move);
        self.repetitions.push(self.position.repetition_key());

        log::debug!("Made {} ({})", san, board_move.unparse());

        self.moves.push(MoveRecord {
            board_move,
            state,
            san,
        });
    }

    /// Plays a move given in SAN (`Nf3`, `exd8=Q+`) or long algebraic
    /// notation (`g1f3`, `e7d8q`).
    pub fn try_move_piece(&mut self, notation: &str) -> MoveResultType {
        let board_move = if let Some((from, to, promotion)) = parse_long_algebraic(notation) {
            self.position
                .generate_moves(MoveOptions::for_square(from))
                .into_iter()
                .find(|m| m.to == to && m.promotion == promotion)
        } else if is_san_shaped(notation) {
            self.position.from_san(notation)
        } else {
            log::warn!("Can't read '{}' as a move", notation);
            return MoveResultType::InvalidNotation;
        };

        match board_move {
            Some(board_move) => {
                self.make_move(board_move);
                MoveResultType::Success
            }
            None => MoveResultType::InvalidMove,
        }
    }

    pub fn undo_move(&mut self) -> Option<BoardMove> {
        let record = self.moves.pop()?;

        self.position.unmake_move(&record.board_move, &record.state);
        self.repetitions.pop();

        log::debug!("Undid {}", record.san);

        Some(record.board_move)
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// SAN of every move played so far.
    pub fn history(&self) -> Vec<String> {
        self.moves.iter().map(|record| record.san.clone()).collect()
    }

    pub fn legal_moves(&mut self) -> Vec<BoardMove> {
        self.position.generate_moves(MoveOptions::default())
    }

    /// SAN of the legal moves, optionally only those of the piece on `square`.
    pub fn legal_moves_san(&mut self, square: Option<Square>) -> Vec<String> {
        let options = MoveOptions {
            legal: true,
            square,
        };

        self.position
            .generate_moves(options)
            .iter()
            .map(|board_move| self.position.to_san(board_move))
            .collect()
    }

    pub fn is_check(&self) -> bool {
        self.position.is_in_check()
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.position.is_checkmate()
    }

    pub fn is_stalemate(&mut self) -> bool {
        self.position.is_stalemate()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.position.has_insufficient_material()
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetitions
            .is_threefold_repetition(self.position.repetition_key())
    }

    pub fn is_draw(&mut self) -> bool {
        self.position.halfmove_clock >= 100
            || self.is_stalemate()
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
    }

    pub fn is_game_over(&mut self) -> bool {
        self.is_draw() || self.is_checkmate()
    }

    /// Replaces the current game with the main line of a PGN game.
    ///
    /// Moves inside variations are skipped. On an illegal move the error is
    /// returned and the game stays at the position before that move.
    pub fn load_pgn(&mut self, text: &str, newline: Option<&str>) -> Result<(), PgnError> {
        self.new_game();

        let mut depth = 0usize;

        pgn::parse(text, newline, |event| {
            log::debug!("PGN event {:?}", event);

            match event {
                PgnEvent::Header { name, value } => {
                    self.set_header(name, value);

                    if name == "FEN" {
                        let position = Position::from_fen(value)?;
                        self.start_from(position);
                    }
                }
                PgnEvent::VariationStart => depth += 1,
                PgnEvent::VariationEnd => depth = depth.saturating_sub(1),
                PgnEvent::Move(token) if depth == 0 => {
                    let (san, _) = split_suffix(token);

                    let board_move = self
                        .position
                        .from_san(san)
                        .ok_or_else(|| PgnError::InvalidMove(token.to_string()))?;

                    self.make_move(board_move);
                }
                PgnEvent::Score(score) if depth == 0 => {
                    if self.header("Result").is_none() {
                        self.set_header("Result", score);
                    }
                }
                _ => {}
            }

            Ok(())
        })
    }

    /// The game as PGN: headers, a blank line, then numbered SAN moves and
    /// the result.
    pub fn pgn(&self, options: &PgnOptions) -> String {
        let newline = options.newline.as_str();
        let mut result = String::new();

        for (name, value) in &self.headers {
            result.push_str(&format!("[{} \"{}\"]{}", name, value, newline));
        }

        if !self.headers.is_empty() && !self.moves.is_empty() {
            result.push_str(newline);
        }

        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut number = 1;

        for record in &self.moves {
            if number == 1 && record.board_move.color == Color::Black {
                current = "1. ...".to_string();
                number += 1;
            } else if record.board_move.color == Color::White {
                if !current.is_empty() {
                    tokens.push(current);
                }
                current = format!("{}.", number);
                number += 1;
            }

            current.push(' ');
            current.push_str(&record.san);
        }

        if !current.is_empty() {
            tokens.push(current);
        }

        if let Some(score) = self.header("Result") {
            tokens.push(score.to_string());
        }

        if options.max_width == 0 {
            result.push_str(&tokens.join(" "));
            return result;
        }

        let mut width = 0;
        for (i, token) in tokens.iter().enumerate() {
            if i != 0 && width + token.len() > options.max_width {
                result.push_str(newline);
                width = 0;
            } else if i != 0 {
                result.push(' ');
                width += 1;
            }

            result.push_str(token);
            width += token.len();
        }

        result
    }

    /// Node counts below each legal root move, searched in parallel.
    pub fn perft(&self, depth: usize) -> Vec<(BoardMove, u64)> {
        if depth == 0 {
            return Vec::new();
        }

        let mut position = self.position.clone();
        let moves = position.generate_moves(MoveOptions::default());

        moves
            .into_par_iter()
            .map(|board_move| {
                let mut position = self.position.clone();
                position.make_move(&board_move);

                (board_move, position.perft(depth - 1))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_notations() {
        let mut controller = GameController::new();

        assert_eq!(controller.try_move_piece("e4"), MoveResultType::Success);
        assert_eq!(controller.try_move_piece("e7e5"), MoveResultType::Success);
        assert_eq!(controller.try_move_piece("Ke3"), MoveResultType::InvalidMove);
        assert_eq!(controller.try_move_piece("e2e4"), MoveResultType::InvalidMove);
        assert_eq!(controller.try_move_piece("???"), MoveResultType::InvalidNotation);

        assert_eq!(controller.history(), vec!["e4", "e5"]);
    }

    #[test]
    fn test_undo_restores_position() {
        let mut controller = GameController::new();
        let start = controller.position.clone();

        for notation in ["e4", "d5", "exd5", "Qxd5", "Nc3"] {
            assert_eq!(controller.try_move_piece(notation), MoveResultType::Success);
        }

        for _ in 0..5 {
            assert!(controller.undo_move().is_some());
        }

        assert_eq!(controller.undo_move(), None);
        assert_eq!(controller.position, start);
    }

    #[test]
    fn test_pgn_export() {
        let mut controller = GameController::new();
        controller.set_header("White", "Morphy");

        for notation in ["e4", "e5", "Nf3", "d6"] {
            controller.try_move_piece(notation);
        }

        assert_eq!(
            controller.pgn(&PgnOptions::default()),
            "[White \"Morphy\"]\n\n1. e4 e5 2. Nf3 d6"
        );

        let wrapped = controller.pgn(&PgnOptions {
            max_width: 10,
            newline: "<br />".to_string(),
        });
        assert_eq!(wrapped, "[White \"Morphy\"]<br /><br />1. e4 e5<br />2. Nf3 d6");
    }

    #[test]
    fn test_pgn_export_black_first() {
        let mut controller = GameController::new();
        controller
            .new_game_from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .unwrap();

        controller.try_move_piece("e5");
        controller.try_move_piece("Nf3");

        assert_eq!(
            controller.pgn(&PgnOptions::default()),
            "[SetUp \"1\"]\n[FEN \"rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1\"]\n\n1. ... e5 2. Nf3"
        );
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let controller = GameController::new();
        let divide = controller.perft(3);

        assert_eq!(divide.len(), 20);
        assert_eq!(divide.iter().map(|(_, nodes)| nodes).sum::<u64>(), 8902);
    }
}
