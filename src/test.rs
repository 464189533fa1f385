use crate::controller::{GameController, MoveResultType};
use crate::game::{
    Color, DEFAULT_POSITION, KINGSIDE, MoveKind, MoveOptions, Piece, Position, QUEENSIDE, Square,
    SquareExt,
};
use std::time::Instant;

const TEST_POSITIONS: [&str; 5] = [
    DEFAULT_POSITION,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
];

fn square(name: &str) -> Square {
    Square::parse(name).unwrap()
}

/// Walks the legal move tree, checking at every node that make/unmake
/// restores the position, that the FEN reloads to the same position and
/// that every move survives a SAN round trip.
fn test_round_trips_recursive(
    position: &mut Position,
    depth: usize,
    path: &mut Vec<String>,
    failures: &mut Vec<String>,
) {
    match Position::from_fen(&position.fen()) {
        Ok(reloaded) if reloaded == *position => {}
        _ => failures.push(format!(
            "FEN round trip failed\n  Path: {}\n  FEN: {}",
            path.join(" "),
            position.fen()
        )),
    }

    if depth == 0 {
        return;
    }

    let initial = position.clone();
    let moves = position.generate_moves(MoveOptions::default());

    for board_move in moves {
        let san = position.to_san(&board_move);

        if position.from_san(&san) != Some(board_move) {
            failures.push(format!(
                "SAN round trip failed for {} ({})\n  Path: {}\n  FEN: {}",
                san,
                board_move.unparse(),
                path.join(" "),
                position.fen()
            ));
        }

        let state = position.state();
        position.make_move(&board_move);
        path.push(san);

        test_round_trips_recursive(position, depth - 1, path, failures);

        path.pop();
        position.unmake_move(&board_move, &state);

        if *position != initial {
            failures.push(format!(
                "Position not restored after unmake_move!\n  Path: {} -> {}\n  Initial FEN: {}\n  Restored FEN: {}",
                path.join(" "),
                board_move.unparse(),
                initial.fen(),
                position.fen()
            ));
        }
    }
}

#[test]
fn test_round_trips() {
    for fen in TEST_POSITIONS {
        let mut position = Position::from_fen(fen).unwrap();
        let mut failures = Vec::new();

        test_round_trips_recursive(&mut position, 2, &mut Vec::new(), &mut failures);

        if !failures.is_empty() {
            panic!(
                "Round trip failures for position '{}':\n{}",
                fen,
                failures.join("\n")
            );
        }
    }
}

#[test]
fn test_perft_positions_easy() {
    test_perft_positions_depth(0, 3);
}

#[test]
fn test_perft_positions_hard() {
    test_perft_positions_depth(4, 4);
}

fn test_perft_positions_depth(min_depth: usize, max_depth: usize) {
    let mut failures: Vec<_> = Vec::new();
    let mut total = 0;

    // https://www.chessprogramming.org/Perft_Results
    let test_positions = [
        (TEST_POSITIONS[0], vec![(1, 20), (2, 400), (3, 8902), (4, 197281)]),
        (TEST_POSITIONS[1], vec![(1, 48), (2, 2039), (3, 97862)]),
        (TEST_POSITIONS[2], vec![(1, 14), (2, 191), (3, 2812), (4, 43238)]),
        (TEST_POSITIONS[3], vec![(1, 6), (2, 264), (3, 9467), (4, 422333)]),
        (TEST_POSITIONS[4], vec![(1, 44), (2, 1486), (3, 62379)]),
    ];

    for (fen, depth_counts) in test_positions.iter() {
        println!("Testing position: {}", fen);
        let mut position = Position::from_fen(fen).unwrap();

        for &(depth, expected_count) in depth_counts {
            if !(min_depth <= depth && depth <= max_depth) {
                continue;
            }

            let start_time = Instant::now();
            let nodes = position.perft(depth);
            let elapsed = start_time.elapsed();

            println!(
                "  Depth {}: {} nodes (expected: {}) - {:?}",
                depth, nodes, expected_count, elapsed
            );

            if nodes != expected_count {
                failures.push(format!(
                    "Position '{}' at depth {}: got {} nodes, expected {}",
                    fen, depth, nodes, expected_count
                ));
            }

            total += 1;
        }
        println!();
    }

    if !failures.is_empty() {
        panic!(
            "Perft test failed with {}/{} error(s):\n  {}",
            failures.len(),
            total,
            failures.join("\n  ")
        );
    }
}

#[test]
fn test_fools_mate() {
    let mut position =
        Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();

    assert!(position.is_in_check());
    assert!(position.is_checkmate());
    assert!(!position.is_stalemate());
    assert!(position.generate_moves(MoveOptions::default()).is_empty());

    let mut controller = GameController::new();
    for notation in ["f3", "e5", "g4", "Qh4#"] {
        assert_eq!(controller.try_move_piece(notation), MoveResultType::Success);
    }
    assert!(controller.is_checkmate());
    assert!(controller.is_game_over());
    assert!(!controller.is_draw());
    assert_eq!(controller.history().last().unwrap(), "Qh4#");
}

#[test]
fn test_stalemate() {
    let mut position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();

    assert!(!position.is_in_check());
    assert!(position.is_stalemate());
    assert!(!position.is_checkmate());
}

#[test]
fn test_threefold_repetition() {
    let mut controller = GameController::new();

    for _ in 0..2 {
        assert!(!controller.is_threefold_repetition());

        for notation in ["Nf3", "Nf6", "Ng1", "Ng8"] {
            assert_eq!(controller.try_move_piece(notation), MoveResultType::Success);
        }
    }

    assert!(controller.is_threefold_repetition());
    assert!(controller.is_draw());

    controller.undo_move();
    assert!(!controller.is_threefold_repetition());
}

#[test]
fn test_fifty_move_rule() {
    let mut controller = GameController::new();
    controller
        .new_game_from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80")
        .unwrap();
    assert!(!controller.is_draw());

    assert_eq!(controller.try_move_piece("Ra2"), MoveResultType::Success);
    assert!(controller.is_draw());
}

#[test]
fn test_castling_moves_rook_and_clears_rights() {
    let mut position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let castle = position.from_san("O-O").unwrap();
    let state = position.state();

    position.make_move(&castle);
    assert_eq!(position.get(square("g1")), Some((Piece::King, Color::White)));
    assert_eq!(position.get(square("f1")), Some((Piece::Rook, Color::White)));
    assert_eq!(position.get(square("h1")), None);
    assert_eq!(position.castling[Color::White as usize], 0);
    assert_eq!(position.king_square(Color::White), Some(square("g1")));

    position.unmake_move(&castle, &state);
    assert_eq!(position.fen(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");

    // capturing the rook on a8 takes away black's queenside right only
    let mut position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let capture = position.from_san("Rxa8+").unwrap();
    position.make_move(&capture);
    assert_eq!(position.castling[Color::Black as usize], KINGSIDE);
    assert_eq!(position.castling[Color::White as usize], KINGSIDE);
    assert!(position.fen().contains(" Kk "));
}

#[test]
fn test_castling_blocked_and_out_of_check() {
    let mut position = Position::from_fen("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1").unwrap();
    assert_eq!(position.from_san("O-O"), None);
    assert_eq!(position.from_san("O-O-O"), None);

    // in check from the rook on e8
    let mut position = Position::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert!(
        !position
            .generate_moves(MoveOptions::default())
            .iter()
            .any(|m| m.is_castle())
    );
    assert_eq!(position.castling[Color::White as usize], KINGSIDE | QUEENSIDE);
}

#[test]
fn test_en_passant_make_and_unmake() {
    let mut controller = GameController::new();
    for notation in ["e4", "a6", "e5", "d5"] {
        assert_eq!(controller.try_move_piece(notation), MoveResultType::Success);
    }

    assert_eq!(controller.position.en_passant, Some(square("d6")));
    let before = controller.position.clone();

    assert_eq!(controller.try_move_piece("exd6"), MoveResultType::Success);
    let en_passant = controller.moves().last().unwrap().board_move;
    assert_eq!(en_passant.kind, MoveKind::EnPassant);
    assert_eq!(controller.position.get(square("d5")), None);
    assert_eq!(controller.position.halfmove_clock, 0);
    assert_eq!(controller.position.en_passant, None);

    controller.undo_move();
    assert_eq!(controller.position, before);
}

#[test]
fn test_promotion_make_and_unmake() {
    let fen = "1r2k3/P7/8/8/8/8/8/4K3 w - - 5 40";
    let mut position = Position::from_fen(fen).unwrap();

    let promotion = position.from_san("axb8=N").unwrap();
    let state = position.state();
    position.make_move(&promotion);

    assert_eq!(position.get(square("b8")), Some((Piece::Knight, Color::White)));
    assert_eq!(position.get(square("a7")), None);
    assert_eq!(position.halfmove_clock, 0);
    assert_eq!(position.side, Color::Black);

    position.unmake_move(&promotion, &state);
    assert_eq!(position.fen(), fen);
}

#[test]
fn test_clocks() {
    let mut controller = GameController::new();

    controller.try_move_piece("Nf3");
    assert_eq!(controller.position.halfmove_clock, 1);
    assert_eq!(controller.position.fullmove_number, 1);

    controller.try_move_piece("Nc6");
    assert_eq!(controller.position.halfmove_clock, 2);
    assert_eq!(controller.position.fullmove_number, 2);

    controller.try_move_piece("e4");
    assert_eq!(controller.position.halfmove_clock, 0);
    assert_eq!(controller.turn(), Color::Black);
}
