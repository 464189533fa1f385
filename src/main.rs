use anyhow::{Context, Result, bail};
use clap::Parser;
use kibitz::controller::{GameController, PgnOptions};
use kibitz::game::{Color, MoveOptions, Position, Square, SquareExt};
use kibitz::utils::cli::{Cli, Command};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Read};
use std::time::Instant;

fn load_position(fen: Option<&str>) -> Result<Position> {
    match fen {
        Some(fen) => Position::from_fen(fen).with_context(|| format!("Invalid FEN '{}'", fen)),
        None => Ok(Position::starting()),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Perft { depth, fen, divide } => {
            let start = Instant::now();

            let nodes = if divide {
                let mut controller = GameController::new();
                if let Some(fen) = &fen {
                    controller.new_game_from_fen(fen)?;
                }

                let mut counts = controller.perft(depth);
                counts.sort_by_key(|(board_move, _)| board_move.unparse());

                for (board_move, nodes) in &counts {
                    println!("{}: {}", board_move.unparse(), nodes);
                }
                println!();

                counts.iter().map(|(_, nodes)| nodes).sum()
            } else {
                load_position(fen.as_deref())?.perft(depth)
            };

            let elapsed = start.elapsed();
            log::info!("perft({}) took {:?}", depth, elapsed);

            println!("Nodes: {}", nodes);
        }
        Command::Fen { fen } => {
            let mut position = load_position(Some(fen.as_str()))?;

            println!("{}", position.ascii());
            println!("FEN: {}", position.fen());

            if position.is_checkmate() {
                println!("Checkmate");
            } else if position.is_stalemate() {
                println!("Stalemate");
            } else if position.is_in_check() {
                println!("Check");
            }
        }
        Command::Moves {
            fen,
            square,
            verbose,
        } => {
            let mut position = load_position(fen.as_deref())?;

            let square = match square.as_deref() {
                Some(name) => match Square::parse(name) {
                    Some(square) => Some(square),
                    None => bail!("Invalid square '{}'", name),
                },
                None => None,
            };

            let moves = position.generate_moves(MoveOptions {
                legal: true,
                square,
            });

            for board_move in &moves {
                let san = position.to_san(board_move);

                if verbose {
                    println!("{:8} {:6} {}", san, board_move.unparse(), board_move.flags());
                } else {
                    println!("{}", san);
                }
            }
        }
        Command::Pgn { newline } => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read PGN from stdin")?;

            let mut controller = GameController::new();
            let loaded = controller.load_pgn(&text, newline.as_deref());

            println!("{}", controller.position.ascii());
            println!("FEN: {}", controller.fen());
            println!("Moves: {}", controller.history().join(" "));

            loaded.context("Failed to replay PGN")?;
        }
        Command::Playout {
            plies,
            seed,
            max_width,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };

            let mut controller = GameController::new();

            for _ in 0..plies {
                if controller.is_game_over() {
                    break;
                }

                let moves = controller.legal_moves();
                let board_move = moves[rng.random_range(0..moves.len())];
                controller.make_move(board_move);
            }

            let result = if controller.is_checkmate() {
                match controller.turn() {
                    Color::White => "0-1",
                    Color::Black => "1-0",
                }
            } else if controller.is_draw() {
                "1/2-1/2"
            } else {
                "*"
            };
            controller.set_header("Result", result);

            println!(
                "{}",
                controller.pgn(&PgnOptions {
                    max_width,
                    newline: "\n".to_string(),
                })
            );
        }
    }

    Ok(())
}
