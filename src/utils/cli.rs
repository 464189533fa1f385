use clap::{Parser, Subcommand};

pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "kibitz", version = VERSION, about = "Chess rules, FEN, SAN and PGN from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Count leaf nodes of the legal move tree
    Perft {
        depth: usize,

        /// Position to start from (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,

        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },

    /// Validate a FEN string and show the position
    Fen { fen: String },

    /// List legal moves in SAN
    Moves {
        #[arg(long)]
        fen: Option<String>,

        /// Only moves of the piece on this square, e.g. e2
        #[arg(long)]
        square: Option<String>,

        /// Also print long algebraic notation and move flags
        #[arg(short, long)]
        verbose: bool,
    },

    /// Replay a PGN game read from stdin
    Pgn {
        /// Literal line separator of the input (defaults to \n or \r\n)
        #[arg(long)]
        newline: Option<String>,
    },

    /// Play random legal moves and print the game as PGN
    Playout {
        #[arg(long, default_value_t = 80)]
        plies: usize,

        #[arg(long)]
        seed: Option<u64>,

        /// Wrap the movetext at this width
        #[arg(long, default_value_t = 72)]
        max_width: usize,
    },
}
