use std::env;
use std::error::Error;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, Write};
use std::process;

use shakmaty::{CastlingMode, Color, Move};

use morphite::{
    Engine, EngineConfig, EngineError, GameResult, GameStatus, Position, Score, DEFAULT_DEPTH,
};

struct Options {
    depth: u8,
    engine_color: Color,
    fen: Option<String>,
    log_path: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            engine_color: Color::White,
            fen: None,
            log_path: "game.log".to_string(),
        }
    }
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut options = Options::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--depth" => {
                    options.depth = args
                        .next()
                        .and_then(|v| v.parse().ok())
                        .ok_or("--depth takes a number of plies")?;
                }
                "--color" => match args.next().as_deref() {
                    Some("white") => options.engine_color = Color::White,
                    Some("black") => options.engine_color = Color::Black,
                    _ => return Err("--color takes white or black".to_string()),
                },
                "--fen" => {
                    options.fen = Some(args.next().ok_or("--fen takes a position string")?);
                }
                "--log" => {
                    options.log_path = args.next().ok_or("--log takes a file path")?;
                }
                other => return Err(format!("unknown option: {other}")),
            }
        }
        Ok(options)
    }
}

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: morphite [--depth N] [--color white|black] [--fen FEN] [--log PATH]");
            process::exit(2);
        }
    };
    if let Err(e) = run(options) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(options: Options) -> Result<(), Box<dyn Error>> {
    let mut pos = match &options.fen {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::new(),
    };
    let mut engine = Engine::with_config(EngineConfig {
        verbose: true,
        ..EngineConfig::default()
    });
    let mut log = GameLog::open(&options.log_path)?;
    log.line(&format!("game start: {}", pos.fen()))?;
    log.line(&format!("eval: {}", engine.static_eval(&pos)))?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let (status, result) = pos.game_state();
        if result != GameResult::Ongoing {
            let summary = summarize(status, result);
            println!("{summary}");
            log.line(&summary)?;
            break;
        }

        let mover = side_name(pos.side_to_move());
        if pos.side_to_move() == options.engine_color {
            let m = engine.find_best_move(&mut pos, options.depth, options.engine_color)?;
            let uci = m.to_uci(CastlingMode::Standard).to_string();
            pos.make_move(&m);
            let eval = engine.static_eval(&pos);
            println!("{mover} plays {uci} (eval {eval})");
            println!("fen {}", pos.fen());
            log.record(mover, &uci, &pos.fen(), eval)?;
        } else {
            print!("{mover} to move (e.g. e2e4, e7e8q, O-O): ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input == "quit" {
                break;
            }
            match parse_move(&pos, input) {
                Some(m) => {
                    let uci = m.to_uci(CastlingMode::Standard).to_string();
                    pos.make_move(&m);
                    let eval = engine.static_eval(&pos);
                    println!("fen {}", pos.fen());
                    log.record(mover, &uci, &pos.fen(), eval)?;
                }
                None => {
                    eprintln!("{}", EngineError::IllegalMove(input.to_string()));
                }
            }
        }
    }

    Ok(())
}

/// Match the user's input against the legal-move list. Accepts pure
/// coordinate form (`e2e4`, promotions `e7e8q`) and `O-O` / `O-O-O`.
fn parse_move(pos: &Position, input: &str) -> Option<Move> {
    let legal = pos.legal_moves();

    if input == "O-O" || input == "O-O-O" {
        let kingside = input == "O-O";
        return legal
            .iter()
            .find(|m| match m {
                Move::Castle { king, rook } => (rook.file() > king.file()) == kingside,
                _ => false,
            })
            .cloned();
    }

    legal
        .iter()
        .find(|m| m.to_uci(CastlingMode::Standard).to_string() == input)
        .cloned()
}

fn side_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

fn summarize(status: GameStatus, result: GameResult) -> String {
    match status {
        GameStatus::Checkmate => match result {
            GameResult::WhiteWins => "checkmate: white wins".to_string(),
            _ => "checkmate: black wins".to_string(),
        },
        GameStatus::Stalemate => "draw: stalemate".to_string(),
        GameStatus::InsufficientMaterial => "draw: insufficient material".to_string(),
        GameStatus::FiftyMoveRule => "draw: fifty-move rule".to_string(),
        GameStatus::ThreefoldRepetition => "draw: threefold repetition".to_string(),
        GameStatus::Ongoing => "game in progress".to_string(),
    }
}

/// Append-only record of the game: one line per move with the
/// resulting FEN and evaluation.
struct GameLog {
    file: File,
}

impl GameLog {
    fn open(path: &str) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.file, "{text}")
    }

    fn record(&mut self, side: &str, uci: &str, fen: &str, eval: Score) -> io::Result<()> {
        writeln!(self.file, "{side}: {uci} | fen {fen} | eval {eval}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_move() {
        let pos = Position::new();
        let m = parse_move(&pos, "e2e4");
        assert!(m.is_some());
        assert!(parse_move(&pos, "e2e5").is_none());
        assert!(parse_move(&pos, "nonsense").is_none());
    }

    #[test]
    fn test_parse_promotion() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let m = parse_move(&pos, "a7a8q").unwrap();
        assert!(m.is_promotion());
        assert!(parse_move(&pos, "a7a8n").is_some());
    }

    #[test]
    fn test_parse_castling() {
        let pos = Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1")
            .unwrap();
        let kingside = parse_move(&pos, "O-O").unwrap();
        let queenside = parse_move(&pos, "O-O-O").unwrap();
        assert!(kingside.is_castle());
        assert!(queenside.is_castle());
        assert_ne!(kingside, queenside);
    }

    #[test]
    fn test_options_parsing() {
        let args = ["--depth", "6", "--color", "black", "--log", "x.log"]
            .iter()
            .map(|s| s.to_string());
        let options = Options::parse(args).unwrap();
        assert_eq!(options.depth, 6);
        assert_eq!(options.engine_color, Color::Black);
        assert_eq!(options.log_path, "x.log");

        let bad = Options::parse(["--depth"].iter().map(|s| s.to_string()));
        assert!(bad.is_err());
    }
}
