// Batch command interpreter
//
// Input is read line by line. The first valid line must create a game:
//
//   B width height players areas     batch mode
//   I width height players areas     interactive mode
//
// and is answered with `OK <line>` on the output. In batch mode every later
// line is one command:
//
//   m player x y    place a marker, prints 1 or 0
//   g player x y    special move, prints 1 or 0
//   b player        busy fields
//   f player        free fields
//   q player        prints 1 if a special move is possible, else 0
//   p               prints the board
//
// Empty lines and lines starting with `#` are skipped. Any other line that
// is not a valid command, including a last line without a terminating
// newline, is answered with `ERROR <line>` on the error stream.

use log::{debug, error, info};
use serde::Serialize;
use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::engine::Game;
use crate::error::SetupError;
use crate::types::PlayerId;

/// How the game created by the first valid line is meant to be played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Batch,
    Interactive,
}

/// A parsed game creation line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSpec {
    pub mode: Mode,
    pub width: u32,
    pub height: u32,
    pub players: u32,
    pub areas: u32,
}

/// A parsed batch mode command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    Move { player: PlayerId, x: u32, y: u32 },
    SpecialMove { player: PlayerId, x: u32, y: u32 },
    BusyFields { player: PlayerId },
    FreeFields { player: PlayerId },
    SpecialMovePossible { player: PlayerId },
    Board,
}

/// Why the interpreter stopped reading
#[derive(Debug)]
pub enum SessionEnd {
    EndOfInput,
    /// An `I` line created a game; the caller decides how to play it
    InteractiveRequested { game: Game, line: usize },
}

/// Classification of one raw input line
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Ignored,
    Invalid,
    Tokens(Vec<&'a [u8]>),
}

/// Whitespace as understood by C `isspace`
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

fn classify(raw: &[u8], terminated: bool) -> Line<'_> {
    if !terminated {
        return Line::Invalid;
    }
    match raw.first() {
        None | Some(b'#') => return Line::Ignored,
        Some(&first) if is_space(first) => return Line::Invalid,
        _ => {}
    }
    if raw.contains(&0) {
        return Line::Invalid;
    }
    Line::Tokens(
        raw.split(|&b| is_space(b))
            .filter(|token| !token.is_empty())
            .collect(),
    )
}

/// Parses a decimal number made only of ASCII digits that fits in `u32`.
/// Leading zeros are allowed.
pub fn parse_number(token: &[u8]) -> Option<u32> {
    if token.is_empty() {
        return None;
    }
    let mut value: u64 = 0;
    for &b in token {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value * 10 + u64::from(b - b'0');
        if value > u64::from(u32::MAX) {
            return None;
        }
    }
    u32::try_from(value).ok()
}

fn parse_numbers<const N: usize>(tokens: &[&[u8]]) -> Option<[u32; N]> {
    if tokens.len() != N {
        return None;
    }
    let mut numbers = [0; N];
    for (slot, token) in numbers.iter_mut().zip(tokens) {
        *slot = parse_number(token)?;
    }
    Some(numbers)
}

fn parse_init(tokens: &[&[u8]]) -> Option<GameSpec> {
    let (first, rest) = tokens.split_first()?;
    let mode = match *first {
        b"B" => Mode::Batch,
        b"I" => Mode::Interactive,
        _ => return None,
    };
    let [width, height, players, areas] = parse_numbers::<4>(rest)?;
    Some(GameSpec {
        mode,
        width,
        height,
        players,
        areas,
    })
}

fn parse_command(tokens: &[&[u8]]) -> Option<Command> {
    let (first, rest) = tokens.split_first()?;
    let command = match *first {
        b"m" => {
            let [player, x, y] = parse_numbers::<3>(rest)?;
            Command::Move { player, x, y }
        }
        b"g" => {
            let [player, x, y] = parse_numbers::<3>(rest)?;
            Command::SpecialMove { player, x, y }
        }
        b"b" => {
            let [player] = parse_numbers::<1>(rest)?;
            Command::BusyFields { player }
        }
        b"f" => {
            let [player] = parse_numbers::<1>(rest)?;
            Command::FreeFields { player }
        }
        b"q" => {
            let [player] = parse_numbers::<1>(rest)?;
            Command::SpecialMovePossible { player }
        }
        b"p" => {
            parse_numbers::<0>(rest)?;
            Command::Board
        }
        _ => return None,
    };
    Some(command)
}

fn flag(ok: bool) -> &'static str {
    if ok {
        "1"
    } else {
        "0"
    }
}

/// Reads commands from an input stream and runs them against one game
pub struct BatchInterpreter {
    config: Config,
    logger: DebugLogger,
}

impl BatchInterpreter {
    /// Creates a new interpreter with the given configuration
    pub fn new(config: Config, logger: DebugLogger) -> Self {
        BatchInterpreter { config, logger }
    }

    /// Processes `input` until it ends or an interactive game is requested.
    /// Results go to `out`, `ERROR <line>` reports go to `err`.
    pub fn run<R: BufRead, W: Write, E: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<SessionEnd> {
        let mut game: Option<Game> = None;
        let mut line_no = 0;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            let terminated = buf.last() == Some(&b'\n');
            if terminated {
                buf.pop();
            }

            let tokens = match classify(&buf, terminated) {
                Line::Ignored => continue,
                Line::Invalid => {
                    debug!("Line {}: malformed", line_no);
                    writeln!(err, "ERROR {}", line_no)?;
                    continue;
                }
                Line::Tokens(tokens) => tokens,
            };

            match game.as_mut() {
                None => match parse_init(&tokens) {
                    Some(spec) => match self.create_game(spec) {
                        Ok(created) => {
                            info!(
                                "Line {}: created {}x{} game for {} players, {} areas each",
                                line_no, spec.width, spec.height, spec.players, spec.areas
                            );
                            self.logger.log_command(line_no, &spec, "OK");
                            writeln!(out, "OK {}", line_no)?;
                            if spec.mode == Mode::Interactive {
                                out.flush()?;
                                return Ok(SessionEnd::InteractiveRequested {
                                    game: created,
                                    line: line_no,
                                });
                            }
                            game = Some(created);
                        }
                        Err(e) => {
                            debug!("Line {}: cannot create game: {}", line_no, e);
                            writeln!(err, "ERROR {}", line_no)?;
                        }
                    },
                    None => {
                        debug!("Line {}: not a game creation line", line_no);
                        writeln!(err, "ERROR {}", line_no)?;
                    }
                },
                Some(current) => match parse_command(&tokens) {
                    Some(command) => {
                        self.execute(current, command, line_no, out, err)?;
                    }
                    None => {
                        debug!("Line {}: not a batch command", line_no);
                        writeln!(err, "ERROR {}", line_no)?;
                    }
                },
            }
        }

        out.flush()?;
        Ok(SessionEnd::EndOfInput)
    }

    fn create_game(&self, spec: GameSpec) -> Result<Game, SetupError> {
        if !self.config.limits.allows_board(spec.width, spec.height) {
            return Err(SetupError::TooLarge {
                width: spec.width,
                height: spec.height,
            });
        }
        Game::new(spec.width, spec.height, spec.players, spec.areas)
    }

    /// Runs one command and prints its result
    fn execute<W: Write, E: Write>(
        &mut self,
        game: &mut Game,
        command: Command,
        line_no: usize,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<()> {
        let result = match command {
            Command::Move { player, x, y } => {
                let placed = game.place(player, x, y);
                if let Err(e) = &placed {
                    debug!("Line {}: move rejected: {}", line_no, e);
                }
                flag(placed.is_ok()).to_string()
            }
            Command::SpecialMove { player, x, y } => {
                let taken = game.special_move(player, x, y);
                if let Err(e) = &taken {
                    debug!("Line {}: special move rejected: {}", line_no, e);
                }
                flag(taken.is_ok()).to_string()
            }
            Command::BusyFields { player } => game.busy_fields(player).to_string(),
            Command::FreeFields { player } => game.free_fields(player).to_string(),
            Command::SpecialMovePossible { player } => {
                flag(game.special_move_possible(player)).to_string()
            }
            Command::Board => match game.render() {
                Ok(image) => {
                    out.write_all(image.as_bytes())?;
                    self.logger.log_command(line_no, &command, &image);
                    return Ok(());
                }
                Err(e) => {
                    error!("Line {}: {}", line_no, e);
                    writeln!(err, "ERROR {}", line_no)?;
                    return Ok(());
                }
            },
        };

        writeln!(out, "{}", result)?;
        self.logger.log_command(line_no, &command, &result);
        Ok(())
    }
}
