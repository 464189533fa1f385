use crate::game::fen::FenError;
use regex::Regex;
use thiserror::Error;

/// Newline pattern used when no newline sequence is configured.
pub const DEFAULT_NEWLINE: &str = r"\r?\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PgnEvent<'a> {
    Header { name: &'a str, value: &'a str },
    MoveNumber(u32),
    Nag(u32),
    Score(&'a str),
    Move(&'a str),
    Comment(String),
    VariationStart,
    VariationEnd,
    End,
}

#[derive(Debug, Error)]
pub enum PgnError {
    #[error("No pgn.")]
    Empty,
    #[error("Invalid pgn, cannot extract move list.")]
    MissingMoveText,
    #[error("Invalid move '{0}'")]
    InvalidMove(String),
    #[error("Invalid FEN header: {0}")]
    InvalidFen(#[from] FenError),
    #[error("Invalid newline pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// The three patterns of one tokenizer run, each with the newline
/// sequence spliced in wherever a line break may appear.
struct PgnPatterns {
    sections: Regex,
    header: Regex,
    move_text: Regex,
    newline: Regex,
}

impl PgnPatterns {
    fn new(newline: &str) -> Result<Self, regex::Error> {
        let nl = format!("(?:{})", newline);
        let build = |pattern: &str| Regex::new(&pattern.replace("NL", &nl));

        Ok(Self {
            sections: build(
                r"^(?:NL)*((?:\[.*\](?:NL))*)((?:\{((?:.|NL)*?)\}|(?:NL))*1\.(?:.*(?:NL)?)*)$",
            )?,
            header: build(r#"NL|\[(\w+)\s+"(.*?)"\]"#)?,
            move_text: build(
                r"\s+|NL|(\d+)\.+|\$(\d+)|(1-0|0-1|1/2-1/2|\*)|([\w\-#+?!=]+)NL|([\w\-#+?!=]+)|\{((?:.|NL)*?)\}|(\()|(\))",
            )?,
            newline: Regex::new(&nl)?,
        })
    }
}

/// Digits matched by the movetext pattern; only overflow can fail, and that
/// saturates.
fn parse_number(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

/// Tokenizes PGN text, handing each event to `emit` as it is found.
///
/// `newline` is the literal line separator of the text; `None` accepts both
/// `\n` and `\r\n`. Variations are reported as start/end events only, so
/// callers that care about nesting keep their own depth. The first error
/// returned by `emit` stops the run and is passed through.
pub fn parse<'a, E>(
    text: &'a str,
    newline: Option<&str>,
    mut emit: impl FnMut(PgnEvent<'a>) -> Result<(), E>,
) -> Result<(), E>
where
    E: From<PgnError>,
{
    if text.is_empty() {
        return Err(PgnError::Empty.into());
    }

    let newline = match newline {
        Some(literal) => regex::escape(literal),
        None => DEFAULT_NEWLINE.to_string(),
    };
    let patterns = PgnPatterns::new(&newline).map_err(PgnError::from)?;

    let sections = patterns
        .sections
        .captures(text)
        .ok_or(PgnError::MissingMoveText)?;

    if let Some(headers) = sections.get(1) {
        for captures in patterns.header.captures_iter(headers.as_str()) {
            if let (Some(name), Some(value)) = (captures.get(1), captures.get(2)) {
                emit(PgnEvent::Header {
                    name: name.as_str(),
                    value: value.as_str(),
                })?;
            }
        }
    }

    let move_text = match sections.get(2) {
        Some(m) if !m.as_str().is_empty() => m.as_str(),
        _ => return Err(PgnError::MissingMoveText.into()),
    };

    for captures in patterns.move_text.captures_iter(move_text) {
        let Some((index, token)) = captures
            .iter()
            .enumerate()
            .skip(1)
            .find_map(|(index, group)| group.map(|group| (index, group.as_str())))
        else {
            continue; // whitespace
        };

        let event = match index {
            1 => PgnEvent::MoveNumber(parse_number(token)),
            2 => PgnEvent::Nag(parse_number(token)),
            3 => PgnEvent::Score(token),
            4 | 5 => PgnEvent::Move(token),
            6 => PgnEvent::Comment(
                patterns
                    .newline
                    .split(token)
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
                    .trim()
                    .to_string(),
            ),
            7 => PgnEvent::VariationStart,
            _ => PgnEvent::VariationEnd,
        };

        emit(event)?;
    }

    emit(PgnEvent::End)
}

/// Collects all events of [`parse`] into a list.
pub fn tokenize<'a>(text: &'a str, newline: Option<&str>) -> Result<Vec<PgnEvent<'a>>, PgnError> {
    let mut events = Vec::new();

    parse(text, newline, |event| {
        events.push(event);
        Ok::<(), PgnError>(())
    })?;

    Ok(events)
}
