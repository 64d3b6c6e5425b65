use std::path::PathBuf;

use glam::Vec3;
use thiserror::Error;

use stars::search::NeighborQuery;

pub(crate) const LOAD_COMMAND: &str = "stars";
pub(crate) const NEIGHBORS_COMMAND: &str = "naive_neighbors";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Name must have quotations around it")]
    UnquotedName,
    #[error("Unterminated quotation in input")]
    UnterminatedQuote,
}

pub(crate) type CommandResult<T> = std::result::Result<T, CommandError>;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Load { path: PathBuf },
    Neighbors(NeighborQuery),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub text: String,
    pub quoted: bool,
}

/// Splits on whitespace; a `"..."` run is one token with the quotes removed.
pub(crate) fn tokenize(line: &str) -> CommandResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = line.trim().chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '"' {
            chars.next();
            let mut text = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(c) => text.push(c),
                    None => return Err(CommandError::UnterminatedQuote),
                }
            }
            tokens.push(Token { text, quoted: true });
            continue;
        }

        let mut text = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                break;
            }
            text.push(c);
            chars.next();
        }
        tokens.push(Token {
            text,
            quoted: false,
        });
    }

    Ok(tokens)
}

/// `Ok(None)` for a blank line.
pub(crate) fn parse(line: &str) -> CommandResult<Option<Command>> {
    let tokens = tokenize(line)?;
    let Some((name, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match name.text.as_str() {
        LOAD_COMMAND => match args {
            [path] => Command::Load {
                path: PathBuf::from(&path.text),
            },
            _ => return Err(CommandError::Usage("stars <path>")),
        },
        NEIGHBORS_COMMAND => Command::Neighbors(parse_neighbors(args)?),
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn parse_neighbors(args: &[Token]) -> CommandResult<NeighborQuery> {
    match args {
        [k, x, y, z] => Ok(NeighborQuery::Coordinate {
            k: parse_k(k)?,
            position: Vec3::new(
                parse_coordinate("x", x)?,
                parse_coordinate("y", y)?,
                parse_coordinate("z", z)?,
            ),
        }),
        [k, name] => {
            let k = parse_k(k)?;
            if !name.quoted {
                return Err(CommandError::UnquotedName);
            }
            Ok(NeighborQuery::Name {
                k,
                name: name.text.clone(),
            })
        }
        _ => Err(CommandError::Usage(
            "naive_neighbors <k> <x> <y> <z> | naive_neighbors <k> \"<name>\"",
        )),
    }
}

/// Negative counts ask for nothing.
fn parse_k(token: &Token) -> CommandResult<usize> {
    let k: i64 = token.text.parse().map_err(|_| CommandError::InvalidNumber {
        field: "k",
        value: token.text.clone(),
    })?;

    if k <= 0 {
        return Ok(0);
    }
    Ok(usize::try_from(k).unwrap_or(usize::MAX))
}

fn parse_coordinate(field: &'static str, token: &Token) -> CommandResult<f32> {
    token
        .text
        .parse()
        .map_err(|_| CommandError::InvalidNumber {
            field,
            value: token.text.clone(),
        })
}
