use mineclear_core::{Coord, Coord2};
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Reveal,
    Flag,
    Chord,
}

impl FromStr for Action {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Ok(Self::Reveal),
            "f" | "flag" => Ok(Self::Flag),
            "c" | "chord" => Ok(Self::Chord),
            _ => Err(CommandError::UnknownAction(s.to_owned())),
        }
    }
}

/// One line of player input, already checked to be well-formed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move { coords: Coord2, action: Action },
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid input format, expected row,col,action")]
    WrongArity,
    #[error("Invalid input, row and column must be integers: {0}")]
    InvalidNumber(#[from] ParseIntError),
    #[error("Unknown action {0:?}, use r to reveal, f to flag or c to chord")]
    UnknownAction(String),
}

impl FromStr for Command {
    type Err = CommandError;

    /// Accepts `row,col,action` with commas and/or whitespace as separators, or `q` to quit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
            return Ok(Self::Quit);
        }

        let parts: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        let &[row, col, action] = parts.as_slice() else {
            return Err(CommandError::WrongArity);
        };

        let row: Coord = row.parse()?;
        let col: Coord = col.parse()?;
        let action = action.parse()?;
        Ok(Self::Move {
            coords: (row, col),
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_moves() {
        assert_eq!(
            "3,4,r".parse::<Command>(),
            Ok(Command::Move {
                coords: (3, 4),
                action: Action::Reveal
            })
        );
        assert_eq!(
            " 0, 1, F ".parse::<Command>(),
            Ok(Command::Move {
                coords: (0, 1),
                action: Action::Flag
            })
        );
    }

    #[test]
    fn parses_whitespace_separated_moves() {
        assert_eq!(
            "2 7 chord".parse::<Command>(),
            Ok(Command::Move {
                coords: (2, 7),
                action: Action::Chord
            })
        );
    }

    #[test]
    fn negative_coordinates_reach_the_engine() {
        assert_eq!(
            "-1,0,r".parse::<Command>(),
            Ok(Command::Move {
                coords: (-1, 0),
                action: Action::Reveal
            })
        );
    }

    #[test]
    fn parses_quit() {
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("QUIT\n".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("".parse::<Command>(), Err(CommandError::WrongArity));
        assert_eq!("1,2".parse::<Command>(), Err(CommandError::WrongArity));
        assert_eq!("1,2,r,4".parse::<Command>(), Err(CommandError::WrongArity));
        assert!(matches!(
            "a,2,r".parse::<Command>(),
            Err(CommandError::InvalidNumber(_))
        ));
        assert_eq!(
            "1,2,x".parse::<Command>(),
            Err(CommandError::UnknownAction("x".to_owned()))
        );
    }
}
