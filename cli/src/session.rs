use std::io::{self, BufRead, Write};

use mineclear_core::{Coord2, GameError, GameState, MinefieldGenerator, PlayEngine};

use crate::command::{Action, Command};

const PROMPT: &str = "Enter move (row,col,action - r to reveal, f to flag/unflag, c to chord, q to quit): ";

/// Runs the prompt/move/render loop until the game ends, the player quits or input runs out.
pub fn play<G, R, W>(engine: &mut PlayEngine<G>, input: R, mut output: W) -> io::Result<GameState>
where
    G: MinefieldGenerator,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(output, "{}", engine.render(false))?;
        writeln!(output, "Mines left: {}", engine.mines_left())?;

        match engine.state() {
            GameState::Won => {
                writeln!(output, "Congratulations! You won!")?;
                break;
            }
            GameState::Lost => {
                writeln!(output, "Game Over! You hit a mine.")?;
                break;
            }
            GameState::NotStarted | GameState::InProgress => {}
        }

        write!(output, "{PROMPT}")?;
        output.flush()?;

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) if err.kind() == io::ErrorKind::InvalidData => {
                writeln!(output, "Invalid input, not valid UTF-8")?;
                continue;
            }
            Some(Err(err)) => return Err(err),
            None => {
                writeln!(output)?;
                log::debug!("Input closed, leaving game");
                break;
            }
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };
        log::debug!("Command: {:?}", command);

        let Command::Move { coords, action } = command else {
            break;
        };

        match apply(engine, coords, action) {
            Ok(true) => {}
            Ok(false) => writeln!(output, "Nothing to do at {},{}", coords.0, coords.1)?,
            Err(err) => writeln!(output, "{err}")?,
        }
    }

    Ok(engine.state())
}

/// Returns whether the move changed the board.
fn apply<G: MinefieldGenerator>(
    engine: &mut PlayEngine<G>,
    coords: Coord2,
    action: Action,
) -> Result<bool, GameError> {
    let changed = match action {
        Action::Reveal => engine.reveal(coords)?.has_update(),
        Action::Chord => engine.chord_reveal(coords)?.has_update(),
        Action::Flag => engine.toggle_flag(coords)?.has_update(),
    };
    if engine.state() == GameState::Lost {
        log::info!("Mine triggered at {:?}", engine.triggered_mine());
    }
    Ok(changed)
}
