//! The interactive text loop.

use anyhow::{Context, Result};
use dungeon_core::{HeadlessConfig, HeadlessGame, Outcome};
use std::io::{self, BufRead, Write};

/// Play one game on stdin and stdout.
pub fn run(config: HeadlessConfig, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    play(config, json, stdin.lock(), stdout.lock())
}

/// Play one game, reading choices from `input` and writing everything to
/// `output`. Ends when the game is over or `input` runs dry.
pub fn play<R: BufRead, W: Write>(
    config: HeadlessConfig,
    json: bool,
    mut input: R,
    mut output: W,
) -> Result<()> {
    let mut game = HeadlessGame::new(config).context("failed to build the dungeon")?;

    writeln!(output, "Welcome!")?;
    writeln!(output, "Find your way through the dungeon to the end (goal chamber).")?;
    writeln!(output, "Game starts now!")?;

    let mut line = String::new();
    while !game.is_finished() {
        writeln!(output, "{}", game.status_text())?;
        writeln!(output, "{}", game.options_text())?;
        write!(output, "Enter your choice: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            tracing::info!(turns = game.turn_count(), "input closed");
            break;
        }

        let resolution = game.choose(&line);
        writeln!(output, "{}", resolution.narrative)?;

        if json {
            let snapshot = game
                .snapshot()
                .to_json()
                .context("failed to serialize snapshot")?;
            writeln!(output, "{snapshot}")?;
        }
    }

    writeln!(output, "\n")?;
    match game.outcome() {
        Some(Outcome::Victory) => writeln!(
            output,
            "Congratulations! You've reached the goal chamber and won the game!"
        )?,
        Some(Outcome::Defeat) => writeln!(output, "Game Over! Your character has been defeated.")?,
        None => writeln!(output, "You have left the game.")?,
    }
    writeln!(output, "Thank you for playing!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_to_string(input: &str, json: bool) -> String {
        let config = HeadlessConfig::quick_start("Gandalf").with_seed(11);
        let mut output = Vec::new();
        play(config, json, input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_leaving_early() {
        let output = play_to_string("", false);
        assert!(output.starts_with("Welcome!\n"));
        assert!(output.contains("Enter your choice: "));
        assert!(output.ends_with("You have left the game.\nThank you for playing!\n"));
    }

    #[test]
    fn test_bad_input_is_reported() {
        let output = play_to_string("north\n0\n", false);
        assert!(output.contains("Error: Please enter a valid number"));
        assert!(output.contains("You moved to a new chamber."));
        assert!(output.contains("You have left the game."));
    }

    #[test]
    fn test_json_snapshots() {
        let output = play_to_string("0\n", true);
        assert!(output.contains("\"chamber\":1"));
        assert!(output.contains("\"player\":\"Gandalf\""));
    }
}
