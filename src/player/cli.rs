#![cfg(feature = "std")]

use std::string::String;

use crate::session::Command;

/// Help text listing the commands accepted by [`parse_command`].
pub const HELP: &str = "\
Commands:
  <n> | flip <n>   turn card n face up (cards are numbered from 1)
  reset            deal a new board on the same level
  again            play again after a win
  difficulty       switch to the next level and deal
  theme            toggle dark/light mode
  quit             leave the game";

/// Parse one line typed by a human player.
pub fn parse_command(input: &str) -> Result<Command, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    let mut words = input.split_whitespace();
    let first = words.next().ok_or("Empty input")?.to_ascii_lowercase();
    let rest: Vec<&str> = words.collect();

    let command = match first.as_str() {
        "flip" | "f" => {
            let [number] = rest.as_slice() else {
                return Err("Usage: flip <n>".to_string());
            };
            return parse_card(number).map(Command::Reveal);
        }
        n if n.chars().all(|c| c.is_ascii_digit()) => parse_card(n).map(Command::Reveal)?,
        "reset" | "r" => Command::Reset,
        "again" | "a" => Command::PlayAgain,
        "difficulty" | "d" => Command::ChangeDifficulty,
        "theme" | "t" => Command::ToggleTheme,
        "quit" | "q" | "exit" => Command::Shutdown,
        other => return Err(format!("Unknown command '{}'", other)),
    };
    if !rest.is_empty() {
        return Err(format!("Unexpected arguments after '{}'", first));
    }
    Ok(command)
}

fn parse_card(number: &str) -> Result<usize, String> {
    let n: usize = number
        .parse()
        .map_err(|_| format!("Invalid card '{}' - must be a number", number))?;
    if n == 0 {
        return Err("Cards are numbered from 1".to_string());
    }
    Ok(n - 1)
}
