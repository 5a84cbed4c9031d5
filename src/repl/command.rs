//! Command parsing
//!
//! Turns one line of user input into a [`Command`].

use crate::error::{PokedexError, Result};

/// Name and description of every command, in help order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "Displays a help message"),
    ("exit", "Exit the Pokedex"),
    ("map", "Displays the names of the next 20 location areas"),
    ("mapb", "Displays the names of the previous 20 location areas"),
    ("explore <area>", "Lists the pokemon found in a location area"),
    ("catch <pokemon>", "Tries to catch a pokemon and add it to your pokedex"),
    ("inspect <pokemon>", "Displays details about a pokemon you have caught"),
    ("pokedex", "Lists the pokemon you have caught so far"),
];

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
}

impl Command {
    /// Parses a line of input.
    ///
    /// Input is lower-cased and split on whitespace. Blank lines yield
    /// `Ok(None)`.
    pub fn parse(input: &str) -> Result<Option<Self>> {
        let lowered = input.to_lowercase();
        let mut words = lowered.split_whitespace();

        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match name {
            "help" => no_args(name, &args, Self::Help)?,
            "exit" => no_args(name, &args, Self::Exit)?,
            "map" => no_args(name, &args, Self::Map)?,
            "mapb" => no_args(name, &args, Self::MapBack)?,
            "pokedex" => no_args(name, &args, Self::Pokedex)?,
            "explore" => Self::Explore(one_arg(name, "area", &args)?),
            "catch" => Self::Catch(one_arg(name, "pokemon", &args)?),
            "inspect" => Self::Inspect(one_arg(name, "pokemon", &args)?),
            other => return Err(PokedexError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn no_args(name: &str, args: &[&str], command: Command) -> Result<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(PokedexError::Usage(format!("{} takes no arguments", name)))
    }
}

fn one_arg(name: &str, what: &str, args: &[&str]) -> Result<String> {
    match args {
        [arg] => Ok((*arg).to_string()),
        _ => Err(PokedexError::Usage(format!("{} <{}>", name, what))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("help").unwrap(), Some(Command::Help));
        assert_eq!(Command::parse("  MAP ").unwrap(), Some(Command::Map));
        assert_eq!(Command::parse("mapb").unwrap(), Some(Command::MapBack));
        assert_eq!(Command::parse("pokedex").unwrap(), Some(Command::Pokedex));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Exit));
    }

    #[test]
    fn test_parse_argument_is_lowercased() {
        assert_eq!(
            Command::parse("catch Pikachu").unwrap(),
            Some(Command::Catch("pikachu".to_string()))
        );
        assert_eq!(
            Command::parse("explore  canalave-city-area").unwrap(),
            Some(Command::Explore("canalave-city-area".to_string()))
        );
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t").unwrap(), None);
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = Command::parse("fly away").unwrap_err();
        assert!(matches!(err, PokedexError::UnknownCommand(name) if name == "fly"));
    }

    #[test]
    fn test_parse_wrong_argument_count() {
        assert!(matches!(
            Command::parse("map 2"),
            Err(PokedexError::Usage(_))
        ));
        assert!(matches!(
            Command::parse("catch"),
            Err(PokedexError::Usage(_))
        ));
        assert!(matches!(
            Command::parse("inspect a b"),
            Err(PokedexError::Usage(_))
        ));
    }
}
