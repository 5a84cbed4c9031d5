//! REPL session state
//!
//! Holds the pagination cursor and the caught pokemon, and executes
//! commands against the API client.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::command::{Command, COMMANDS};
use crate::api::PokeApiClient;
use crate::error::{PokedexError, Result};
use crate::models::{LocationAreaPage, Pokemon};

/// Upper bound (exclusive) of a catch roll.
pub const CATCH_ROLL_MAX: u32 = 200;

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print the text and keep reading
    Print(String),
    /// Print the text and stop
    Exit(String),
}

/// State of one interactive session.
#[derive(Debug)]
pub struct Session {
    client: PokeApiClient,
    /// Page `map` will show next
    next_page: Option<String>,
    /// Page `mapb` will show next
    previous_page: Option<String>,
    caught: BTreeMap<String, Pokemon>,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session with a fixed random source for catch rolls.
    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        let next_page = Some(client.first_location_page_url());
        Self {
            client,
            next_page,
            previous_page: None,
            caught: BTreeMap::new(),
            rng,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    pub fn is_caught(&self, name: &str) -> bool {
        self.caught.contains_key(name)
    }

    // == Execute ==
    pub async fn execute(&mut self, command: Command) -> Result<Reply> {
        let text = match command {
            Command::Help => help(),
            Command::Exit => return Ok(Reply::Exit("Closing the Pokedex... Goodbye!\n".into())),
            Command::Map => {
                let url = self.next_page.clone().ok_or(PokedexError::NoMorePages)?;
                self.show_page(&url).await?
            }
            Command::MapBack => {
                let url = self
                    .previous_page
                    .clone()
                    .ok_or(PokedexError::NoPreviousPage)?;
                self.show_page(&url).await?
            }
            Command::Explore(area) => self.explore(&area).await?,
            Command::Catch(name) => self.catch(&name).await?,
            Command::Inspect(name) => self.inspect(&name),
            Command::Pokedex => self.pokedex(),
        };

        Ok(Reply::Print(text))
    }

    async fn show_page(&mut self, url: &str) -> Result<String> {
        let page: LocationAreaPage = self.client.location_areas(url).await?;
        self.next_page = page.next;
        self.previous_page = page.previous;

        Ok(page
            .results
            .iter()
            .map(|area| format!("{}\n", area.name))
            .collect())
    }

    async fn explore(&self, area: &str) -> Result<String> {
        let location = self.client.location_area(area).await?;

        let mut text = format!("Exploring {}...\nFound Pokemon:\n", area);
        for name in location.pokemon_names() {
            text.push_str(&format!(" - {}\n", name));
        }
        Ok(text)
    }

    async fn catch(&mut self, name: &str) -> Result<String> {
        if self.is_caught(name) {
            return Ok(format!("You already caught {}\n", name));
        }

        let pokemon = self.client.pokemon(name).await?;
        let mut text = format!("Throwing a Pokeball at {}...\n", name);

        let roll = self.rng.gen_range(0..CATCH_ROLL_MAX);
        if roll < pokemon.base_experience() {
            text.push_str(&format!("{} escaped!\n", name));
            return Ok(text);
        }

        info!(pokemon = name, roll, "pokemon caught");
        text.push_str(&format!("{} was caught!\n", name));
        text.push_str("You may now inspect it with the inspect command.\n");
        self.caught.insert(name.to_string(), pokemon);
        Ok(text)
    }

    fn inspect(&self, name: &str) -> String {
        match self.caught.get(name) {
            Some(pokemon) => describe(pokemon),
            None => "You have not caught that pokemon\n".to_string(),
        }
    }

    fn pokedex(&self) -> String {
        if self.caught.is_empty() {
            return "You haven't caught any pokemon yet...\n".to_string();
        }

        let mut text = String::from("Your Pokedex:\n");
        for name in self.caught.keys() {
            text.push_str(&format!(" - {}\n", name));
        }
        text
    }
}

fn help() -> String {
    let mut text = String::from("\nWelcome to the Pokedex!\nUsage:\n\n");
    for (name, description) in COMMANDS {
        text.push_str(&format!("{}: {}\n", name, description));
    }
    text.push('\n');
    text
}

fn describe(pokemon: &Pokemon) -> String {
    let mut text = format!(
        "Name: {}\nHeight: {}\nWeight: {}\nStats:\n",
        pokemon.name, pokemon.height, pokemon.weight
    );
    for stat in &pokemon.stats {
        text.push_str(&format!("  - {}: {}\n", stat.stat.name, stat.base_stat));
    }
    text.push_str("Types:\n");
    for kind in &pokemon.types {
        text.push_str(&format!("  - {}\n", kind.kind.name));
    }
    text
}
