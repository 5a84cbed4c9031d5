//! Models Module
//!
//! Serde types for the PokeAPI payloads this client reads.

mod location;
mod pokemon;

pub use location::{LocationArea, LocationAreaPage, NamedResource, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};
