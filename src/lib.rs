//! Pokedex - an interactive PokeAPI client
//!
//! Browses location areas and pokemon from a REPL. Responses are kept in an
//! in-memory TTL cache swept by a background task.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::Cache;
pub use config::Config;
pub use error::{PokedexError, Result};
