//! Pokemon payloads

use serde::Deserialize;

use super::NamedResource;

/// `GET /pokemon/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    /// Missing for a few forms upstream; treated as 0
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonType {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

impl Pokemon {
    pub fn base_experience(&self) -> u32 {
        self.base_experience.unwrap_or(0)
    }
}
