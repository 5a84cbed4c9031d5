//! API Module
//!
//! HTTP client for the upstream PokeAPI, read through the response cache.
//!
//! # Endpoints used
//! - `GET /location-area/` - Paginated list of location areas
//! - `GET /location-area/{name}` - A single location area
//! - `GET /pokemon/{name}` - A single pokemon

pub mod client;

pub use client::PokeApiClient;
