//! kinolink - film metadata resolution and watch-link discovery.
//!
//! Resolves a film query against the Kinopoisk API, then looks for a watch
//! link on LordFilm (through search engine results) and Zona (through its own
//! search page) concurrently.

pub mod config;
pub mod engine;
pub mod extract;
pub mod http_client;
pub mod metadata;
pub mod models;
pub mod render;
pub mod sources;
pub mod verify;
