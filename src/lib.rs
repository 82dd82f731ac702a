//! cinedex, a read-only movie and TV series catalog API.
//!
//! The catalog is served from a document-style SQLite store holding two
//! collections (movies and series). The interesting work lives in
//! [`repositories`]: building filter/sort/projection pipelines, paginating
//! them, and shaping stored documents into the client-facing view models.

pub mod assets;
pub mod config;
pub mod database;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod utils;
pub mod web;
