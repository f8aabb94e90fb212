//! Bornes - importers for French constituency boundaries
//!
//! This library provides shared types and modules for the two import binaries.

pub mod db;
pub mod error;
pub mod eur;
pub mod geometry;
pub mod import;
pub mod models;
pub mod sources;

pub use error::ImportError;
pub use models::{Area, AreaType, CodeType, Country, Generation};
