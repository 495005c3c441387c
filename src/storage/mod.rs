//! Storage layer for the ingestion pipeline
//!
//! This module owns all write access to the SQLite store:
//! - `models`: Data structures
//! - `schema`: Database connection, schema and team seed
//! - `writer`: Transactional replace / upsert per table
//! - `queries`: Read-back queries

pub mod models;
pub mod queries;
pub mod schema;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::IngestDatabase;
