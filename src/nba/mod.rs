//! NBA stats service: team reference data, wire types, HTTP client and the
//! per-domain source adapters built on them.

pub mod adapters;
pub mod http;
pub mod teams;
pub mod types;

pub use http::{MeasureType, StatsApi, StatsClient};
pub use teams::{Team, TEAMS};
