//! Type-safe wrappers and enums for NBA ingestion data.

pub mod ids;
pub mod position;
pub mod time;

pub use ids::{NbaTeamId, TeamId};
pub use position::{DefensePosition, EfficiencyColumn, RosterPosition};
pub use time::Season;
