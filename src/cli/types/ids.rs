//! ID types for teams and games.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Internal team identifier (1..=30), the key used by every table.
///
/// # Examples
///
/// ```rust
/// use arrbo_ingest::TeamId;
///
/// let team_id = TeamId::new(14);
/// assert_eq!(team_id.as_u8(), 14);
/// assert_eq!(team_id.to_string(), "14");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl TeamId {
    pub fn new(id: u8) -> Self {
        Self(id)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team identifier as issued by the stats service (e.g. `1610612747`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NbaTeamId(pub u32);

impl NbaTeamId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NbaTeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
