//! Time-related types: NBA seasons and game dates.

use crate::error::{IngestError, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Month the regular season opens in. Dates from this month onward belong to
/// the season starting in the same calendar year.
const SEASON_START_MONTH: u32 = 10;

/// Type-safe wrapper for an NBA season identifier such as `2025-26`.
///
/// Stored as the starting calendar year; rendered in the stats service's
/// `YYYY-YY` form.
///
/// # Examples
///
/// ```rust
/// use arrbo_ingest::Season;
/// use chrono::NaiveDate;
///
/// let season = Season::containing(NaiveDate::from_ymd_opt(2025, 10, 15).unwrap());
/// assert_eq!(season.to_string(), "2025-26");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(start_year: u16) -> Self {
        Self(start_year)
    }

    pub fn start_year(&self) -> u16 {
        self.0
    }

    /// The season a calendar date falls into.
    pub fn containing(date: NaiveDate) -> Self {
        let year = date.year() as u16;
        if date.month() >= SEASON_START_MONTH {
            Self(year)
        } else {
            Self(year - 1)
        }
    }

    /// The season for today's local date.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.0, (self.0 + 1) % 100)
    }
}

impl FromStr for Season {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || IngestError::InvalidSeason {
            season: s.to_string(),
        };

        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        if start.len() != 4 || end.len() != 2 {
            return Err(invalid());
        }
        let start: u16 = start.parse().map_err(|_| invalid())?;
        let end: u16 = end.parse().map_err(|_| invalid())?;
        if (start + 1) % 100 != end {
            return Err(invalid());
        }
        Ok(Self(start))
    }
}

/// Parse a `YYYY-MM-DD` game date.
pub fn parse_game_date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
}

/// Today's local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
