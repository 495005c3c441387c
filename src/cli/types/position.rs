//! Basketball position types: roster designations, scraped position tabs,
//! and the defensive-efficiency columns they feed.

use crate::error::IngestError;
use std::fmt;
use std::str::FromStr;

/// Roster position as stored in the `positions` table.
///
/// The stats service reports hybrid designations such as `G-F`; canonical
/// single positions collapse onto the same set (`PG`/`SG` → `G`,
/// `SF`/`PF` → `F`).
///
/// # Examples
///
/// ```rust
/// use arrbo_ingest::RosterPosition;
///
/// let pos: RosterPosition = "SG".parse().unwrap();
/// assert_eq!(pos, RosterPosition::G);
/// assert_eq!("F-C".parse::<RosterPosition>().unwrap().to_string(), "F-C");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterPosition {
    G,
    GF,
    FG,
    F,
    FC,
    CF,
    C,
}

impl RosterPosition {
    pub const ALL: [RosterPosition; 7] = [
        RosterPosition::G,
        RosterPosition::GF,
        RosterPosition::FG,
        RosterPosition::F,
        RosterPosition::FC,
        RosterPosition::CF,
        RosterPosition::C,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RosterPosition::G => "G",
            RosterPosition::GF => "G-F",
            RosterPosition::FG => "F-G",
            RosterPosition::F => "F",
            RosterPosition::FC => "F-C",
            RosterPosition::CF => "C-F",
            RosterPosition::C => "C",
        }
    }
}

impl fmt::Display for RosterPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RosterPosition {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "G" | "PG" | "SG" => Ok(RosterPosition::G),
            "G-F" => Ok(RosterPosition::GF),
            "F-G" => Ok(RosterPosition::FG),
            "F" | "SF" | "PF" => Ok(RosterPosition::F),
            "F-C" => Ok(RosterPosition::FC),
            "C-F" => Ok(RosterPosition::CF),
            "C" => Ok(RosterPosition::C),
            _ => Err(IngestError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}

/// One of the five position tabs on the defense-vs-position page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefensePosition {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl DefensePosition {
    /// Tabs in the order they are scraped.
    pub const ALL: [DefensePosition; 5] = [
        DefensePosition::PG,
        DefensePosition::SG,
        DefensePosition::SF,
        DefensePosition::PF,
        DefensePosition::C,
    ];

    /// Button label of the tab.
    pub fn label(&self) -> &'static str {
        match self {
            DefensePosition::PG => "PG",
            DefensePosition::SG => "SG",
            DefensePosition::SF => "SF",
            DefensePosition::PF => "PF",
            DefensePosition::C => "C",
        }
    }

    /// Column names a tab's values are written to. Guards share one bucket
    /// pair, forwards share the other; centers only fill their own.
    pub fn efficiency_columns(&self) -> &'static [&'static str] {
        match self {
            DefensePosition::PG | DefensePosition::SG => &["pg_efficiency", "sg_efficiency"],
            DefensePosition::SF | DefensePosition::PF => &["sf_efficiency", "pf_efficiency"],
            DefensePosition::C => &["c_efficiency"],
        }
    }
}

impl fmt::Display for DefensePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Writable column of the `defensive_efficiency` table.
///
/// Parsing a column name is the allow-list: anything that does not parse is
/// never interpolated into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EfficiencyColumn {
    Pg,
    Sg,
    Sf,
    Pf,
    C,
}

impl EfficiencyColumn {
    pub fn column_name(&self) -> &'static str {
        match self {
            EfficiencyColumn::Pg => "pg_efficiency",
            EfficiencyColumn::Sg => "sg_efficiency",
            EfficiencyColumn::Sf => "sf_efficiency",
            EfficiencyColumn::Pf => "pf_efficiency",
            EfficiencyColumn::C => "c_efficiency",
        }
    }
}

impl fmt::Display for EfficiencyColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for EfficiencyColumn {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pg_efficiency" => Ok(EfficiencyColumn::Pg),
            "sg_efficiency" => Ok(EfficiencyColumn::Sg),
            "sf_efficiency" => Ok(EfficiencyColumn::Sf),
            "pf_efficiency" => Ok(EfficiencyColumn::Pf),
            "c_efficiency" => Ok(EfficiencyColumn::C),
            _ => Err(IngestError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}
