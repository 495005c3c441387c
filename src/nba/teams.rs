//! Static team reference data.
//!
//! Internal ids are alphabetical by city and never change; external ids and
//! abbreviations are versioned with the stats service and the scraped page.

use crate::cli::types::{NbaTeamId, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub nba_id: NbaTeamId,
    /// Abbreviation used by the stats service.
    pub abbreviation: &'static str,
    /// Abbreviation used by the defense-vs-position page, where it differs.
    pub scrape_abbreviation: &'static str,
}

const fn team(id: u8, nba_id: u32, abbreviation: &'static str, scrape: &'static str) -> Team {
    Team {
        id: TeamId(id),
        nba_id: NbaTeamId(nba_id),
        abbreviation,
        scrape_abbreviation: scrape,
    }
}

pub const TEAMS: [Team; 30] = [
    team(1, 1610612737, "ATL", "ATL"),
    team(2, 1610612738, "BOS", "BOS"),
    team(3, 1610612751, "BKN", "BRO"),
    team(4, 1610612766, "CHA", "CHA"),
    team(5, 1610612741, "CHI", "CHI"),
    team(6, 1610612739, "CLE", "CLE"),
    team(7, 1610612742, "DAL", "DAL"),
    team(8, 1610612743, "DEN", "DEN"),
    team(9, 1610612765, "DET", "DET"),
    team(10, 1610612744, "GSW", "GSW"),
    team(11, 1610612745, "HOU", "HOU"),
    team(12, 1610612754, "IND", "IND"),
    team(13, 1610612746, "LAC", "LAC"),
    team(14, 1610612747, "LAL", "LAL"),
    team(15, 1610612763, "MEM", "MEM"),
    team(16, 1610612748, "MIA", "MIA"),
    team(17, 1610612749, "MIL", "MIL"),
    team(18, 1610612750, "MIN", "MIN"),
    team(19, 1610612740, "NOP", "NOP"),
    team(20, 1610612752, "NYK", "NYK"),
    team(21, 1610612760, "OKC", "OKL"),
    team(22, 1610612753, "ORL", "ORL"),
    team(23, 1610612755, "PHI", "PHI"),
    team(24, 1610612756, "PHX", "PHX"),
    team(25, 1610612757, "POR", "POR"),
    team(26, 1610612758, "SAC", "SAC"),
    team(27, 1610612759, "SAS", "SAS"),
    team(28, 1610612761, "TOR", "TOR"),
    team(29, 1610612762, "UTA", "UTA"),
    team(30, 1610612764, "WAS", "WAS"),
];

pub fn by_nba_id(nba_id: NbaTeamId) -> Option<&'static Team> {
    TEAMS.iter().find(|t| t.nba_id == nba_id)
}

/// Look up a team by either abbreviation set, ignoring case and whitespace.
pub fn by_abbreviation(abbr: &str) -> Option<&'static Team> {
    let abbr = abbr.trim();
    if abbr.is_empty() {
        return None;
    }
    TEAMS.iter().find(|t| {
        t.scrape_abbreviation.eq_ignore_ascii_case(abbr) || t.abbreviation.eq_ignore_ascii_case(abbr)
    })
}
