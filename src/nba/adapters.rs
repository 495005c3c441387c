//! Source adapters: one paced, retried fetch per stats domain, returning
//! parsed rows.

use crate::cli::types::Season;
use crate::core::{with_retries, Pacer, RetryPolicy};
use crate::nba::http::{MeasureType, StatsApi};
use crate::nba::teams::Team;
use crate::nba::types::{
    parse_averages, parse_roster, parse_scoreboard, parse_usage, AveragesRow, RosterEntry,
    Scoreboard, UsageRow,
};
use crate::Result;
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{debug, info};

/// Pacing, retry and timeout for one kind of remote call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchOptions {
    pub retry: RetryPolicy,
    pub pacer: Pacer,
    pub timeout: Duration,
}

impl FetchOptions {
    /// Whole-league stat pulls.
    pub const LEAGUE: FetchOptions = FetchOptions {
        retry: RetryPolicy::LEAGUE,
        pacer: Pacer::REQUEST,
        timeout: Duration::from_secs(90),
    };

    /// Per-team roster pulls.
    pub const ROSTER: FetchOptions = FetchOptions {
        retry: RetryPolicy::ROSTER,
        pacer: Pacer::REQUEST,
        timeout: Duration::from_secs(60),
    };

    /// Scoreboard for one date.
    pub const SCOREBOARD: FetchOptions = FetchOptions {
        retry: RetryPolicy::LEAGUE,
        pacer: Pacer::REQUEST,
        timeout: Duration::from_secs(60),
    };
}

pub async fn fetch_league_usage(
    api: &dyn StatsApi,
    season: Season,
    opts: &FetchOptions,
) -> Result<Vec<UsageRow>> {
    info!("Fetching LeagueDashPlayerStats (Usage) for {}", season);
    let opts = *opts;
    let resp = with_retries(&opts.retry, "league usage stats", || async move {
        opts.pacer.pause().await;
        api.league_player_stats(season, MeasureType::Usage, opts.timeout)
            .await
    })
    .await?;

    let rows = parse_usage(resp.result_set("LeagueDashPlayerStats", 0)?)?;
    debug!("Parsed {} usage rows", rows.len());
    Ok(rows)
}

pub async fn fetch_league_averages(
    api: &dyn StatsApi,
    season: Season,
    opts: &FetchOptions,
) -> Result<Vec<AveragesRow>> {
    info!("Fetching LeagueDashPlayerStats (PerGame/Base) for {}", season);
    let opts = *opts;
    let resp = with_retries(&opts.retry, "league averages", || async move {
        opts.pacer.pause().await;
        api.league_player_stats(season, MeasureType::Base, opts.timeout)
            .await
    })
    .await?;

    let rows = parse_averages(resp.result_set("LeagueDashPlayerStats", 0)?)?;
    debug!("Parsed {} averages rows", rows.len());
    Ok(rows)
}

pub async fn fetch_team_roster(
    api: &dyn StatsApi,
    team: &Team,
    season: Season,
    opts: &FetchOptions,
) -> Result<Vec<RosterEntry>> {
    let opts = *opts;
    let nba_id = team.nba_id;
    let what = format!("roster for team {}", nba_id);
    let resp = with_retries(&opts.retry, &what, || async move {
        opts.pacer.pause().await;
        api.team_roster(nba_id, season, opts.timeout).await
    })
    .await?;

    parse_roster(resp.result_set("CommonTeamRoster", 0)?)
}

pub async fn fetch_scoreboard(
    api: &dyn StatsApi,
    date: NaiveDate,
    opts: &FetchOptions,
) -> Result<Scoreboard> {
    info!("Fetching games for {}", date);
    let opts = *opts;
    let resp = with_retries(&opts.retry, "scoreboard", || async move {
        opts.pacer.pause().await;
        api.scoreboard(date, opts.timeout).await
    })
    .await?;

    parse_scoreboard(&resp)
}
