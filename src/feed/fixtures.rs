use std::str::FromStr;

use itertools::Itertools;
use tracing::{debug, warn};

use crate::model::{
    BracketStage, Duel, LeagueRow, Match, Matchday, Projection, StageName, TournamentFormat,
};

/// Group a flat match list by the layout of `format`.
pub fn project_fixtures(matches: &[Match], format: TournamentFormat) -> Projection {
    match format {
        TournamentFormat::League => Projection::League(project_league(matches)),
        TournamentFormat::Elimination => Projection::Elimination(project_elimination(matches)),
    }
}

/// Like [`project_fixtures`], taking the format as its wire name.
///
/// An unknown name yields [`Projection::Unsupported`] so callers can render an
/// empty state.
pub fn project_fixtures_by_name(matches: &[Match], format: &str) -> Projection {
    match TournamentFormat::from_str(format) {
        Ok(format) => project_fixtures(matches, format),
        Err(_) => {
            warn!(format, "unknown tournament format, nothing to project");
            Projection::Unsupported
        }
    }
}

/// Matchdays in ascending round order.
pub fn project_league(matches: &[Match]) -> Vec<Matchday> {
    let matchdays = group_by_round(matches)
        .into_iter()
        .map(|(round, matches)| Matchday {
            round,
            matches: matches.into_iter().map(league_row).collect(),
        })
        .collect_vec();
    debug!(rounds = matchdays.len(), "projected league schedule");
    matchdays
}

/// Bracket stages in ascending round order, named by their match count.
pub fn project_elimination(matches: &[Match]) -> Vec<BracketStage> {
    let stages = group_by_round(matches)
        .into_iter()
        .map(|(round, matches)| BracketStage {
            round,
            name: StageName::from_match_count(matches.len()),
            duels: matches.into_iter().map(duel).collect(),
        })
        .collect_vec();
    debug!(stages = stages.len(), "projected elimination bracket");
    stages
}

/// Rounds sorted numerically; matches keep input order within a round.
fn group_by_round(matches: &[Match]) -> Vec<(u32, Vec<&Match>)> {
    matches
        .iter()
        .filter_map(|m| match m.round {
            Some(round) if round > 0 => Some((round, m)),
            _ => {
                warn!(match_id = %m.id, round = ?m.round, "skipping match without a valid round");
                None
            }
        })
        .into_group_map()
        .into_iter()
        .sorted_by_key(|(round, _)| *round)
        .collect()
}

fn league_row(m: &Match) -> LeagueRow {
    LeagueRow {
        id: m.id.clone(),
        home: m.home_team.clone(),
        away: m.away_team.clone(),
        home_score: m.home_score,
        away_score: m.away_score,
        finished: m.is_finished(),
    }
}

fn duel(m: &Match) -> Duel {
    Duel {
        id: m.id.clone(),
        home: m.home_team.clone(),
        away: m.away_team.clone(),
        home_score: m.home_score,
        away_score: m.away_score,
        winner: winner_name(m),
        finished: m.is_finished(),
    }
}

fn winner_name(m: &Match) -> Option<String> {
    let winner = m.winner.as_ref()?;
    if !winner.name.is_empty() {
        return Some(winner.name.clone());
    }
    [&m.home_team, &m.away_team]
        .into_iter()
        .flatten()
        .find(|side| side.id == winner.id)
        .map(|side| side.name.clone())
        .filter(|name| !name.is_empty())
}
