use std::cmp::Reverse;
use std::collections::HashMap;

use itertools::Itertools;
use tracing::debug;

use crate::model::{Match, PointsRule, StandingRow, TeamRef};

/// Build a league table from finished matches.
///
/// Only matches that are finished and have both teams and both scores count.
/// Rows are ordered by points, goal difference and goals scored, then by name
/// and id. Totals saturate rather than overflow.
pub fn compute_standings(matches: &[Match], rule: PointsRule) -> Vec<StandingRow> {
    let mut rows: HashMap<&str, StandingRow> = HashMap::new();
    let mut counted = 0usize;

    for m in matches.iter().filter(|m| m.is_finished()) {
        let (Some(home), Some(away), Some(home_score), Some(away_score)) =
            (&m.home_team, &m.away_team, m.home_score, m.away_score)
        else {
            debug!(match_id = %m.id, "finished match is missing a side or score");
            continue;
        };
        record(&mut rows, home, home_score, away_score, rule);
        record(&mut rows, away, away_score, home_score, rule);
        counted += 1;
    }

    debug!(teams = rows.len(), matches = counted, "computed standings");
    rows.into_values()
        .sorted_by(|a, b| {
            (Reverse(a.points), Reverse(a.goal_difference()), Reverse(a.goals_for))
                .cmp(&(Reverse(b.points), Reverse(b.goal_difference()), Reverse(b.goals_for)))
                .then_with(|| a.team.name.cmp(&b.team.name))
                .then_with(|| a.team.id.cmp(&b.team.id))
        })
        .collect()
}

fn record<'a>(
    rows: &mut HashMap<&'a str, StandingRow>,
    team: &'a TeamRef,
    scored: u32,
    conceded: u32,
    rule: PointsRule,
) {
    let row = rows
        .entry(team.id.as_str())
        .or_insert_with(|| StandingRow::new(team.clone()));
    row.played = row.played.saturating_add(1);
    row.goals_for = row.goals_for.saturating_add(scored);
    row.goals_against = row.goals_against.saturating_add(conceded);
    let points = if scored > conceded {
        row.won = row.won.saturating_add(1);
        rule.win
    } else if scored == conceded {
        row.drawn = row.drawn.saturating_add(1);
        rule.draw
    } else {
        row.lost = row.lost.saturating_add(1);
        rule.loss
    };
    row.points = row.points.saturating_add(points);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MatchStatus;

    fn team(id: &str, name: &str) -> TeamRef {
        TeamRef {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn result(id: &str, home: &TeamRef, away: &TeamRef, score: (u32, u32)) -> Match {
        Match {
            id: id.to_string(),
            round: Some(1),
            home_team: Some(home.clone()),
            away_team: Some(away.clone()),
            home_score: Some(score.0),
            away_score: Some(score.1),
            winner: None,
            status: MatchStatus::Finished,
        }
    }

    #[test]
    fn test_empty() {
        assert!(compute_standings(&[], PointsRule::default()).is_empty());
    }

    #[test]
    fn test_table_order_and_totals() {
        let lions = team("1", "Lions");
        let tigers = team("2", "Tigers");
        let bears = team("3", "Bears");
        let matches = vec![
            result("m1", &lions, &tigers, (2, 0)),
            result("m2", &tigers, &bears, (1, 1)),
            result("m3", &bears, &lions, (0, 3)),
        ];
        let table = compute_standings(&matches, PointsRule::default());
        let names: Vec<&str> = table.iter().map(|r| r.team.name.as_str()).collect();
        assert_eq!(names, ["Lions", "Tigers", "Bears"]);

        let lions_row = &table[0];
        assert_eq!(lions_row.played, 2);
        assert_eq!(lions_row.won, 2);
        assert_eq!(lions_row.points, 6);
        assert_eq!(lions_row.goal_difference(), 5);
        assert_eq!(table[1].points, 1);
        assert_eq!(table[1].goal_difference(), -2);
        assert_eq!(table[2].goal_difference(), -3);
    }

    #[test]
    fn test_unfinished_and_incomplete_are_ignored() {
        let lions = team("1", "Lions");
        let tigers = team("2", "Tigers");
        let mut pending = result("m1", &lions, &tigers, (1, 0));
        pending.status = MatchStatus::Pending;
        let mut no_score = result("m2", &lions, &tigers, (1, 0));
        no_score.away_score = None;
        let mut bye = result("m3", &lions, &tigers, (1, 0));
        bye.away_team = None;

        assert!(compute_standings(&[pending, no_score, bye], PointsRule::default()).is_empty());
    }

    #[test]
    fn test_custom_points_and_name_tiebreak() {
        let alpha = team("a", "Alpha");
        let beta = team("b", "Beta");
        let rule = PointsRule {
            win: 2,
            draw: 1,
            loss: 0,
        };
        let table = compute_standings(&[result("m1", &beta, &alpha, (2, 2))], rule);
        let names: Vec<&str> = table.iter().map(|r| r.team.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Beta"]);
        assert!(table.iter().all(|r| r.points == 1 && r.drawn == 1));
    }

    #[test]
    fn test_huge_scores_saturate() {
        let lions = team("1", "Lions");
        let tigers = team("2", "Tigers");
        let matches = vec![
            result("m1", &lions, &tigers, (u32::MAX - 1, 0)),
            result("m2", &lions, &tigers, (5, 0)),
        ];
        let rule = PointsRule {
            win: u32::MAX,
            draw: 1,
            loss: 0,
        };
        let table = compute_standings(&matches, rule);
        assert_eq!(table[0].team.name, "Lions");
        assert_eq!(table[0].goals_for, u32::MAX);
        assert_eq!(table[0].points, u32::MAX);
        assert_eq!(table[1].goals_against, u32::MAX);
    }

    #[test]
    fn test_same_name_orders_by_id() {
        let first = team("a", "United");
        let second = team("b", "United");
        for matches in [
            vec![result("m1", &first, &second, (1, 1))],
            vec![result("m1", &second, &first, (1, 1))],
        ] {
            let table = compute_standings(&matches, PointsRule::default());
            let ids: Vec<&str> = table.iter().map(|r| r.team.id.as_str()).collect();
            assert_eq!(ids, ["a", "b"]);
        }
    }
}
