use std::fmt;

use serde::{Serialize, Serializer};

use crate::model::TeamRef;

/// Fixtures grouped for display, shaped by tournament format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "format", content = "groups", rename_all = "lowercase")]
pub enum Projection {
    League(Vec<Matchday>),
    Elimination(Vec<BracketStage>),
    /// The tournament format is not one we know how to lay out.
    Unsupported,
}

impl Projection {
    /// Number of matches across every group.
    pub fn match_count(&self) -> usize {
        match self {
            Projection::League(days) => days.iter().map(|d| d.matches.len()).sum(),
            Projection::Elimination(stages) => stages.iter().map(|s| s.duels.len()).sum(),
            Projection::Unsupported => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.match_count() == 0
    }
}

/// All league matches sharing a round number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matchday {
    pub round: u32,
    pub matches: Vec<LeagueRow>,
}

/// A league match row. `None` scores and teams are unresolved, never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueRow {
    pub id: String,
    pub home: Option<TeamRef>,
    pub away: Option<TeamRef>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub finished: bool,
}

/// One elimination round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketStage {
    pub round: u32,
    pub name: StageName,
    pub duels: Vec<Duel>,
}

/// An elimination match between two sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Duel {
    pub id: String,
    pub home: Option<TeamRef>,
    pub away: Option<TeamRef>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    /// Display name of the winning side, once known.
    pub winner: Option<String>,
    pub finished: bool,
}

/// Human-readable name of a bracket stage, bucketed by match count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageName {
    RoundOf512,
    RoundOf256,
    RoundOf128,
    RoundOf64,
    RoundOf16,
    Quarterfinals,
    Semifinals,
    Final,
    /// No named bucket; carries the literal match count.
    Round(usize),
}

impl StageName {
    /// Thresholds are checked from the largest down, so 300 matches is a round of 512.
    pub fn from_match_count(count: usize) -> Self {
        match count {
            n if n >= 256 => StageName::RoundOf512,
            n if n >= 128 => StageName::RoundOf256,
            n if n >= 64 => StageName::RoundOf128,
            n if n >= 32 => StageName::RoundOf64,
            n if n >= 16 => StageName::RoundOf16,
            4 => StageName::Quarterfinals,
            2 => StageName::Semifinals,
            1 => StageName::Final,
            n => StageName::Round(n),
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageName::RoundOf512 => f.write_str("round of 512"),
            StageName::RoundOf256 => f.write_str("round of 256"),
            StageName::RoundOf128 => f.write_str("round of 128"),
            StageName::RoundOf64 => f.write_str("round of 64"),
            StageName::RoundOf16 => f.write_str("round of 16"),
            StageName::Quarterfinals => f.write_str("quarterfinals"),
            StageName::Semifinals => f.write_str("semifinals"),
            StageName::Final => f.write_str("final"),
            StageName::Round(n) => write!(f, "round of {n} teams"),
        }
    }
}

impl Serialize for StageName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
