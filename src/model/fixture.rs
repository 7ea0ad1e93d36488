use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::EnumString;

/// How a tournament schedules its matches.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TournamentFormat {
    League,
    Elimination,
}

/// Tournament summary as returned by the tournaments API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    /// Kept as the raw wire string so unknown formats degrade instead of failing to parse.
    pub format: String,
}

/// A team slot reference on a match.
///
/// The API sends either a populated team or, before population, its bare id.
/// A bare id leaves `name` empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TeamRefWire")]
pub struct TeamRef {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TeamRefWire {
    Team {
        #[serde(alias = "_id")]
        id: String,
        #[serde(default)]
        name: String,
    },
    Id(String),
}

impl From<TeamRefWire> for TeamRef {
    fn from(wire: TeamRefWire) -> Self {
        match wire {
            TeamRefWire::Team { id, name } => TeamRef { id, name },
            TeamRefWire::Id(id) => TeamRef {
                id,
                name: String::new(),
            },
        }
    }
}

/// A scheduled match as returned by the tournament matches API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    #[serde(alias = "_id")]
    pub id: String,
    /// 1-based round number. `None` when absent or not a positive integer on the wire.
    #[serde(default, deserialize_with = "lenient_round")]
    pub round: Option<u32>,
    #[serde(default)]
    pub home_team: Option<TeamRef>,
    #[serde(default)]
    pub away_team: Option<TeamRef>,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub winner: Option<TeamRef>,
    #[serde(default)]
    pub status: MatchStatus,
}

impl Match {
    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }
}

/// Anything but a positive integer becomes `None`, so one broken record does
/// not reject the whole match list.
fn lenient_round<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_u64)
        .and_then(|round| u32::try_from(round).ok())
        .filter(|round| *round > 0))
}

/// Completion state of a match.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Pending,
    Finished,
}
