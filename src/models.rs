use serde::{Deserialize, Serialize};

/// One pitch as delivered by the history feed. Field names follow the feed;
/// every field may be missing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawPitchRecord {
    #[serde(default)]
    pub game_date: Option<String>,
    #[serde(default, rename = "EffectiveVelo")]
    pub effective_velo: Option<serde_json::Value>,
    #[serde(default, rename = "Pitcher")]
    pub pitcher: Option<String>,
    #[serde(default, rename = "PitcherId", alias = "pitcher_id")]
    pub pitcher_id: Option<serde_json::Value>,
    #[serde(default, rename = "PitchCall")]
    pub pitch_call: Option<String>,
}

/// Canonical pitch event. Values are carried over unvalidated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PitchEvent {
    pub date: Option<String>,
    pub velocity: Option<f64>,
    pub pitcher_id: Option<String>,
    pub pitcher_name: Option<String>,
    pub call: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    #[serde(deserialize_with = "crate::normalize::id_string")]
    pub id: String,
    pub name: String,
}

impl Player {
    /// Unselected entry shown first in the pitcher picker.
    pub fn placeholder() -> Self {
        Self {
            id: String::new(),
            name: "Select a pitcher".to_string(),
        }
    }
}

pub fn with_placeholder(players: Vec<Player>) -> Vec<Player> {
    let mut list = Vec::with_capacity(players.len() + 1);
    list.push(Player::placeholder());
    list.extend(players);
    list
}

/// Chart-ready output: index aligned, labels ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AggregatedSeries {
    pub labels: Vec<String>,
    pub velo: Vec<f64>,
    pub strikes: Vec<f64>,
}

impl AggregatedSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    #[serde(default)]
    pub player: String,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub pitcher: String,
}
