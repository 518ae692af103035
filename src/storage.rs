use crate::errors::SourceError;
use crate::models::{Player, RawPitchRecord};
use crate::source::PitchSource;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

/// On-disk stand-in for the upstream feed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PitchData {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub pitches: Vec<RawPitchRecord>,
}

pub async fn load_data(path: &Path) -> PitchData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<PitchData>(&bytes) {
            Ok(data) => {
                info!(
                    players = data.players.len(),
                    pitches = data.pitches.len(),
                    "loaded pitch data from {}",
                    path.display()
                );
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                PitchData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => PitchData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            PitchData::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileSource {
    data: PitchData,
}

impl FileSource {
    pub fn new(data: PitchData) -> Self {
        Self { data }
    }

    pub async fn open(path: &Path) -> Self {
        Self::new(load_data(path).await)
    }
}

fn same_pitcher(record: &RawPitchRecord, pitcher_id: &str) -> bool {
    let by_id = match &record.pitcher_id {
        Some(Value::String(id)) => id == pitcher_id,
        Some(Value::Number(id)) => id.to_string() == pitcher_id,
        _ => false,
    };
    by_id || record.pitcher.as_deref() == Some(pitcher_id)
}

#[async_trait]
impl PitchSource for FileSource {
    async fn players(&self) -> Result<Vec<Player>, SourceError> {
        Ok(self.data.players.clone())
    }

    async fn history(&self, pitcher_id: &str) -> Result<Vec<RawPitchRecord>, SourceError> {
        Ok(self
            .data
            .pitches
            .iter()
            .filter(|record| same_pitcher(record, pitcher_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> PitchData {
        serde_json::from_value(json!({
            "players": [{ "id": 7, "name": "Ngata" }, { "id": "8", "name": "Ortiz" }],
            "pitches": [
                { "game_date": "2024-05-01", "EffectiveVelo": 90.1, "Pitcher": "Ngata", "PitcherId": 7, "PitchCall": "BallCalled" },
                { "game_date": "2024-05-01", "EffectiveVelo": 85.0, "Pitcher": "Ortiz", "PitcherId": "8", "PitchCall": "InPlay" },
                { "game_date": "2024-05-02", "EffectiveVelo": 91.0, "Pitcher": "Ngata", "PitchCall": "StrikeCalled" }
            ]
        }))
        .expect("fixture")
    }

    #[tokio::test]
    async fn history_filters_by_id_or_name() {
        let source = FileSource::new(data());
        assert_eq!(source.history("7").await.unwrap().len(), 1);
        assert_eq!(source.history("Ngata").await.unwrap().len(), 2);
        assert_eq!(source.history("8").await.unwrap().len(), 1);
        assert!(source.history("99").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn players_accept_numeric_ids() {
        let players = FileSource::new(data()).players().await.unwrap();
        assert_eq!(players[0].id, "7");
        assert_eq!(players[1].name, "Ortiz");
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let path = std::env::temp_dir().join("pitch_trends_missing_file.json");
        let data = load_data(&path).await;
        assert!(data.players.is_empty());
        assert!(data.pitches.is_empty());
    }
}
