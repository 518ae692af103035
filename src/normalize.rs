use crate::models::{PitchEvent, RawPitchRecord};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn normalize(raw: RawPitchRecord) -> PitchEvent {
    PitchEvent {
        date: raw.game_date,
        velocity: raw.effective_velo.as_ref().and_then(velocity_value),
        pitcher_id: raw.pitcher_id.as_ref().and_then(id_value),
        pitcher_name: raw.pitcher,
        call: raw.pitch_call,
    }
}

pub fn normalize_all(rows: Vec<RawPitchRecord>) -> Vec<PitchEvent> {
    rows.into_iter().map(normalize).collect()
}

// Non-numeric text becomes NaN so the aggregator drops it, not the normalizer.
fn velocity_value(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(number) => number.as_f64(),
        Value::String(text) => Some(text.trim().parse::<f64>().unwrap_or(f64::NAN)),
        _ => Some(f64::NAN),
    }
}

fn id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Accepts ids sent either as JSON strings or numbers.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_value(&value).ok_or_else(|| serde::de::Error::custom("id must be a string or number"))
}
