use crate::models::{AggregatedSeries, PitchEvent};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::BTreeMap;

/// Velocities at or below this bound are sensor noise.
pub const MIN_VELOCITY_MPH: f64 = 0.0;
/// Velocities at or above this bound are sensor noise.
pub const MAX_VELOCITY_MPH: f64 = 150.0;

/// Pitch calls counted as strikes for the strike percentage.
pub const STRIKE_CALLS: [&str; 6] = [
    "StrikeCalled",
    "StrikeSwinging",
    "FoulBall",
    "FoulBallNotFieldable",
    "FoulBallFieldable",
    "InPlay",
];

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DailyStat {
    pub velocity_sum: f64,
    pub velocity_count: u64,
    pub strike_count: u64,
    pub total_pitches: u64,
}

impl DailyStat {
    fn record(&mut self, velocity: f64, strike: bool) {
        self.velocity_sum += velocity;
        self.velocity_count += 1;
        self.total_pitches += 1;
        if strike {
            self.strike_count += 1;
        }
    }

    pub fn average_velocity(&self) -> f64 {
        round1(self.velocity_sum / self.velocity_count as f64)
    }

    pub fn strike_percentage(&self) -> f64 {
        round1(self.strike_count as f64 / self.total_pitches as f64 * 100.0)
    }
}

pub fn is_strike(call: Option<&str>) -> bool {
    call.is_some_and(|call| STRIKE_CALLS.contains(&call))
}

pub fn is_plausible_velocity(velocity: f64) -> bool {
    velocity.is_finite() && velocity > MIN_VELOCITY_MPH && velocity < MAX_VELOCITY_MPH
}

/// Calendar day of a game date string.
///
/// Timestamps carrying an offset are moved to UTC first; naive values keep
/// the day they were written with. No local timezone is involved.
pub fn parse_game_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc).date_naive());
    }
    if let Ok(instant) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(instant.with_timezone(&Utc).date_naive());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(moment) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(moment.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Per-day accumulators for the events that pass the inclusion rule.
pub fn daily_stats<'a, I>(events: I) -> BTreeMap<NaiveDate, DailyStat>
where
    I: IntoIterator<Item = &'a PitchEvent>,
{
    let mut days: BTreeMap<NaiveDate, DailyStat> = BTreeMap::new();
    for event in events {
        let Some(velocity) = event.velocity.filter(|v| is_plausible_velocity(*v)) else {
            continue;
        };
        let Some(day) = event.date.as_deref().and_then(parse_game_day) else {
            continue;
        };
        days.entry(day)
            .or_default()
            .record(velocity, is_strike(event.call.as_deref()));
    }
    days
}

pub fn aggregate<'a, I>(events: I) -> AggregatedSeries
where
    I: IntoIterator<Item = &'a PitchEvent>,
{
    let days = daily_stats(events);
    let mut series = AggregatedSeries {
        labels: Vec::with_capacity(days.len()),
        velo: Vec::with_capacity(days.len()),
        strikes: Vec::with_capacity(days.len()),
    };
    for (day, stat) in &days {
        series.labels.push(date_key(*day));
        series.velo.push(stat.average_velocity());
        series.strikes.push(stat.strike_percentage());
    }
    series
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// One decimal place, half away from zero on the exact binary value.
///
/// Scaling by ten first would round the product and push values such as
/// 94.05 (stored just below the half) up to 94.1.
fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let exact = format!("{:.60}", value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), "0"));
    let mut digits = fraction.bytes().map(|b| u64::from(b - b'0'));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);

    let Some(scaled) = whole
        .parse::<u64>()
        .ok()
        .and_then(|whole| whole.checked_mul(10))
        .and_then(|whole| whole.checked_add(tenths + u64::from(hundredths >= 5)))
    else {
        return value;
    };
    (scaled as f64 / 10.0).copysign(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(date: &str, velocity: f64, call: &str) -> PitchEvent {
        PitchEvent {
            date: Some(date.to_string()),
            velocity: Some(velocity),
            pitcher_id: Some("1".to_string()),
            pitcher_name: Some("Ace".to_string()),
            call: Some(call.to_string()),
        }
    }

    #[test]
    fn averages_and_strike_rate_for_one_day() {
        let events = vec![
            pitch("2024-05-01", 95.0, "StrikeCalled"),
            pitch("2024-05-01", 93.0, "BallCalled"),
        ];
        let series = aggregate(&events);
        assert_eq!(series.labels, vec!["2024-05-01"]);
        assert_eq!(series.velo, vec![94.0]);
        assert_eq!(series.strikes, vec![50.0]);
    }

    #[test]
    fn out_of_bounds_velocity_contributes_to_no_day() {
        let events = vec![
            pitch("2024-05-01", 200.0, "StrikeCalled"),
            pitch("2024-05-02", 90.0, "BallCalled"),
        ];
        let series = aggregate(&events);
        assert_eq!(series.labels, vec!["2024-05-02"]);
        assert_eq!(series.strikes, vec![0.0]);
    }

    #[test]
    fn empty_input_gives_empty_series() {
        let series = aggregate(&Vec::<PitchEvent>::new());
        assert_eq!(series, AggregatedSeries::default());
        assert!(series.is_empty());
    }

    #[test]
    fn two_strikes_are_one_hundred_percent() {
        let events = vec![
            pitch("2024-05-01", 88.0, "FoulBallFieldable"),
            pitch("2024-05-01", 89.0, "InPlay"),
        ];
        let series = aggregate(&events);
        assert_eq!(series.strikes, vec![100.0]);
        assert_eq!(series.velo, vec![88.5]);
    }

    #[test]
    fn velocity_bounds_are_exclusive() {
        assert!(!is_plausible_velocity(MIN_VELOCITY_MPH));
        assert!(!is_plausible_velocity(MAX_VELOCITY_MPH));
        assert!(!is_plausible_velocity(f64::NAN));
        assert!(!is_plausible_velocity(f64::INFINITY));
        assert!(is_plausible_velocity(0.1));
        assert!(is_plausible_velocity(149.9));
    }

    #[test]
    fn invalid_events_change_nothing() {
        let valid = vec![
            pitch("2024-05-01", 95.0, "StrikeCalled"),
            pitch("2024-05-03", 91.0, "BallCalled"),
        ];
        let mut noisy = valid.clone();
        noisy.push(pitch("2024-05-01", 0.0, "BallCalled"));
        noisy.push(pitch("2024-05-01", 150.0, "BallCalled"));
        noisy.push(pitch("2024-05-03", f64::NAN, "StrikeCalled"));
        noisy.push(pitch("garbage", 90.0, "StrikeCalled"));
        noisy.push(PitchEvent {
            velocity: Some(92.0),
            ..PitchEvent::default()
        });
        noisy.push(PitchEvent {
            date: Some("2024-05-01".to_string()),
            ..PitchEvent::default()
        });

        assert_eq!(aggregate(&noisy), aggregate(&valid));
    }

    #[test]
    fn labels_are_chronological_not_insertion_order() {
        let events = vec![
            pitch("2024-06-10", 90.0, "BallCalled"),
            pitch("2024-05-31", 91.0, "BallCalled"),
            pitch("2023-12-01", 92.0, "BallCalled"),
            pitch("2024-06-02", 93.0, "BallCalled"),
        ];
        let series = aggregate(&events);
        assert_eq!(
            series.labels,
            vec!["2023-12-01", "2024-05-31", "2024-06-02", "2024-06-10"]
        );
        assert_eq!(series.velo, vec![92.0, 91.0, 93.0, 90.0]);
        assert_eq!(series.labels.len(), series.velo.len());
        assert_eq!(series.labels.len(), series.strikes.len());
    }

    #[test]
    fn aggregate_is_repeatable() {
        let events = vec![
            pitch("2024-05-01", 95.3, "StrikeSwinging"),
            pitch("2024-05-01", 93.1, "BallCalled"),
            pitch("2024-05-02", 94.7, "FoulBall"),
        ];
        assert_eq!(aggregate(&events), aggregate(&events));
    }

    #[test]
    fn rounds_to_one_decimal() {
        let events = vec![
            pitch("2024-05-01", 90.0, "StrikeCalled"),
            pitch("2024-05-01", 91.0, "BallCalled"),
            pitch("2024-05-01", 91.0, "BallCalled"),
        ];
        let series = aggregate(&events);
        assert_eq!(series.velo, vec![90.7]);
        assert_eq!(series.strikes, vec![33.3]);
    }

    #[test]
    fn rounding_follows_the_stored_value() {
        // 94.05 is stored as 94.04999...
        assert_eq!(round1(94.05), 94.0);
        assert_eq!(round1(94.25), 94.3);
        assert_eq!(round1(6.25), 6.3);
        assert_eq!(round1(90.666_666), 90.7);
        assert_eq!(round1(99.96), 100.0);
        assert_eq!(round1(0.0), 0.0);

        let series = aggregate(&vec![pitch("2024-05-01", 94.05, "BallCalled")]);
        assert_eq!(series.velo, vec![94.0]);
    }

    #[test]
    fn minute_precision_timestamps_count() {
        let may_first = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(parse_game_day("2024-05-01T19:05"), Some(may_first));
        assert_eq!(parse_game_day("2024-05-01 19:05"), Some(may_first));

        let series = aggregate(&vec![pitch("2024-05-01T19:05", 94.0, "StrikeCalled")]);
        assert_eq!(series.labels, vec!["2024-05-01"]);
    }

    #[test]
    fn game_day_formats() {
        let may_first = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(parse_game_day("2024-05-01"), Some(may_first));
        assert_eq!(parse_game_day("2024-05-01T19:05:00"), Some(may_first));
        assert_eq!(parse_game_day("2024-05-01 19:05:00.250"), Some(may_first));
        assert_eq!(parse_game_day("2024-05-01T12:00:00Z"), Some(may_first));
        assert_eq!(parse_game_day("05/01/2024"), Some(may_first));
        // 21:00 at UTC-05:00 is already the next day in UTC.
        assert_eq!(
            parse_game_day("2024-04-30T21:00:00-05:00"),
            Some(may_first)
        );
        assert_eq!(parse_game_day(""), None);
        assert_eq!(parse_game_day("2024-13-01"), None);
    }

    #[test]
    fn unknown_calls_are_not_strikes() {
        assert!(is_strike(Some("StrikeCalled")));
        assert!(is_strike(Some("FoulBallNotFieldable")));
        assert!(!is_strike(Some("BallCalled")));
        assert!(!is_strike(Some("HitByPitch")));
        assert!(!is_strike(Some("strikecalled")));
        assert!(!is_strike(None));
    }
}
