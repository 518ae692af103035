use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/pitches.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Http(String),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub source: SourceConfig,
    pub strike_chart: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let source = match lookup("PITCH_API_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => SourceConfig::Http(url),
            None => SourceConfig::File(PathBuf::from(
                lookup("PITCH_DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()),
            )),
        };

        let strike_chart = lookup("PITCH_STRIKE_CHART")
            .map(|value| !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off"))
            .unwrap_or(true);

        Self {
            port,
            source,
            strike_chart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.source, SourceConfig::File(PathBuf::from("data/pitches.json")));
        assert!(config.strike_chart);
    }

    #[test]
    fn api_url_wins_over_data_path() {
        let config = config(&[
            ("PITCH_API_URL", "http://stats.local"),
            ("PITCH_DATA_PATH", "/tmp/x.json"),
            ("PORT", "9000"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.source, SourceConfig::Http("http://stats.local".to_string()));
    }

    #[test]
    fn strike_chart_can_be_disabled() {
        assert!(!config(&[("PITCH_STRIKE_CHART", "false")]).strike_chart);
        assert!(!config(&[("PITCH_STRIKE_CHART", "0")]).strike_chart);
        assert!(config(&[("PITCH_STRIKE_CHART", "yes")]).strike_chart);
    }

    #[test]
    fn bad_port_falls_back() {
        assert_eq!(config(&[("PORT", "http")]).port, 8080);
    }
}
