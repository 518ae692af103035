use crate::errors::SourceError;
use crate::models::{Player, RawPitchRecord};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Player list and per-pitcher history collaborators.
#[async_trait]
pub trait PitchSource: Send + Sync {
    async fn players(&self) -> Result<Vec<Player>, SourceError>;
    async fn history(&self, pitcher_id: &str) -> Result<Vec<RawPitchRecord>, SourceError>;
}

/// Upstream JSON API exposing `/api/players` and `/api/stats/history`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let mut base = Url::parse(base_url).map_err(|err| SourceError::Url(err.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client: Client::new(),
            base,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, SourceError> {
        self.base
            .join(path)
            .map_err(|err| SourceError::Url(err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "source request rejected");
            return Err(SourceError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl PitchSource for HttpSource {
    async fn players(&self) -> Result<Vec<Player>, SourceError> {
        let url = self.endpoint("api/players")?;
        self.get_json(url).await
    }

    async fn history(&self, pitcher_id: &str) -> Result<Vec<RawPitchRecord>, SourceError> {
        let mut url = self.endpoint("api/stats/history")?;
        url.query_pairs_mut().append_pair("player", pitcher_id);
        self.get_json(url).await
    }
}
