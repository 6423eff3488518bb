use std::future::Future;

use reqwest::Url;

use super::error::{ClientError, Result};
use super::types::{Position, PositionEnvelope, Satellite, SatellitesEnvelope};

pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api/";

/// The two calls the tracking view makes against the backend.
pub trait TrackerApi: Send + Sync + 'static {
    fn satellites(&self) -> impl Future<Output = Result<Vec<Satellite>>> + Send;

    fn iss_position(&self) -> impl Future<Output = Result<Position>> + Send;
}

/// HTTP client for the tracker API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base: Url,
    web: reqwest::Client,
}

impl ApiClient {
    pub fn new(base: &str) -> Result<Self> {
        Self::with_http(base, reqwest::Client::new())
    }

    pub fn with_http(base: &str, web: reqwest::Client) -> Result<Self> {
        let mut base = Url::parse(base)?;
        // Url::join drops the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Ok(Self { base, web })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// GETs `path` relative to the base. Error statuses still carry a JSON
    /// envelope, so the body is decoded regardless of the status code.
    async fn get_json<T: for<'a> serde::Deserialize<'a>>(&self, path: &str) -> Result<T> {
        let url = self.base.join(path)?;
        log::debug!("GET {}", url);
        let response = self.web.get(url).send().await?;
        Ok(response.json().await?)
    }
}

impl TrackerApi for ApiClient {
    async fn satellites(&self) -> Result<Vec<Satellite>> {
        let envelope: SatellitesEnvelope = self.get_json("satellites").await?;
        if !envelope.success {
            return Err(unsuccessful(envelope.error));
        }
        Ok(envelope.satellites)
    }

    async fn iss_position(&self) -> Result<Position> {
        let envelope: PositionEnvelope = self.get_json("iss/position").await?;
        match (envelope.success, envelope.position) {
            (true, Some(position)) => Ok(position),
            (true, None) => Err(ClientError::Unsuccessful("response has no position".into())),
            (false, _) => Err(unsuccessful(envelope.error)),
        }
    }
}

fn unsuccessful(error: Option<String>) -> ClientError {
    ClientError::Unsuccessful(error.unwrap_or_else(|| "unknown error".to_string()))
}
