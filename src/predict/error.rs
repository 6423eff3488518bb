use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Satellite {0} is not in the catalog")]
    NotInCatalog(u32),
    #[error("Satellite {0} has no usable orbital elements")]
    NoElements(u32),
    #[error("Orbital elements for satellite {norad_id} are {age_days} days old, update the TLE folder")]
    StaleElements { norad_id: u32, age_days: i64 },
    #[error("Propagation error: {0}")]
    Propagation(String),
    #[error("Open Notify request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Open Notify API error: {0}")]
    Upstream(String),
}
