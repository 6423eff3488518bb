mod api;
mod error;
mod types;

pub use api::{ApiClient, TrackerApi, DEFAULT_API_BASE};
pub use error::ClientError;
pub use types::{ObserverLocation, Position, Satellite};
