use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackingError {
    #[error("no satellite selected")]
    NoSelection,
    #[error("live tracking is currently only available for the ISS (selected: {0})")]
    NotTrackable(String),
}
