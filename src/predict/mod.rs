mod error;
mod ground_station;
mod propagation;
mod source;
mod types;

pub use error::PredictError;
pub use ground_station::GroundStation;
pub use source::{PositionSource, PositionSourceKind, OPEN_NOTIFY_URL};
pub use types::PositionFix;
