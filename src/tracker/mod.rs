mod error;
mod filter;
pub mod render;
mod session;

pub use filter::filter_by_name;
pub use session::TrackingSession;
