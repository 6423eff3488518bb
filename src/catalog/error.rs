use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("TLE directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Invalid TLE format in {source_name}: {message}")]
    InvalidTle {
        source_name: String,
        message: String,
    },
    #[error("Search query required")]
    EmptyQuery,
    #[error("No TLE folder configured")]
    NoTleFolder,
    #[error("No satellites found in {0}")]
    NoSatellites(String),
}
