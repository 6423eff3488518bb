use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::predict::PositionSource;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<RwLock<Catalog>>,
    pub positions: Arc<PositionSource>,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog, positions: PositionSource) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(RwLock::new(catalog)),
            positions: Arc::new(positions),
        }
    }
}
