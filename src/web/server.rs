use axum::{routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::Catalog;
use crate::predict::{GroundStation, PositionSource, PositionSourceKind};

use super::api::iss as iss_handlers;
use super::api::satellites as satellite_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;
use super::ui::handlers as ui_handlers;

pub fn build_state(config: Config) -> AppState {
    let station = config.station().unwrap_or_else(|e| {
        log::warn!("{}, falling back to the default observer", e);
        GroundStation::default()
    });

    let catalog = Catalog::new(config.catalog.tle_folder.clone());

    let positions = match config.position_source() {
        PositionSourceKind::Sgp4 => PositionSource::Sgp4 { station },
        PositionSourceKind::OpenNotify => PositionSource::OpenNotify {
            client: reqwest::Client::new(),
            url: config.position.open_notify_url.clone(),
        },
    };
    log::info!("ISS positions come from {}", positions.kind());

    AppState::new(config, catalog, positions)
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::dashboard))
        // Catalog API endpoints
        .route("/api/satellites", get(satellite_handlers::list_satellites))
        .route(
            "/api/satellites/search",
            get(satellite_handlers::search_satellites),
        )
        .route(
            "/api/satellites/update-tle",
            post(satellite_handlers::update_tle),
        )
        .route(
            "/api/satellites/{id}/passes",
            post(satellite_handlers::satellite_passes),
        )
        // Position API endpoints
        .route("/api/iss/position", get(iss_handlers::iss_position))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let app = router(build_state(config));

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn live_feed_is_the_default_source() {
        let state = build_state(Config::default());
        assert_eq!(state.positions.kind(), PositionSourceKind::OpenNotify);
    }

    #[test]
    fn tle_folder_enables_local_propagation() {
        let mut config = Config::default();
        config.catalog.tle_folder = Some(PathBuf::from("/nonexistent/sat-tracker-tles"));
        let state = build_state(config);
        assert_eq!(state.positions.kind(), PositionSourceKind::Sgp4);
    }
}
