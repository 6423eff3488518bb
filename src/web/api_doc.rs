use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::iss::{IssPositionResponse, SatelliteRef};
use super::api::satellites::{MessageResponse, SatellitesResponse, SearchResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::satellites::list_satellites,
        super::api::satellites::search_satellites,
        super::api::satellites::satellite_passes,
        super::api::satellites::update_tle,
        super::api::iss::iss_position,
    ),
    components(
        schemas(
            SatellitesResponse,
            SearchResponse,
            MessageResponse,
            IssPositionResponse,
            SatelliteRef,
            ErrorResponse,
            crate::catalog::Satellite,
            crate::predict::PositionFix,
        )
    ),
    info(
        title = "Sat Tracker API",
        description = "Satellite catalog and live ISS position",
        version = "0.1.0"
    ),
    tags(
        (name = "satellites", description = "Satellite catalog"),
        (name = "iss", description = "Live ISS position")
    )
)]
pub struct ApiDoc;
