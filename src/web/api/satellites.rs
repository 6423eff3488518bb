use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::Satellite;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct SatellitesResponse {
    pub success: bool,
    pub satellites: Vec<Satellite>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub satellites: Vec<Satellite>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[utoipa::path(
    get,
    path = "/api/satellites",
    tag = "satellites",
    responses(
        (status = 200, description = "Active satellites", body = SatellitesResponse),
        (status = 500, description = "Catalog failure", body = ErrorResponse)
    )
)]
pub async fn list_satellites(State(state): State<AppState>) -> ApiResult<Json<SatellitesResponse>> {
    let catalog = state.catalog.read().await;
    Ok(Json(SatellitesResponse {
        success: true,
        satellites: catalog.active(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/satellites/search",
    tag = "satellites",
    params(
        ("q" = String, Query, description = "Case-insensitive name fragment")
    ),
    responses(
        (status = 200, description = "Matching satellites (at most 20)", body = SearchResponse),
        (status = 400, description = "Missing search query", body = ErrorResponse)
    )
)]
pub async fn search_satellites(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchResponse>> {
    let catalog = state.catalog.read().await;
    let satellites = catalog.search(&query.q)?;

    Ok(Json(SearchResponse {
        success: true,
        query: query.q.trim().to_string(),
        satellites,
    }))
}

#[utoipa::path(
    post,
    path = "/api/satellites/{id}/passes",
    tag = "satellites",
    params(
        ("id" = u32, Path, description = "Catalog id")
    ),
    responses(
        (status = 400, description = "Pass prediction is not available", body = ErrorResponse),
        (status = 404, description = "Unknown satellite", body = ErrorResponse)
    )
)]
pub async fn satellite_passes(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<Json<MessageResponse>> {
    let catalog = state.catalog.read().await;
    if catalog.find_by_id(id).is_none() {
        return Err(ApiError::NotFound("satellite not found"));
    }
    Err(ApiError::Unavailable(
        "pass predictions are not available for this satellite",
    ))
}

#[utoipa::path(
    post,
    path = "/api/satellites/update-tle",
    tag = "satellites",
    responses(
        (status = 200, description = "TLE reload outcome", body = MessageResponse),
        (status = 500, description = "TLE folder could not be read", body = ErrorResponse)
    )
)]
pub async fn update_tle(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    let mut catalog = state.catalog.write().await;
    if !catalog.has_tle_folder() {
        return Ok(Json(MessageResponse {
            success: true,
            message: "TLE updates need catalog.tle_folder to be configured".to_string(),
        }));
    }

    let count = catalog.reload()?;
    log::info!("Reloaded {} satellites from TLE folder", count);

    Ok(Json(MessageResponse {
        success: true,
        message: format!("Reloaded {} satellites", count),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{scratch_dir, write_tle, OTHER_LINE1, OTHER_LINE2};
    use crate::catalog::{Catalog, ISS_NORAD_ID};
    use crate::predict::{GroundStation, PositionSource};
    use crate::web::api::test_support::{body_json, state};
    use crate::web::config::Config;

    #[tokio::test]
    async fn lists_the_seeded_catalog() {
        let (status, body) = body_json(list_satellites(State(state())).await).await;
        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        let satellites = body["satellites"].as_array().unwrap();
        assert_eq!(satellites.len(), 1);
        assert_eq!(satellites[0]["id"], 1);
        assert_eq!(satellites[0]["norad_id"], ISS_NORAD_ID);
        assert_eq!(satellites[0]["category"], "Space Stations");
        assert_eq!(satellites[0]["is_active"], true);
    }

    #[tokio::test]
    async fn search_matches_case_insensitively() {
        let query = SearchQuery {
            q: " zarya ".to_string(),
        };
        let (status, body) = body_json(search_satellites(State(state()), Query(query)).await).await;
        assert_eq!(status, 200);
        assert_eq!(body["query"], "zarya");
        assert_eq!(body["satellites"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_search_is_a_bad_request() {
        let query = SearchQuery { q: "  ".to_string() };
        let (status, body) = body_json(search_satellites(State(state()), Query(query)).await).await;
        assert_eq!(status, 400);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Search query required");
    }

    #[tokio::test]
    async fn passes_are_unavailable() {
        let (status, body) = body_json(satellite_passes(State(state()), Path(1)).await).await;
        assert_eq!(status, 400);
        assert_eq!(body["success"], false);

        let (status, _) = body_json(satellite_passes(State(state()), Path(99)).await).await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn update_without_folder_reports_configuration() {
        let (status, body) = body_json(update_tle(State(state())).await).await;
        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert!(body["message"].as_str().unwrap().contains("tle_folder"));
    }

    #[tokio::test]
    async fn update_reloads_folder_and_keeps_iss() {
        let dir = scratch_dir("update-tle");
        let state = AppState::new(
            Config::default(),
            Catalog::new(Some(dir.clone())),
            PositionSource::Sgp4 {
                station: GroundStation::default(),
            },
        );

        write_tle(&dir, "other.tle", "TEST SAT", OTHER_LINE1, OTHER_LINE2);
        let (status, body) = body_json(update_tle(State(state.clone())).await).await;
        assert_eq!(status, 200);
        assert_eq!(body["message"], "Reloaded 2 satellites");

        let (_, body) = body_json(list_satellites(State(state)).await).await;
        let satellites = body["satellites"].as_array().unwrap();
        assert_eq!(satellites.len(), 2);
        assert_eq!(satellites[0]["norad_id"], ISS_NORAD_ID);
        assert_eq!(satellites[0]["id"], 1);
        assert_eq!(satellites[1]["norad_id"], 33591);
        assert_eq!(satellites[1]["id"], 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
