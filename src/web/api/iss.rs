use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::{ISS_NAME, ISS_NORAD_ID};
use crate::predict::PositionFix;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct SatelliteRef {
    pub name: String,
    pub norad_id: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IssPositionResponse {
    pub success: bool,
    pub satellite: SatelliteRef,
    pub position: PositionFix,
}

#[utoipa::path(
    get,
    path = "/api/iss/position",
    tag = "iss",
    responses(
        (status = 200, description = "Current ISS position", body = IssPositionResponse),
        (status = 500, description = "Position source failed", body = ErrorResponse)
    )
)]
pub async fn iss_position(State(state): State<AppState>) -> ApiResult<Json<IssPositionResponse>> {
    let position = state.positions.current(&state.catalog, ISS_NORAD_ID).await?;

    let name = state
        .catalog
        .read()
        .await
        .find_by_norad(ISS_NORAD_ID)
        .map(|entry| entry.satellite.name.clone())
        .unwrap_or_else(|| ISS_NAME.to_string());

    Ok(Json(IssPositionResponse {
        success: true,
        satellite: SatelliteRef {
            name,
            norad_id: ISS_NORAD_ID,
        },
        position,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::api::test_support::{body_json, state};

    #[tokio::test]
    async fn missing_iss_is_a_server_error() {
        let state = state();
        assert!(state.catalog.write().await.deactivate(ISS_NORAD_ID));

        let (status, body) = body_json(iss_position(State(state)).await).await;
        assert_eq!(status, 500);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("25544"));
    }

    #[tokio::test]
    async fn seeded_iss_is_found_and_old_elements_are_refused() {
        let (status, body) = body_json(iss_position(State(state())).await).await;
        assert_eq!(status, 500);
        let error = body["error"].as_str().unwrap();
        assert!(!error.contains("not in the catalog"), "{error}");
        assert!(error.contains("days old"), "{error}");
    }
}
