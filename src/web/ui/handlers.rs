use axum::{extract::State, response::IntoResponse};

use crate::catalog::ISS_NORAD_ID;
use crate::web::state::AppState;

use super::templates::DashboardTemplate;

pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let satellites = state.catalog.read().await.active();
    let can_track = satellites.iter().any(|sat| sat.norad_id == ISS_NORAD_ID);
    DashboardTemplate {
        satellites,
        trackable_norad_id: ISS_NORAD_ID,
        can_track,
        refresh_seconds: state.config.web.refresh_seconds.max(1),
    }
}
