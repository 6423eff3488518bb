pub mod error;
pub mod iss;
pub mod satellites;

#[cfg(test)]
pub(crate) mod test_support {
    use axum::response::{IntoResponse, Response};
    use serde_json::Value;

    use crate::catalog::Catalog;
    use crate::predict::{GroundStation, PositionSource};
    use crate::web::config::Config;
    use crate::web::state::AppState;

    pub fn state() -> AppState {
        AppState::new(
            Config::default(),
            Catalog::new(None),
            PositionSource::Sgp4 {
                station: GroundStation::default(),
            },
        )
    }

    pub async fn body_json(response: impl IntoResponse) -> (u16, Value) {
        let response: Response = response.into_response();
        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
