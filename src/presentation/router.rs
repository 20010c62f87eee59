// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::auth::require_api_key;
use crate::presentation::handlers::{
    activity, get_dashboard, health_check, list_devices, refresh_dashboard, sensor_data,
};
use axum::routing::{get, post};
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    let mock_api = Router::new()
        .route("/devices", get(list_devices))
        .route("/sensorData", get(sensor_data))
        .route("/activity", get(activity))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/refresh", post(refresh_dashboard))
        .nest("/api/thingspace", mock_api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
