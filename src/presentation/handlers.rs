// HTTP request handlers
use crate::domain::time_range::TimeRange;
use crate::infrastructure::json_mapper::{
    activity_to_json, chart_to_json, device_to_json, snapshot_to_json, ActivityJson, ChartJson, DeviceJson,
    SnapshotJson,
};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    pub range: Option<TimeRange>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimeRangeQuery {
    #[serde(rename = "timeRange")]
    pub time_range: Option<TimeRange>,
}

fn query_or_bad_request<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(q)| q)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Latest published snapshot
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Result<Json<SnapshotJson>, ApiError> {
    state
        .refresh_service
        .latest()
        .map(|snapshot| Json(snapshot_to_json(&snapshot)))
        .ok_or(ApiError::NotReady)
}

/// Manual refresh, optionally switching the selected range
pub async fn refresh_dashboard(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RefreshQuery>, QueryRejection>,
) -> Result<Json<SnapshotJson>, ApiError> {
    let query = query_or_bad_request(query)?;
    state
        .refresh_service
        .refresh(query.range)
        .await
        .map(|snapshot| Json(snapshot_to_json(&snapshot)))
        .ok_or(ApiError::NotReady)
}

pub async fn list_devices(State(state): State<Arc<AppState>>) -> Json<Vec<DeviceJson>> {
    let devices = state.mock_api.devices(Utc::now(), &mut rand::rng());
    Json(devices.iter().map(device_to_json).collect())
}

pub async fn sensor_data(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TimeRangeQuery>, QueryRejection>,
) -> Result<Json<Vec<ChartJson>>, ApiError> {
    let range = query_or_bad_request(query)?.time_range.unwrap_or_default();
    let charts = state.mock_api.sensor_data(range, Utc::now(), &mut rand::rng());
    Ok(Json(charts.iter().map(chart_to_json).collect()))
}

pub async fn activity(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TimeRangeQuery>, QueryRejection>,
) -> Result<Json<ActivityJson>, ApiError> {
    let range = query_or_bad_request(query)?.time_range.unwrap_or_default();
    let report = state.mock_api.activity(range, Utc::now(), &mut rand::rng());
    Ok(Json(activity_to_json(&report)))
}
