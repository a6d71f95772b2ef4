use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use log::debug;
use std::sync::Arc;

use super::{ApiError, ErrorBody};
use crate::{AppState, DateRange, Precipitation, TemperatureObservation, TemperatureStats};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation per date over the last 12 months of data", body = Precipitation),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read measurements", body = ErrorBody)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Precipitation>, ApiError> {
    let precipitation = state.climate_db.precipitation().await?;
    Ok(Json(precipitation))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Every station identifier", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read stations", body = ErrorBody)
    ))]
pub async fn stations(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    let stations = state.climate_db.stations().await?;
    Ok(Json(stations))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Last 12 months of temperature observations for the most active station", body = Vec<TemperatureObservation>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read measurements", body = ErrorBody)
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, ApiError> {
    let observations = state.climate_db.most_active_temperatures().await?;
    Ok(Json(observations))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
         ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Min, average and max temperature from start onward", body = TemperatureStats),
        (status = BAD_REQUEST, description = "Start is not a YYYY-MM-DD date", body = ErrorBody),
        (status = NOT_FOUND, description = "No measurements in range", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read measurements", body = ErrorBody)
    ))]
pub async fn temp_stats_from(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<TemperatureStats>, ApiError> {
    let Path(start) = path?;
    temp_stats(&state, &start, None).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
         ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
         ("end" = String, Path, description = "Last date included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Min, average and max temperature between start and end", body = TemperatureStats),
        (status = BAD_REQUEST, description = "Start or end is not a YYYY-MM-DD date", body = ErrorBody),
        (status = NOT_FOUND, description = "No measurements in range", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read measurements", body = ErrorBody)
    ))]
pub async fn temp_stats_between(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<TemperatureStats>, ApiError> {
    let Path((start, end)) = path?;
    temp_stats(&state, &start, Some(end.as_str())).await
}

async fn temp_stats(
    state: &AppState,
    start: &str,
    end: Option<&str>,
) -> Result<Json<TemperatureStats>, ApiError> {
    let range = DateRange::parse(start, end).inspect_err(|e| debug!("rejected range: {}", e))?;

    state
        .climate_db
        .temperature_stats(range)
        .await?
        .map(Json)
        .ok_or(ApiError::NoData)
}
