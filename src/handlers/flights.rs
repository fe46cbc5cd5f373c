use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use sea_orm::JsonValue;
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::flight;
use crate::store::Record;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListFlightsParams {
    #[serde(default)]
    pub offset: u64,
    #[serde(default = "default_max_count")]
    pub max_count: u64,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
}

fn default_max_count() -> u64 {
    50
}

fn default_sort_by() -> String {
    "departure_time".to_string()
}

fn default_sort_order() -> String {
    "asc".to_string()
}

/// Create a flight (admin). Field names are accepted in any casing
/// convention; airport references are given as names.
pub async fn create_flight(
    State(state): State<AppState>,
    Json(payload): Json<Record>,
) -> AppResult<Json<Record>> {
    let created = flight::create_flight(&state.db, &payload).await?;
    Ok(Json(created))
}

/// Sorted, paginated flight listing
pub async fn list_flights(
    State(state): State<AppState>,
    Query(params): Query<ListFlightsParams>,
) -> AppResult<Json<Vec<Record>>> {
    let flights = flight::get_all_flights(
        &state.db,
        params.offset,
        params.max_count,
        &params.sort_by,
        &params.sort_order,
    )
    .await?;
    Ok(Json(flights))
}

/// Search flights by name, airports and price bounds
pub async fn search_flights(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<Record>>> {
    let params: Record = params
        .into_iter()
        .map(|(key, value)| (key, JsonValue::String(value)))
        .collect();

    let flights = flight::search_flights(&state.db, &params).await?;
    Ok(Json(flights))
}

/// Get a flight by id
pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Record>> {
    let found = flight::get_flight(&state.db, id).await?;
    Ok(Json(found))
}

/// Replace a flight (admin). Fields absent from the payload are dropped,
/// only the id survives.
pub async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<Record>,
) -> AppResult<Json<Record>> {
    let updated = flight::update_flight(&state.db, id, &payload).await?;
    Ok(Json(updated))
}

/// Delete a flight (admin)
pub async fn delete_flight(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    flight::delete_flight(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "message": "Flight deleted" })))
}

/// Delete every flight (admin)
pub async fn delete_all_flights(
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    flight::delete_all_flights(&state.db).await?;
    Ok(Json(serde_json::json!({ "message": "All flights deleted" })))
}
