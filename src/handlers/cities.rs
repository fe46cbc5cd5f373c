use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppResult;
use crate::services::city;
use crate::store::Record;
use crate::AppState;

/// Create a city (admin)
pub async fn create_city(
    State(state): State<AppState>,
    Json(payload): Json<Record>,
) -> AppResult<Json<Record>> {
    let created = city::create_city(&state.db, &payload).await?;
    Ok(Json(created))
}

/// List all cities
pub async fn list_cities(State(state): State<AppState>) -> AppResult<Json<Vec<Record>>> {
    let cities = city::get_all_cities(&state.db).await?;
    Ok(Json(cities))
}

/// Get a city by id
pub async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Record>> {
    let found = city::get_city(&state.db, id).await?;
    Ok(Json(found))
}

/// Delete a city (admin)
pub async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    city::delete_city(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "message": "City deleted" })))
}

/// Delete every city (admin)
pub async fn delete_all_cities(
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    city::delete_all_cities(&state.db).await?;
    Ok(Json(serde_json::json!({ "message": "All cities deleted" })))
}
