use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppResult;
use crate::services::airport;
use crate::store::Record;
use crate::AppState;

/// Create an airport (admin). A supplied `city_id` must reference an
/// existing city.
pub async fn create_airport(
    State(state): State<AppState>,
    Json(payload): Json<Record>,
) -> AppResult<Json<Record>> {
    let created = airport::create_airport(&state.db, &payload).await?;
    Ok(Json(created))
}

/// List all airports
pub async fn list_airports(State(state): State<AppState>) -> AppResult<Json<Vec<Record>>> {
    let airports = airport::get_all_airports(&state.db).await?;
    Ok(Json(airports))
}

/// Get an airport by id
pub async fn get_airport(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Record>> {
    let found = airport::get_airport(&state.db, id).await?;
    Ok(Json(found))
}

/// Merge fields into an airport (admin)
pub async fn update_airport(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<Record>,
) -> AppResult<Json<Record>> {
    let updated = airport::update_airport(&state.db, id, &payload).await?;
    Ok(Json(updated))
}

/// Merge the same fields into every airport (admin)
pub async fn update_all_airports(
    State(state): State<AppState>,
    Json(payload): Json<Record>,
) -> AppResult<Json<serde_json::Value>> {
    airport::update_all_airports(&state.db, &payload).await?;
    Ok(Json(serde_json::json!({ "message": "All airports updated" })))
}

/// Delete an airport (admin)
pub async fn delete_airport(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    airport::delete_airport(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "message": "Airport deleted" })))
}

/// Delete every airport (admin)
pub async fn delete_all_airports(
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    airport::delete_all_airports(&state.db).await?;
    Ok(Json(serde_json::json!({ "message": "All airports deleted" })))
}
