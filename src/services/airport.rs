use sea_orm::DatabaseConnection;

use crate::error::{AppError, AppResult};
use crate::services::city;
use crate::store::{self, Record};

pub const TABLE: &str = "airports";

/// Insert an airport. A supplied `city_id` must reference an existing city;
/// the store's NotFound for the city lookup becomes an InvalidReference
/// here, so a missing city is never reported as a missing airport.
pub async fn create_airport(db: &DatabaseConnection, data: &Record) -> AppResult<Record> {
    if let Some(city_id) = data.get("city_id").filter(|v| !v.is_null()) {
        let city_id = city_id.as_i64().ok_or_else(|| {
            AppError::Conversion(format!("Cannot use {} as a city id", city_id))
        })?;

        city::get_city(db, city_id as i32).await.map_err(|err| match err {
            AppError::NotFound(_) => {
                AppError::InvalidReference("There is no city with such an ID".to_string())
            }
            other => other,
        })?;
    }

    store::create_object(db, data, TABLE).await
}

pub async fn get_airport(db: &DatabaseConnection, airport_id: i32) -> AppResult<Record> {
    store::get_object(db, airport_id, TABLE).await
}

pub async fn get_all_airports(db: &DatabaseConnection) -> AppResult<Vec<Record>> {
    store::get_all_objects(db, TABLE).await
}

pub async fn update_airport(
    db: &DatabaseConnection,
    airport_id: i32,
    data: &Record,
) -> AppResult<Record> {
    store::update_object(db, airport_id, data, TABLE).await
}

pub async fn update_all_airports(db: &DatabaseConnection, data: &Record) -> AppResult<()> {
    store::update_all_objects(db, data, TABLE).await
}

pub async fn delete_airport(db: &DatabaseConnection, airport_id: i32) -> AppResult<()> {
    store::delete_object(db, airport_id, TABLE).await
}

pub async fn delete_all_airports(db: &DatabaseConnection) -> AppResult<()> {
    store::delete_all_objects(db, TABLE).await
}

/// Resolve an airport name to its id, creating the airport on first sight.
pub async fn get_airport_from_name(db: &DatabaseConnection, name: &str) -> AppResult<i32> {
    super::get_id_from_name(db, name, TABLE).await
}
