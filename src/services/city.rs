use sea_orm::DatabaseConnection;

use crate::error::AppResult;
use crate::store::{self, Record};

pub const TABLE: &str = "cities";

pub async fn create_city(db: &DatabaseConnection, data: &Record) -> AppResult<Record> {
    store::create_object(db, data, TABLE).await
}

pub async fn get_city(db: &DatabaseConnection, city_id: i32) -> AppResult<Record> {
    store::get_object(db, city_id, TABLE).await
}

pub async fn get_all_cities(db: &DatabaseConnection) -> AppResult<Vec<Record>> {
    store::get_all_objects(db, TABLE).await
}

pub async fn delete_city(db: &DatabaseConnection, city_id: i32) -> AppResult<()> {
    store::delete_object(db, city_id, TABLE).await
}

pub async fn delete_all_cities(db: &DatabaseConnection) -> AppResult<()> {
    store::delete_all_objects(db, TABLE).await
}

/// Resolve a city name to its id, creating the city on first sight.
/// Idempotent after the first creation: repeated calls return the same id.
pub async fn get_city_from_name(db: &DatabaseConnection, name: &str) -> AppResult<i32> {
    super::get_id_from_name(db, name, TABLE).await
}
