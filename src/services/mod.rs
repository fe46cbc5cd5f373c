pub mod airport;
pub mod city;
pub mod flight;

use sea_orm::{DatabaseConnection, JsonValue, SqlErr};

use crate::error::{AppError, AppResult};
use crate::store::{self, Record};

/// Resolve a name to an id in the given table, creating the row when no
/// exact match exists (find-or-create).
pub(crate) async fn get_id_from_name(
    db: &DatabaseConnection,
    name: &str,
    table: &str,
) -> AppResult<i32> {
    if let Some(id) = lookup_id(db, name, table).await? {
        return Ok(id);
    }

    let mut data = Record::new();
    data.insert("name".to_string(), JsonValue::String(name.to_string()));

    match store::create_object(db, &data, table).await {
        Ok(_) => {}
        // A concurrent request inserted the same name first; the unique
        // index on `name` turns that race into a constraint violation and
        // the winning row is re-read below.
        Err(AppError::Database(err))
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {}
        Err(err) => return Err(err),
    }

    lookup_id(db, name, table).await?.ok_or_else(|| {
        AppError::Internal(format!("Row for '{}' vanished from {} after insert", name, table))
    })
}

async fn lookup_id(db: &DatabaseConnection, name: &str, table: &str) -> AppResult<Option<i32>> {
    let found =
        store::find_object_by(db, "name", &JsonValue::String(name.to_string()), table).await?;

    Ok(found
        .and_then(|row| row.get("id").and_then(JsonValue::as_i64))
        .map(|id| id as i32))
}
