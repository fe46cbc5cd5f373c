//! Table-agnostic CRUD primitives.
//!
//! Rows are read and written as JSON records so the same code can serve any
//! entity table keyed by an integer `id` column. Statements are built with
//! `sea_query` so they render correctly for whichever backend the pool is
//! connected to.

use sea_orm::sea_query::{
    Alias, Asterisk, Expr, ExprTrait, Keyword, Order, Query, SelectStatement, SimpleExpr,
    UpdateStatement,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, JsonValue, Value};

use crate::error::{AppError, AppResult};

/// A single row, keyed by column name. Null columns are stripped when a
/// record is read back, so absent optional fields never appear in responses.
pub type Record = serde_json::Map<String, JsonValue>;

/// Insert a new row, assigning the next id as current max + 1 (1 for an
/// empty table). Returns the stored record.
///
/// The max-id read and the insert are not wrapped in a transaction, so
/// concurrent callers can race on id assignment. Accepted limitation of the
/// single-writer deployment this service targets.
pub async fn create_object(
    db: &DatabaseConnection,
    data: &Record,
    table: &str,
) -> AppResult<Record> {
    let id = get_latest_id(db, table).await? + 1;
    create_object_with_id(db, id, data, table).await
}

/// Insert a new row under a caller-chosen id. Used by the flight
/// full-replace update to keep the original id.
pub async fn create_object_with_id(
    db: &DatabaseConnection,
    id: i32,
    data: &Record,
    table: &str,
) -> AppResult<Record> {
    let mut columns = vec![Alias::new("id")];
    let mut values: Vec<SimpleExpr> = vec![Value::from(id).into()];

    for (key, value) in data {
        if key == "id" || value.is_null() {
            continue;
        }
        columns.push(Alias::new(key));
        values.push(sql_expr(value));
    }

    let mut insert = Query::insert();
    insert.into_table(Alias::new(table)).columns(columns);
    insert
        .values(values)
        .map_err(|e| AppError::Internal(format!("Failed to build insert for {}: {}", table, e)))?;

    let stmt = db.get_database_backend().build(&insert);
    db.execute(stmt).await?;

    get_object(db, id, table).await
}

/// Fetch a single row by id.
pub async fn get_object(db: &DatabaseConnection, id: i32, table: &str) -> AppResult<Record> {
    let query = Query::select()
        .column(Asterisk)
        .from(Alias::new(table))
        .and_where(Expr::col(Alias::new("id")).eq(id))
        .to_owned();

    fetch_one(db, &query)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Object with ID {} is not in {}", id, table)))
}

/// Fetch every row in the table.
pub async fn get_all_objects(db: &DatabaseConnection, table: &str) -> AppResult<Vec<Record>> {
    let query = Query::select()
        .column(Asterisk)
        .from(Alias::new(table))
        .to_owned();

    fetch_all(db, &query).await
}

/// Merge the given fields into an existing row (partial update) and return
/// the merged record.
pub async fn update_object(
    db: &DatabaseConnection,
    id: i32,
    data: &Record,
    table: &str,
) -> AppResult<Record> {
    let mut update = Query::update();
    update.table(Alias::new(table));

    if !merge_values(&mut update, data) {
        // Nothing to merge; still report NotFound for a missing id.
        return get_object(db, id, table).await;
    }

    update.and_where(Expr::col(Alias::new("id")).eq(id));

    let stmt = db.get_database_backend().build(&update);
    let result = db.execute(stmt).await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Object with ID {} is not in {}",
            id, table
        )));
    }

    get_object(db, id, table).await
}

/// Apply the same field merge to every row in the table.
pub async fn update_all_objects(
    db: &DatabaseConnection,
    data: &Record,
    table: &str,
) -> AppResult<()> {
    let mut update = Query::update();
    update.table(Alias::new(table));

    if !merge_values(&mut update, data) {
        return Ok(());
    }

    let stmt = db.get_database_backend().build(&update);
    db.execute(stmt).await?;
    Ok(())
}

/// Delete a row by id. Deleting an id that is already gone is an error, not
/// a silent no-op.
pub async fn delete_object(db: &DatabaseConnection, id: i32, table: &str) -> AppResult<()> {
    let delete = Query::delete()
        .from_table(Alias::new(table))
        .and_where(Expr::col(Alias::new("id")).eq(id))
        .to_owned();

    let stmt = db.get_database_backend().build(&delete);
    let result = db.execute(stmt).await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Object with ID {} is not in {}",
            id, table
        )));
    }
    Ok(())
}

/// Delete every row in the table.
pub async fn delete_all_objects(db: &DatabaseConnection, table: &str) -> AppResult<()> {
    let delete = Query::delete().from_table(Alias::new(table)).to_owned();

    let stmt = db.get_database_backend().build(&delete);
    db.execute(stmt).await?;
    Ok(())
}

/// Current maximum id in the table, 0 when empty.
///
/// Reads the top id row instead of `MAX(id)`: an aggregate column carries no
/// declared type on SQLite and would decode to JSON null.
pub async fn get_latest_id(db: &DatabaseConnection, table: &str) -> AppResult<i32> {
    let query = Query::select()
        .column(Alias::new("id"))
        .from(Alias::new(table))
        .order_by(Alias::new("id"), Order::Desc)
        .limit(1)
        .to_owned();

    let latest = fetch_one(db, &query)
        .await?
        .and_then(|row| row.get("id").and_then(JsonValue::as_i64))
        .unwrap_or(0);

    Ok(latest as i32)
}

/// Exact-match lookup on a single column. Used by the find-or-create paths.
pub async fn find_object_by(
    db: &DatabaseConnection,
    column: &str,
    value: &JsonValue,
    table: &str,
) -> AppResult<Option<Record>> {
    let query = Query::select()
        .column(Asterisk)
        .from(Alias::new(table))
        .and_where(Expr::col(Alias::new(column)).eq(sql_expr(value)))
        .to_owned();

    fetch_one(db, &query).await
}

pub(crate) async fn fetch_all(
    db: &DatabaseConnection,
    query: &SelectStatement,
) -> AppResult<Vec<Record>> {
    let stmt = db.get_database_backend().build(query);
    let rows = JsonValue::find_by_statement(stmt).all(db).await?;
    Ok(rows.into_iter().map(into_record).collect())
}

pub(crate) async fn fetch_one(
    db: &DatabaseConnection,
    query: &SelectStatement,
) -> AppResult<Option<Record>> {
    let stmt = db.get_database_backend().build(query);
    let row = JsonValue::find_by_statement(stmt).one(db).await?;
    Ok(row.map(into_record))
}

/// Map a JSON value onto a bind parameter. JSON null becomes the untyped
/// NULL keyword, so clearing a column works whatever its type is.
pub(crate) fn sql_expr(value: &JsonValue) -> SimpleExpr {
    let bound: Value = match value {
        JsonValue::Null => return SimpleExpr::Keyword(Keyword::Null),
        JsonValue::Bool(b) => (*b).into(),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => i.into(),
            None => n.as_f64().unwrap_or_default().into(),
        },
        JsonValue::String(s) => s.clone().into(),
        other => other.to_string().into(),
    };
    bound.into()
}

/// Queue every non-id field of `data` onto an UPDATE. Returns false when
/// there is nothing to set.
fn merge_values(update: &mut UpdateStatement, data: &Record) -> bool {
    let mut touched = false;
    for (key, value) in data {
        if key == "id" {
            continue;
        }
        update.value(Alias::new(key), sql_expr(value));
        touched = true;
    }
    touched
}

fn into_record(row: JsonValue) -> Record {
    match row {
        JsonValue::Object(map) => map.into_iter().filter(|(_, v)| !v.is_null()).collect(),
        _ => Record::new(),
    }
}
