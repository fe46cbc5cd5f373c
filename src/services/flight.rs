use chrono::NaiveTime;
use sea_orm::sea_query::{Alias, Asterisk, Expr, ExprTrait, Order, Query};
use sea_orm::{DatabaseConnection, JsonValue};

use crate::error::{AppError, AppResult};
use crate::services::airport;
use crate::store::{self, Record};

pub const TABLE: &str = "flights";

/// Every column of the flights table; the only accepted `sort_by` targets.
pub const COLUMNS: [&str; 8] = [
    "id",
    "name",
    "departure_city",
    "arrival_city",
    "price",
    "departure_time",
    "arrival_time",
    "travel_time",
];

const TIME_FORMAT: &str = "%H:%M";

/// Create a flight from an arbitrarily-cased field mapping. Keys are
/// snake-cased before matching; unrecognized keys are ignored. `name` is
/// required, airport references are given as names and resolved (or created)
/// through the airport registry.
pub async fn create_flight(db: &DatabaseConnection, fields: &Record) -> AppResult<Record> {
    let flight = normalize_fields(db, fields).await?;
    store::create_object(db, &flight, TABLE).await
}

pub async fn get_flight(db: &DatabaseConnection, flight_id: i32) -> AppResult<Record> {
    store::get_object(db, flight_id, TABLE).await
}

pub async fn delete_flight(db: &DatabaseConnection, flight_id: i32) -> AppResult<()> {
    store::delete_object(db, flight_id, TABLE).await
}

pub async fn delete_all_flights(db: &DatabaseConnection) -> AppResult<()> {
    store::delete_all_objects(db, TABLE).await
}

/// Full-replace update: the existing row is deleted and a new one is created
/// from `fields` under the original id. Fields absent from `fields` are
/// dropped, not carried over. Not transactional; a failing re-create loses
/// the row.
pub async fn update_flight(
    db: &DatabaseConnection,
    flight_id: i32,
    fields: &Record,
) -> AppResult<Record> {
    store::get_object(db, flight_id, TABLE).await.map_err(|err| match err {
        AppError::NotFound(_) => {
            AppError::NotFound(format!("There is no flight with ID {}", flight_id))
        }
        other => other,
    })?;

    let flight = normalize_fields(db, fields).await?;
    store::delete_object(db, flight_id, TABLE).await?;
    store::create_object_with_id(db, flight_id, &flight, TABLE).await
}

/// Conjunctive search over `name`, `departure_city`/`arrival_city` (airport
/// names, matched by resolved id), and inclusive `min_price`/`max_price`
/// bounds. Unrecognized parameters are ignored.
pub async fn search_flights(db: &DatabaseConnection, params: &Record) -> AppResult<Vec<Record>> {
    let mut query = Query::select();
    query.column(Asterisk).from(Alias::new(TABLE));

    if let Some(name) = params.get("name") {
        query.and_where(Expr::col(Alias::new("name")).eq(text_value(name)));
    }

    if let Some(value) = params.get("departure_city") {
        let airport_id = airport::get_airport_from_name(db, name_value(value)?).await?;
        query.and_where(Expr::col(Alias::new("departure_city")).eq(airport_id));
    }

    if let Some(value) = params.get("arrival_city") {
        let airport_id = airport::get_airport_from_name(db, name_value(value)?).await?;
        query.and_where(Expr::col(Alias::new("arrival_city")).eq(airport_id));
    }

    if let Some(value) = params.get("min_price") {
        query.and_where(Expr::col(Alias::new("price")).gte(store::sql_expr(&to_number(value)?)));
    }

    if let Some(value) = params.get("max_price") {
        query.and_where(Expr::col(Alias::new("price")).lte(store::sql_expr(&to_number(value)?)));
    }

    store::fetch_all(db, &query).await
}

/// Sorted, paginated listing. An unknown `sort_by` falls back to
/// `departure_time`; anything but asc/desc falls back to ascending.
pub async fn get_all_flights(
    db: &DatabaseConnection,
    offset: u64,
    max_count: u64,
    sort_by: &str,
    sort_order: &str,
) -> AppResult<Vec<Record>> {
    let sort_by = if COLUMNS.contains(&sort_by) {
        sort_by
    } else {
        "departure_time"
    };

    let order = if sort_order.eq_ignore_ascii_case("desc") {
        Order::Desc
    } else {
        Order::Asc
    };

    let query = Query::select()
        .column(Asterisk)
        .from(Alias::new(TABLE))
        .order_by(Alias::new(sort_by), order)
        .limit(max_count)
        .offset(offset)
        .to_owned();

    store::fetch_all(db, &query).await
}

/// Map incoming fields onto the canonical flight columns, coercing values
/// along the way. Airport references may arrive under either the `_city` or
/// `_airport` key and always hold airport names.
async fn normalize_fields(db: &DatabaseConnection, fields: &Record) -> AppResult<Record> {
    let mut flight = Record::new();

    for (key, value) in fields {
        match to_snake_case(key).as_str() {
            "name" => {
                flight.insert("name".to_string(), JsonValue::String(text_value(value)));
            }
            "departure_city" | "departure_airport" => {
                let airport_id = airport::get_airport_from_name(db, name_value(value)?).await?;
                flight.insert("departure_city".to_string(), airport_id.into());
            }
            "arrival_city" | "arrival_airport" => {
                let airport_id = airport::get_airport_from_name(db, name_value(value)?).await?;
                flight.insert("arrival_city".to_string(), airport_id.into());
            }
            "price" => {
                flight.insert("price".to_string(), to_number(value)?);
            }
            "travel_time" => {
                flight.insert("travel_time".to_string(), to_number(value)?);
            }
            "departure_time" => {
                flight.insert("departure_time".to_string(), parse_time(value)?.into());
            }
            "arrival_time" => {
                flight.insert("arrival_time".to_string(), parse_time(value)?.into());
            }
            _ => {}
        }
    }

    if !flight.contains_key("name") {
        return Err(AppError::MissingField("name".to_string()));
    }

    Ok(flight)
}

/// Coerce a value to a number: integer text first, then float text. JSON
/// numbers pass through unchanged.
pub fn to_number(value: &JsonValue) -> AppResult<JsonValue> {
    match value {
        JsonValue::Number(_) => Ok(value.clone()),
        JsonValue::String(text) => {
            if let Ok(int) = text.trim().parse::<i64>() {
                return Ok(JsonValue::from(int));
            }
            if let Ok(float) = text.trim().parse::<f64>() {
                return Ok(JsonValue::from(float));
            }
            Err(AppError::Conversion(format!(
                "Cannot convert {} to either int or float",
                text
            )))
        }
        other => Err(AppError::Conversion(format!(
            "Cannot convert {} to either int or float",
            other
        ))),
    }
}

/// Map CamelCase/PascalCase-ish identifiers to lower-case underscore form by
/// inserting an underscore before each internal uppercase letter.
pub fn to_snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    for (i, ch) in input.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.extend(ch.to_lowercase());
    }
    out
}

/// Parse an hour:minute time of day, returning the canonical zero-padded
/// "HH:MM" text stored in the table.
fn parse_time(value: &JsonValue) -> AppResult<String> {
    let text = value.as_str().ok_or_else(|| {
        AppError::Conversion(format!("Cannot parse {} as a HH:MM time", value))
    })?;

    let time = NaiveTime::parse_from_str(text, TIME_FORMAT)
        .map_err(|_| AppError::Conversion(format!("Cannot parse {} as a HH:MM time", text)))?;

    Ok(time.format(TIME_FORMAT).to_string())
}

fn text_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn name_value(value: &JsonValue) -> AppResult<&str> {
    value.as_str().ok_or_else(|| {
        AppError::Conversion(format!("Expected an airport name, got {}", value))
    })
}
