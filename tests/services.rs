use flight_planner_backend::error::AppError;
use flight_planner_backend::services::{airport, city, flight};
use flight_planner_backend::store;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{json, Map, Value};

/// Fresh in-memory database with the schema applied. A single pooled
/// connection keeps the database alive for the whole test.
async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options).await.expect("connect to sqlite");
    migration::Migrator::up(&db, None)
        .await
        .expect("run migrations");
    db
}

fn record(value: Value) -> Map<String, Value> {
    value.as_object().expect("object literal").clone()
}

#[tokio::test]
async fn test_city_from_name_is_idempotent() {
    let db = setup_db().await;

    let first = city::get_city_from_name(&db, "Oslo").await.unwrap();
    let second = city::get_city_from_name(&db, "Oslo").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(city::get_all_cities(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_city_name_is_rejected_by_unique_index() {
    let db = setup_db().await;

    city::create_city(&db, &record(json!({ "name": "Oslo" })))
        .await
        .unwrap();
    let err = city::create_city(&db, &record(json!({ "name": "Oslo" })))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Database(_)));

    // The find-or-create path stays well-behaved regardless
    let id = city::get_city_from_name(&db, "Oslo").await.unwrap();
    assert_eq!(id, 1);
}

#[tokio::test]
async fn test_airport_city_reference_is_validated() {
    let db = setup_db().await;

    let err = airport::create_airport(&db, &record(json!({ "name": "Gardermoen", "city_id": 99 })))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidReference(_)));

    let oslo = city::create_city(&db, &record(json!({ "name": "Oslo" })))
        .await
        .unwrap();
    let city_id = oslo["id"].as_i64().unwrap();

    let created = airport::create_airport(
        &db,
        &record(json!({ "name": "Gardermoen", "city_id": city_id })),
    )
    .await
    .unwrap();
    assert_eq!(created["city_id"].as_i64(), Some(city_id));

    // No city reference at all is allowed
    let torp = airport::create_airport(&db, &record(json!({ "name": "Torp" })))
        .await
        .unwrap();
    assert!(torp.get("city_id").is_none());
}

#[tokio::test]
async fn test_airport_update_merges_fields() {
    let db = setup_db().await;

    let oslo = city::create_city(&db, &record(json!({ "name": "Oslo" })))
        .await
        .unwrap();
    let created = airport::create_airport(&db, &record(json!({ "name": "Gardermoen" })))
        .await
        .unwrap();
    let airport_id = created["id"].as_i64().unwrap() as i32;

    let updated = airport::update_airport(
        &db,
        airport_id,
        &record(json!({ "city_id": oslo["id"] })),
    )
    .await
    .unwrap();

    // Partial update: untouched fields survive
    assert_eq!(updated["name"], json!("Gardermoen"));
    assert_eq!(updated["city_id"], oslo["id"]);
}

#[tokio::test]
async fn test_update_all_airports_touches_every_row() {
    let db = setup_db().await;

    let oslo = city::create_city(&db, &record(json!({ "name": "Oslo" })))
        .await
        .unwrap();
    airport::create_airport(&db, &record(json!({ "name": "Gardermoen" })))
        .await
        .unwrap();
    airport::create_airport(&db, &record(json!({ "name": "Torp" })))
        .await
        .unwrap();

    airport::update_all_airports(&db, &record(json!({ "city_id": oslo["id"] })))
        .await
        .unwrap();

    let airports = airport::get_all_airports(&db).await.unwrap();
    assert_eq!(airports.len(), 2);
    for row in airports {
        assert_eq!(row["city_id"], oslo["id"]);
    }
}

#[tokio::test]
async fn test_flight_ids_are_max_plus_one() {
    let db = setup_db().await;

    let a = flight::create_flight(&db, &record(json!({ "name": "A" })))
        .await
        .unwrap();
    let b = flight::create_flight(&db, &record(json!({ "name": "B" })))
        .await
        .unwrap();
    assert_eq!(a["id"], json!(1));
    assert_eq!(b["id"], json!(2));

    // Deleting the max id frees it for the next creation
    flight::delete_flight(&db, 2).await.unwrap();
    let c = flight::create_flight(&db, &record(json!({ "name": "C" })))
        .await
        .unwrap();
    assert_eq!(c["id"], json!(2));
}

#[tokio::test]
async fn test_latest_id_tracks_the_highest_row() {
    let db = setup_db().await;
    assert_eq!(store::get_latest_id(&db, "flights").await.unwrap(), 0);

    // Consecutive creations must keep seeing the growing max id
    for name in ["A", "B", "C"] {
        flight::create_flight(&db, &record(json!({ "name": name })))
            .await
            .unwrap();
    }

    assert_eq!(store::get_latest_id(&db, "flights").await.unwrap(), 3);
    let all = flight::get_all_flights(&db, 0, 50, "id", "asc").await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2]["id"], json!(3));
}

#[tokio::test]
async fn test_null_in_update_clears_a_text_column() {
    let db = setup_db().await;

    let created = flight::create_flight(
        &db,
        &record(json!({ "name": "F", "departure_time": "08:00" })),
    )
    .await
    .unwrap();
    let id = created["id"].as_i64().unwrap() as i32;

    let updated = store::update_object(
        &db,
        id,
        &record(json!({ "departure_time": null })),
        "flights",
    )
    .await
    .unwrap();

    assert!(updated.get("departure_time").is_none());
    assert_eq!(updated["name"], json!("F"));
}

#[tokio::test]
async fn test_flight_without_name_is_rejected() {
    let db = setup_db().await;

    let err = flight::create_flight(&db, &record(json!({ "price": "100" })))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MissingField(field) if field == "name"));
}

#[tokio::test]
async fn test_field_names_accept_any_casing() {
    let db = setup_db().await;

    let variants = [
        json!({ "Name": "F1", "DepartureCity": "Wayport" }),
        json!({ "name": "F2", "departureCity": "Wayport" }),
        json!({ "name": "F3", "departure_city": "Wayport" }),
    ];

    let mut departure_ids = Vec::new();
    for fields in variants {
        let created = flight::create_flight(&db, &record(fields)).await.unwrap();
        departure_ids.push(created["departure_city"].clone());
    }

    // All three spellings resolve to the same airport
    assert_eq!(departure_ids[0], departure_ids[1]);
    assert_eq!(departure_ids[1], departure_ids[2]);
    assert_eq!(airport::get_all_airports(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_departure_airport_alias_and_coercions() {
    let db = setup_db().await;

    let created = flight::create_flight(
        &db,
        &record(json!({
            "name": "Morning hop",
            "DepartureAirport": "Wayport",
            "ArrivalAirport": "Skyfield",
            "Price": "149.5",
            "DepartureTime": "8:05",
            "ArrivalTime": "09:35",
            "TravelTime": "90",
            "frequent_flyer_bonus": "ignored"
        })),
    )
    .await
    .unwrap();

    assert_eq!(created["name"], json!("Morning hop"));
    assert_eq!(created["price"].as_f64(), Some(149.5));
    assert_eq!(created["departure_time"], json!("08:05"));
    assert_eq!(created["arrival_time"], json!("09:35"));
    assert_eq!(created["travel_time"].as_i64(), Some(90));
    assert!(created.get("frequent_flyer_bonus").is_none());
    assert!(created["departure_city"].is_number());
    assert!(created["arrival_city"].is_number());
}

#[tokio::test]
async fn test_malformed_time_is_a_conversion_error() {
    let db = setup_db().await;

    let err = flight::create_flight(
        &db,
        &record(json!({ "name": "F", "departure_time": "around noon" })),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Conversion(_)));
}

#[tokio::test]
async fn test_search_by_price_bounds() {
    let db = setup_db().await;

    for (name, price) in [("Cheap", "50"), ("Mid", "150"), ("Dear", "250")] {
        flight::create_flight(&db, &record(json!({ "name": name, "price": price })))
            .await
            .unwrap();
    }

    let results = flight::search_flights(
        &db,
        &record(json!({ "min_price": "100", "max_price": "200" })),
    )
    .await
    .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], json!("Mid"));

    // Inclusive bounds
    let results = flight::search_flights(
        &db,
        &record(json!({ "min_price": "150", "max_price": "150" })),
    )
    .await
    .unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_search_by_airport_name_and_flight_name() {
    let db = setup_db().await;

    flight::create_flight(
        &db,
        &record(json!({ "name": "Out", "departure_city": "Wayport" })),
    )
    .await
    .unwrap();
    flight::create_flight(
        &db,
        &record(json!({ "name": "Back", "departure_city": "Skyfield" })),
    )
    .await
    .unwrap();

    let results = flight::search_flights(&db, &record(json!({ "departure_city": "Wayport" })))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], json!("Out"));

    let results = flight::search_flights(&db, &record(json!({ "name": "Back" })))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], json!("Back"));

    // Searching for an unseen airport name registers it (find-or-create)
    let results = flight::search_flights(&db, &record(json!({ "departure_city": "Nowhere" })))
        .await
        .unwrap();
    assert!(results.is_empty());
    assert_eq!(airport::get_all_airports(&db).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_listing_sorts_and_paginates() {
    let db = setup_db().await;

    for (name, price) in [("A", "100"), ("B", "300"), ("C", "200")] {
        flight::create_flight(&db, &record(json!({ "name": name, "price": price })))
            .await
            .unwrap();
    }

    let page = flight::get_all_flights(&db, 0, 2, "price", "desc").await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["name"], json!("B"));
    assert_eq!(page[1]["name"], json!("C"));

    let rest = flight::get_all_flights(&db, 2, 2, "price", "desc").await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0]["name"], json!("A"));

    // Unknown sort column and order fall back to departure_time ascending
    let fallback = flight::get_all_flights(&db, 0, 50, "bogus", "sideways").await.unwrap();
    assert_eq!(fallback.len(), 3);
}

#[tokio::test]
async fn test_update_flight_replaces_instead_of_merging() {
    let db = setup_db().await;

    let created = flight::create_flight(
        &db,
        &record(json!({ "name": "Old", "price": "100", "departure_time": "08:00" })),
    )
    .await
    .unwrap();
    let id = created["id"].as_i64().unwrap() as i32;

    let updated = flight::update_flight(
        &db,
        id,
        &record(json!({ "name": "New", "ArrivalTime": "10:15" })),
    )
    .await
    .unwrap();

    // Id survives, everything else comes from the new mapping only
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], json!("New"));
    assert_eq!(updated["arrival_time"], json!("10:15"));
    assert!(updated.get("price").is_none());
    assert!(updated.get("departure_time").is_none());

    let err = flight::update_flight(&db, 42, &record(json!({ "name": "X" })))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_created_flight_round_trips() {
    let db = setup_db().await;

    let created = flight::create_flight(
        &db,
        &record(json!({
            "name": "Round trip",
            "departure_city": "Wayport",
            "price": "99",
            "departure_time": "07:45",
            "travel_time": "60"
        })),
    )
    .await
    .unwrap();

    let fetched = flight::get_flight(&db, created["id"].as_i64().unwrap() as i32)
        .await
        .unwrap();

    assert_eq!(created, fetched);
}

#[tokio::test]
async fn test_deleting_missing_ids_fails_with_not_found() {
    let db = setup_db().await;

    assert!(matches!(
        city::delete_city(&db, 7).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        airport::delete_airport(&db, 7).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        flight::delete_flight(&db, 7).await.unwrap_err(),
        AppError::NotFound(_)
    ));

    // Deleting twice is an error, not a no-op
    let created = flight::create_flight(&db, &record(json!({ "name": "F" })))
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap() as i32;
    flight::delete_flight(&db, id).await.unwrap();
    assert!(matches!(
        flight::delete_flight(&db, id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_delete_all_empties_each_table() {
    let db = setup_db().await;

    city::create_city(&db, &record(json!({ "name": "Oslo" })))
        .await
        .unwrap();
    airport::create_airport(&db, &record(json!({ "name": "Gardermoen" })))
        .await
        .unwrap();
    flight::create_flight(&db, &record(json!({ "name": "F" })))
        .await
        .unwrap();

    city::delete_all_cities(&db).await.unwrap();
    airport::delete_all_airports(&db).await.unwrap();
    flight::delete_all_flights(&db).await.unwrap();

    assert!(city::get_all_cities(&db).await.unwrap().is_empty());
    assert!(airport::get_all_airports(&db).await.unwrap().is_empty());
    assert!(flight::get_all_flights(&db, 0, 50, "id", "asc").await.unwrap().is_empty());
}
