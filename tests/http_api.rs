use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use staybook::engine::Engine;
use staybook::http::{create_router, AppState};
use staybook::model::{NewHotel, NewRoom};
use staybook::store::MemoryStore;

fn app(engine: Arc<Engine>) -> Router {
    create_router(AppState::new(engine))
}

fn memory_engine() -> Arc<Engine> {
    Arc::new(Engine::new(Arc::new(MemoryStore::new())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Hotel with one capacity-2 room at 320/night. Returns (hotel_id, room_id).
async fn seaside(engine: &Engine) -> (String, String) {
    let hotel = engine
        .create_hotel(NewHotel {
            name: "Seaside Resort".into(),
            location: "Malibu, USA".into(),
            description: None,
            rating: 4.7,
            amenities: vec![],
            image_url: None,
        })
        .await
        .unwrap();
    let room = engine
        .create_room(NewRoom {
            hotel_id: hotel.id,
            name: "Deluxe Ocean View".into(),
            price_per_night: 320.0,
            capacity: 2,
            amenities: vec![],
            images: vec![],
        })
        .await
        .unwrap();
    (hotel.id.to_string(), room.id.to_string())
}

fn booking(room_id: &str, check_in: &str, check_out: &str) -> Value {
    json!({
        "room_id": room_id,
        "guest_name": "Ada Lovelace",
        "guest_email": "ada@example.com",
        "check_in": check_in,
        "check_out": check_out,
    })
}

#[tokio::test]
async fn root_and_health() {
    let app = app(memory_engine());
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"]["kind"], "memory");
    assert_eq!(body["storage"]["hotels"], 0);
}

#[tokio::test]
async fn adjacent_stay_books_and_overlap_conflicts() {
    let engine = memory_engine();
    let (_, room) = seaside(&engine).await;
    let app = app(engine);

    let (status, first) = send(&app, Method::POST, "/book", Some(booking(&room, "2024-01-10", "2024-01-15"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "confirmed");
    assert_eq!(first["total_price"], 1600.0);

    let (status, _) = send(&app, Method::POST, "/book", Some(booking(&room, "2024-01-15", "2024-01-18"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/book", Some(booking(&room, "2024-01-12", "2024-01-20"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, bookings) = send(&app, Method::GET, "/bookings", None).await;
    assert_eq!(status, StatusCode::OK);
    let bookings = bookings.as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    assert!(bookings.iter().any(|b| b["check_in"] == "2024-01-15" && b["check_out"] == "2024-01-18"));
}

#[tokio::test]
async fn total_is_nights_times_price() {
    let engine = memory_engine();
    let (_, room) = seaside(&engine).await;
    let app = app(engine);

    let (status, body) = send(&app, Method::POST, "/book", Some(booking(&room, "2024-02-01", "2024-02-04"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_price"], 960.0);
}

#[tokio::test]
async fn bad_dates_are_rejected() {
    let engine = memory_engine();
    let (_, room) = seaside(&engine).await;
    let app = app(engine);

    let (status, body) = send(&app, Method::POST, "/book", Some(booking(&room, "2024-01-10", "2024-01-10"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_RANGE");

    let (status, body) = send(&app, Method::POST, "/book", Some(booking(&room, "10/01/2024", "2024-01-12"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DATE");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = app(memory_engine());
    let (status, body) = send(&app, Method::POST, "/book", Some(json!({"room_id": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn availability_filters_capacity_and_bookings() {
    let engine = memory_engine();
    let (hotel, room) = seaside(&engine).await;
    let app = app(engine);
    let uri = format!("/availability/{hotel}");

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(json!({"check_in": "2024-03-01", "check_out": "2024-03-05", "guests": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"].as_array().unwrap().len(), 0);

    let (_, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(json!({"check_in": "2024-03-01", "check_out": "2024-03-05"})),
    )
    .await;
    assert_eq!(body["available"][0]["id"], room.as_str());

    send(&app, Method::POST, "/book", Some(booking(&room, "2024-03-03", "2024-03-04"))).await;
    let (_, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(json!({"check_in": "2024-03-01", "check_out": "2024-03-05", "guests": 2})),
    )
    .await;
    assert!(body["available"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_party_gets_empty_list() {
    let engine = memory_engine();
    let (hotel, _) = seaside(&engine).await;
    let app = app(engine);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/availability/{hotel}"),
        Some(json!({"check_in": "2024-01-10", "check_out": "2024-01-12", "guests": 65})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"available": []}));
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let engine = memory_engine();
    let (hotel, _) = seaside(&engine).await;
    let app = app(engine);

    let (status, body) = send(&app, Method::GET, "/hotels/not-a-ulid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let missing = ulid::Ulid::new().to_string();
    let (status, _) = send(&app, Method::POST, "/book", Some(booking(&missing, "2024-01-10", "2024-01-12"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/availability/{missing}"),
        Some(json!({"check_in": "2024-01-10", "check_out": "2024-01-12"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, &format!("/hotels/{hotel}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn seed_then_browse() {
    let app = app(memory_engine());
    let (status, body) = send(&app, Method::POST, "/seed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"inserted_hotels": 2, "inserted_rooms": 3}));

    let (_, hotels) = send(&app, Method::GET, "/hotels", None).await;
    let hotels = hotels.as_array().unwrap();
    assert_eq!(hotels.len(), 2);
    let lodge = hotels.iter().find(|h| h["name"] == "Mountain Lodge").unwrap();
    let id = lodge["id"].as_str().unwrap();

    let (status, detail) = send(&app, Method::GET, &format!("/hotels/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["hotel"]["location"], "Zermatt, Switzerland");
    assert_eq!(detail["rooms"][0]["name"], "Alpine Classic");
    assert_eq!(detail["rooms"][0]["price_per_night"], 280.0);
}

#[tokio::test]
async fn no_storage_is_service_unavailable() {
    let app = app(Arc::new(Engine::without_storage()));

    let (status, body) = send(&app, Method::GET, "/hotels", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "STORAGE_UNAVAILABLE");

    let (status, _) = send(&app, Method::POST, "/seed", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["storage"].is_null());
}
