use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use super::dto::{
    AvailabilityRequest, AvailabilityResponse, BookRequest, BookResponse, BookingDto,
    HealthResponse, HotelDetail, MessageResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::model::Hotel;
use crate::seed::SeedReport;

pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Staybook booking API".into(),
    })
}

/// GET /health
///
/// Always 200; `storage` is null when the service has no repository.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        storage: state.engine.storage_info(),
    })
}

/// POST /seed
pub async fn seed(State(state): State<AppState>) -> HandlerResult<SeedReport> {
    Ok(Json(crate::seed::seed(&state.engine).await?))
}

/// GET /hotels
pub async fn list_hotels(State(state): State<AppState>) -> HandlerResult<Vec<Hotel>> {
    Ok(Json(state.engine.list_hotels().await?))
}

/// GET /hotels/{hotel_id}
pub async fn get_hotel(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
) -> HandlerResult<HotelDetail> {
    let (hotel, rooms) = state.engine.get_hotel(&hotel_id).await?;
    Ok(Json(HotelDetail { hotel, rooms }))
}

/// POST /availability/{hotel_id}
pub async fn check_availability(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    body: Result<Json<AvailabilityRequest>, JsonRejection>,
) -> HandlerResult<AvailabilityResponse> {
    let Json(request) = body?;
    let available = state
        .engine
        .check_availability(&hotel_id, &request.into())
        .await?;
    Ok(Json(AvailabilityResponse { available }))
}

/// POST /book
pub async fn book(
    State(state): State<AppState>,
    body: Result<Json<BookRequest>, JsonRejection>,
) -> HandlerResult<BookResponse> {
    let Json(request) = body?;
    let receipt = state.engine.book(request.into()).await?;
    Ok(Json(receipt.into()))
}

/// GET /bookings
pub async fn list_bookings(State(state): State<AppState>) -> HandlerResult<Vec<BookingDto>> {
    let bookings = state.engine.list_bookings().await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}
