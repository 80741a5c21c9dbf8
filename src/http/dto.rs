//! Request and response bodies. Dates cross the boundary as `YYYY-MM-DD`.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::model::{
    AvailabilityQuery, Booking, BookingReceipt, BookingRequest, BookingStatus, Hotel, Room,
    DATE_FORMAT,
};
use crate::store::StoreInfo;

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `None` when the service runs without storage.
    pub storage: Option<StoreInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelDetail {
    pub hotel: Hotel,
    pub rooms: Vec<Room>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub check_in: String,
    pub check_out: String,
    #[serde(default = "one")]
    pub guests: u32,
}

impl From<AvailabilityRequest> for AvailabilityQuery {
    fn from(req: AvailabilityRequest) -> Self {
        AvailabilityQuery {
            check_in: req.check_in,
            check_out: req.check_out,
            guests: req.guests,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available: Vec<Room>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRequest {
    #[serde(default)]
    pub hotel_id: Option<String>,
    pub room_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in: String,
    pub check_out: String,
    #[serde(default = "one")]
    pub guests: u32,
}

impl From<BookRequest> for BookingRequest {
    fn from(req: BookRequest) -> Self {
        BookingRequest {
            hotel_id: req.hotel_id,
            room_id: req.room_id,
            guest_name: req.guest_name,
            guest_email: req.guest_email,
            check_in: req.check_in,
            check_out: req.check_out,
            guests: req.guests,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookResponse {
    pub booking_id: Ulid,
    pub total_price: f64,
    pub status: BookingStatus,
}

impl From<BookingReceipt> for BookResponse {
    fn from(r: BookingReceipt) -> Self {
        BookResponse {
            booking_id: r.booking_id,
            total_price: r.total_price,
            status: r.status,
        }
    }
}

/// A stored booking with its stay flattened to boundary strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDto {
    pub id: Ulid,
    pub hotel_id: Ulid,
    pub room_id: Ulid,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
    pub total_price: f64,
    pub status: BookingStatus,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        BookingDto {
            id: b.id,
            hotel_id: b.hotel_id,
            room_id: b.room_id,
            guest_name: b.guest_name,
            guest_email: b.guest_email,
            check_in: b.stay.check_in().format(DATE_FORMAT).to_string(),
            check_out: b.stay.check_out().format(DATE_FORMAT).to_string(),
            guests: b.guests,
            total_price: b.total_price,
            status: b.status,
        }
    }
}
