use std::time::Instant;

use tracing::{info, warn};

use crate::limits::*;
use crate::model::*;
use crate::store::Record;

use super::conflict::{check_no_conflict, total_price, validate_guest, validate_guests, validate_stay};
use super::{parse_id, Engine, EngineError};

impl Engine {
    pub async fn create_hotel(&self, hotel: NewHotel) -> Result<Hotel, EngineError> {
        let repo = self.repo()?;
        if hotel.name.trim().is_empty() {
            return Err(EngineError::Invalid("hotel name is required"));
        }
        if hotel.name.len() > MAX_NAME_LEN || hotel.location.len() > MAX_NAME_LEN {
            return Err(EngineError::LimitExceeded("hotel name or location too long"));
        }
        if !(0.0..=5.0).contains(&hotel.rating) {
            return Err(EngineError::Invalid("rating must be between 0 and 5"));
        }

        let hotel = Hotel {
            id: self.next_id()?,
            name: hotel.name,
            location: hotel.location,
            description: hotel.description,
            rating: hotel.rating,
            amenities: hotel.amenities,
            image_url: hotel.image_url,
        };
        repo.create(Record::Hotel(hotel.clone())).await?;
        info!("hotel {} created: {}", hotel.id, hotel.name);
        Ok(hotel)
    }

    pub async fn create_room(&self, room: NewRoom) -> Result<Room, EngineError> {
        let repo = self.repo()?;
        if room.name.trim().is_empty() {
            return Err(EngineError::Invalid("room name is required"));
        }
        if room.name.len() > MAX_NAME_LEN {
            return Err(EngineError::LimitExceeded("room name too long"));
        }
        if !room.price_per_night.is_finite() || room.price_per_night < 0.0 {
            return Err(EngineError::Invalid("price per night must be a non-negative amount"));
        }
        if room.capacity == 0 {
            return Err(EngineError::Invalid("room capacity must be at least 1"));
        }
        self.load_hotel(room.hotel_id).await?;
        if self.rooms_of(room.hotel_id).await?.len() >= MAX_ROOMS_PER_HOTEL {
            return Err(EngineError::LimitExceeded("too many rooms in hotel"));
        }

        let room = Room {
            id: self.next_id()?,
            hotel_id: room.hotel_id,
            name: room.name,
            price_per_night: room.price_per_night,
            capacity: room.capacity,
            amenities: room.amenities,
            images: room.images,
        };
        repo.create(Record::Room(room.clone())).await?;
        info!("room {} created in hotel {}: {}", room.id, room.hotel_id, room.name);
        Ok(room)
    }

    /// Validate, check for overlap against every booking of the room, price,
    /// and persist as confirmed.
    pub async fn book(&self, request: BookingRequest) -> Result<BookingReceipt, EngineError> {
        let start = Instant::now();
        let result = self.book_inner(request).await;
        metrics::histogram!(crate::observability::BOOKING_DURATION_SECONDS)
            .record(start.elapsed().as_secs_f64());
        metrics::counter!(
            crate::observability::BOOKINGS_TOTAL,
            "outcome" => crate::observability::outcome_label(&result)
        )
        .increment(1);
        result
    }

    async fn book_inner(&self, request: BookingRequest) -> Result<BookingReceipt, EngineError> {
        let repo = self.repo()?;
        let stay = DateRange::parse(&request.check_in, &request.check_out)?;
        validate_stay(&stay)?;
        validate_guests(request.guests)?;
        validate_guest(&request.guest_name, &request.guest_email)?;

        let room_id = parse_id("room", &request.room_id)?;
        let room = self.load_room(room_id).await?;
        if let Some(raw) = request.hotel_id.as_deref() {
            let hotel_id = parse_id("hotel", raw)?;
            if hotel_id != room.hotel_id {
                return Err(EngineError::not_found("room", format!("{room_id} in hotel {hotel_id}")));
            }
        }

        // Held until the booking is stored.
        let lock = self.room_lock(room.id);
        let _guard = lock.lock().await;

        let existing = self.bookings_of(room.id).await?;
        if existing.len() >= MAX_BOOKINGS_PER_ROOM {
            return Err(EngineError::LimitExceeded("too many bookings on room"));
        }
        if let Err(e) = check_no_conflict(&stay, &existing) {
            warn!("booking rejected for room {} {stay}: {e}", room.id);
            return Err(e);
        }

        let booking = Booking {
            id: self.next_id()?,
            hotel_id: room.hotel_id,
            room_id: room.id,
            guest_name: request.guest_name.trim().to_string(),
            guest_email: request.guest_email.trim().to_string(),
            stay,
            guests: request.guests,
            total_price: total_price(&stay, room.price_per_night),
            status: BookingStatus::Confirmed,
        };
        let booking_id = repo.create(Record::Booking(booking.clone())).await?;
        info!(
            "booking {booking_id} confirmed: room {} {stay} total {}",
            room.id, booking.total_price
        );

        Ok(BookingReceipt {
            booking_id,
            total_price: booking.total_price,
            status: booking.status,
        })
    }
}
