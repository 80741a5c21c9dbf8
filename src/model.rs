use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::engine::EngineError;

/// Boundary date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Half-open stay `[check_in, check_out)`. Always at least one night long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

/// Unchecked wire shape of a `DateRange`.
#[derive(Deserialize)]
struct RawRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl TryFrom<RawRange> for DateRange {
    type Error = EngineError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.check_in, raw.check_out)
    }
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, EngineError> {
        if check_out <= check_in {
            return Err(EngineError::InvalidRange { check_in, check_out });
        }
        Ok(Self { check_in, check_out })
    }

    /// Parse boundary strings into a validated range.
    pub fn parse(check_in: &str, check_out: &str) -> Result<Self, EngineError> {
        Self::new(parse_date(check_in)?, parse_date(check_out)?)
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    #[cfg(test)]
    pub fn contains_night(&self, night: NaiveDate) -> bool {
        self.check_in <= night && night < self.check_out
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.check_in.format(DATE_FORMAT),
            self.check_out.format(DATE_FORMAT)
        )
    }
}

/// Accepts `YYYY-MM-DD`, or an ISO date-time whose date part is kept.
pub fn parse_date(raw: &str) -> Result<NaiveDate, EngineError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Ok(date);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        // With an offset, the date is the one written, not the UTC date.
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .ok_or_else(|| EngineError::InvalidDate(raw.to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: Ulid,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    /// Average rating, 0 to 5.
    pub rating: f32,
    pub amenities: Vec<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Ulid,
    pub hotel_id: Ulid,
    pub name: String,
    pub price_per_night: f64,
    /// Max guests.
    pub capacity: u32,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Ulid,
    pub hotel_id: Ulid,
    pub room_id: Ulid,
    pub guest_name: String,
    pub guest_email: String,
    pub stay: DateRange,
    pub guests: u32,
    pub total_price: f64,
    pub status: BookingStatus,
}

impl Booking {
    /// Whether this booking still holds its nights.
    pub fn is_occupying(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

/// Catalogue input for a hotel; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHotel {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub rating: f32,
    pub amenities: Vec<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub hotel_id: Ulid,
    pub name: String,
    pub price_per_night: f64,
    pub capacity: u32,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
}

/// A booking request as it arrives from the boundary: dates still unparsed.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub hotel_id: Option<String>,
    pub room_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityQuery {
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingReceipt {
    pub booking_id: Ulid,
    pub total_price: f64,
    pub status: BookingStatus,
}

/// The WAL record format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    HotelCreated(Hotel),
    RoomCreated(Room),
    BookingConfirmed(Booking),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn range_basics() {
        let r = DateRange::new(d("2024-01-10"), d("2024-01-15")).unwrap();
        assert_eq!(r.nights(), 5);
        assert!(r.contains_night(d("2024-01-10")));
        assert!(r.contains_night(d("2024-01-14")));
        assert!(!r.contains_night(d("2024-01-15"))); // half-open
        assert_eq!(r.to_string(), "[2024-01-10, 2024-01-15)");
    }

    #[test]
    fn zero_night_range_rejected() {
        let result = DateRange::new(d("2024-01-10"), d("2024-01-10"));
        assert!(matches!(result, Err(EngineError::InvalidRange { .. })));
    }

    #[test]
    fn reversed_range_rejected() {
        let result = DateRange::parse("2024-01-15", "2024-01-10");
        assert!(matches!(result, Err(EngineError::InvalidRange { .. })));
    }

    #[test]
    fn parse_accepts_plain_dates() {
        let r = DateRange::parse("2024-02-01", "2024-02-04").unwrap();
        assert_eq!(r.check_in(), d("2024-02-01"));
        assert_eq!(r.check_out(), d("2024-02-04"));
        assert_eq!(r.nights(), 3);
    }

    #[test]
    fn parse_accepts_datetimes_and_keeps_date() {
        assert_eq!(parse_date("2024-02-01T15:30:00").unwrap(), d("2024-02-01"));
        assert_eq!(parse_date("2024-02-01T15:30").unwrap(), d("2024-02-01"));
        assert_eq!(parse_date(" 2024-02-01 ").unwrap(), d("2024-02-01"));
    }

    #[test]
    fn parse_keeps_written_date_with_offset() {
        assert_eq!(parse_date("2024-02-01T15:30:00Z").unwrap(), d("2024-02-01"));
        assert_eq!(parse_date("2024-02-01T15:30:00+00:00").unwrap(), d("2024-02-01"));
        // 23:30 at -05:00 is already Feb 2 in UTC.
        assert_eq!(parse_date("2024-02-01T23:30:00-05:00").unwrap(), d("2024-02-01"));
    }

    #[test]
    fn decoding_goes_through_validation() {
        let ok: DateRange =
            serde_json::from_str(r#"{"check_in":"2024-01-10","check_out":"2024-01-15"}"#).unwrap();
        assert_eq!(ok.nights(), 5);

        let reversed = serde_json::from_str::<DateRange>(
            r#"{"check_in":"2024-01-15","check_out":"2024-01-10"}"#,
        );
        assert!(reversed.is_err());
        let empty = serde_json::from_str::<DateRange>(
            r#"{"check_in":"2024-01-10","check_out":"2024-01-10"}"#,
        );
        assert!(empty.is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        for raw in ["", "tomorrow", "2024-13-01", "2024-02-30", "01/02/2024"] {
            assert!(
                matches!(parse_date(raw), Err(EngineError::InvalidDate(_))),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn overlap_adjacent_is_free() {
        let a = DateRange::parse("2024-01-10", "2024-01-15").unwrap();
        let b = DateRange::parse("2024-01-15", "2024-01-18").unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn booking_status_serializes_lowercase() {
        let json = serde_json::to_string(&BookingStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
        assert_eq!(BookingStatus::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn event_serialization_roundtrip() {
        let event = Event::BookingConfirmed(Booking {
            id: Ulid::new(),
            hotel_id: Ulid::new(),
            room_id: Ulid::new(),
            guest_name: "Ada".into(),
            guest_email: "ada@example.com".into(),
            stay: DateRange::parse("2024-01-10", "2024-01-15").unwrap(),
            guests: 2,
            total_price: 1600.0,
            status: BookingStatus::Confirmed,
        });
        let bytes = bincode::serialize(&event).unwrap();
        let decoded: Event = bincode::deserialize(&bytes).unwrap();
        assert_eq!(event, decoded);
    }
}
