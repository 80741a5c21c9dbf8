use crate::limits::*;
use crate::model::*;

use super::EngineError;

/// Half-open overlap: `[a, b)` and `[c, d)` intersect iff `a < d && c < b`.
pub fn overlaps(candidate: &DateRange, existing: &DateRange) -> bool {
    candidate.overlaps(existing)
}

/// True if any existing range overlaps the candidate. Stops at the first hit.
pub fn has_conflict<'a>(
    candidate: &DateRange,
    existing: impl IntoIterator<Item = &'a DateRange>,
) -> bool {
    existing.into_iter().any(|range| overlaps(candidate, range))
}

/// Booking-path check: names the first occupying booking that overlaps.
pub(crate) fn check_no_conflict(stay: &DateRange, bookings: &[Booking]) -> Result<(), EngineError> {
    match bookings
        .iter()
        .filter(|b| b.is_occupying())
        .find(|b| overlaps(stay, &b.stay))
    {
        Some(existing) => Err(EngineError::Conflict(existing.id)),
        None => Ok(()),
    }
}

pub(crate) fn validate_stay(stay: &DateRange) -> Result<(), EngineError> {
    if stay.nights() > MAX_STAY_NIGHTS {
        return Err(EngineError::LimitExceeded("stay too long"));
    }
    Ok(())
}

pub(crate) fn validate_party(guests: u32) -> Result<(), EngineError> {
    if guests == 0 {
        return Err(EngineError::Invalid("guests must be at least 1"));
    }
    Ok(())
}

pub(crate) fn validate_guests(guests: u32) -> Result<(), EngineError> {
    validate_party(guests)?;
    if guests > MAX_GUESTS {
        return Err(EngineError::LimitExceeded("too many guests"));
    }
    Ok(())
}

pub(crate) fn validate_guest(name: &str, email: &str) -> Result<(), EngineError> {
    if name.trim().is_empty() {
        return Err(EngineError::Invalid("guest name is required"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(EngineError::LimitExceeded("guest name too long"));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(EngineError::LimitExceeded("guest email too long"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(EngineError::Invalid("guest email is not an address")),
    }
}

/// Nights times the nightly rate.
pub(crate) fn total_price(stay: &DateRange, price_per_night: f64) -> f64 {
    stay.nights() as f64 * price_per_night
}
