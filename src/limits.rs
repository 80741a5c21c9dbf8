pub const MAX_NAME_LEN: usize = 256;
pub const MAX_EMAIL_LEN: usize = 320;
pub const MAX_STAY_NIGHTS: i64 = 365;
pub const MAX_GUESTS: u32 = 64;
pub const MAX_ROOMS_PER_HOTEL: usize = 10_000;
pub const MAX_BOOKINGS_PER_ROOM: usize = 100_000;
