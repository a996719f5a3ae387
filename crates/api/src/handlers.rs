pub mod bookings;
pub mod profile;
pub mod schedule;
pub mod slots;
