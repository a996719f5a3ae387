pub mod bookings;
pub mod health;
pub mod profile;
pub mod schedule;
pub mod slots;
