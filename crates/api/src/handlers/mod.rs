pub mod auth;
pub mod bookings;
pub mod categories;
pub mod designs;
pub mod favorites;
pub mod messages;
pub mod notifications;
pub mod reviews;
pub mod tags;
