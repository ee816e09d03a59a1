//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Plain reads take `&PgPool`; writes that belong to a unit of work take
//! `&mut PgConnection` so callers can pass `&mut *tx`.

pub mod booking_repo;
pub mod category_repo;
pub mod design_image_repo;
pub mod design_repo;
pub mod favorite_repo;
pub mod message_repo;
pub mod notification_repo;
pub mod review_repo;
pub mod session_repo;
pub mod tag_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use category_repo::CategoryRepo;
pub use design_image_repo::DesignImageRepo;
pub use design_repo::DesignRepo;
pub use favorite_repo::FavoriteRepo;
pub use message_repo::MessageRepo;
pub use notification_repo::NotificationRepo;
pub use review_repo::ReviewRepo;
pub use session_repo::SessionRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
